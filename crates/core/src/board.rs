//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of occupancy cells. Placed cells keep no shape
//! identity. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Pieces may hang above the board (y < 0) while spawning.

use arrayvec::ArrayVec;

use crate::shapes::cells;
use crate::types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY, FILLED, GAME_OVER_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Number of rows, as a const usable for array capacities
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Rows removed by a single clear, bottom to top
pub type ClearedRows = ArrayVec<u8, BOARD_ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Fill or empty the cell at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, filled: bool) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = if filled { FILLED } else { EMPTY };
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(FILLED))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|&c| c == FILLED))
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_ROWS {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Whether `kind` at `rotation` fits with its anchor at (x, y).
    ///
    /// Every filled cell must lie within the side walls and above the floor.
    /// Cells above the board (y < 0) skip the occupancy check.
    pub fn is_valid_position(&self, kind: ShapeKind, x: i8, y: i8, rotation: u8) -> bool {
        cells(kind, rotation).all(|(dx, dy)| {
            let bx = x as i16 + dx as i16;
            let by = y as i16 + dy as i16;
            if bx < 0 || bx >= BOARD_WIDTH as i16 || by >= BOARD_HEIGHT as i16 {
                return false;
            }
            by < 0 || !self.is_occupied(bx as i8, by as i8)
        })
    }

    /// Fill every on-board cell of the piece.
    ///
    /// Cells above the board are dropped. Callers validate the position first.
    pub fn place_piece(&mut self, kind: ShapeKind, x: i8, y: i8, rotation: u8) {
        for (dx, dy) in cells(kind, rotation) {
            self.set(x.saturating_add(dx), y.saturating_add(dy), true);
        }
    }

    /// Remove every full row and return the number removed
    pub fn clear_lines(&mut self) -> u32 {
        self.clear_full_rows().len() as u32
    }

    /// Remove every full row, letting the rows above fall.
    ///
    /// Scans bottom to top. After a removal the same index is examined again,
    /// since the row above has just moved into it. Returns the pre-clear
    /// indices of the removed rows, bottom to top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut y = BOARD_ROWS;

        while y > 0 {
            let row = y - 1;
            if !self.is_row_full(row) {
                y -= 1;
                continue;
            }

            // Everything at or above `row` has shifted once per prior removal.
            cleared.push((row - cleared.len()) as u8);

            self.cells.copy_within(0..row * width, width);
            self.cells[..width].fill(EMPTY);
        }

        cleared
    }

    /// True if any cell in the top two rows is filled
    pub fn is_game_over(&self) -> bool {
        self.cells[..GAME_OVER_ROWS as usize * BOARD_WIDTH as usize]
            .iter()
            .any(|&c| c == FILLED)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy occupancy into a snapshot grid
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_ROWS]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Empty the entire board
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Build a board from text rows (`#` filled, anything else empty),
    /// aligned to the bottom of the board.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let top = BOARD_ROWS.saturating_sub(rows.len());
        for (i, line) in rows.iter().rev().take(BOARD_ROWS).rev().enumerate() {
            for (x, ch) in line.chars().take(BOARD_WIDTH as usize).enumerate() {
                board.set(x as i8, (top + i) as i8, ch == '#');
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
