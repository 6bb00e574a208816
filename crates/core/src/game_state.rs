//! Game state module - the rules machine behind the engine
//!
//! `GameState` owns the board, the falling piece, the next/held shapes and
//! the score counters. Every command is synchronous and total: a command
//! that cannot apply leaves the state untouched and returns `false`.
//! Time is not modelled here; gravity arrives as `move_down` calls from
//! whoever owns the drop timer.

use crate::board::Board;
use crate::rng::{ShapeSource, UniformShapes};
use crate::scoring::{calculate_level, calculate_score, drop_interval_ms, hard_drop_score};
use crate::shapes::{cells, spawn_x};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    /// Rotation index, 0-3
    pub rotation: u8,
    /// Anchor column of the bitmap's left edge
    pub x: i8,
    /// Anchor row of the bitmap's top edge (negative above the board)
    pub y: i8,
}

impl ActivePiece {
    /// A piece at its spawn position: centered, one row above the board, rotation 0
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: spawn_x(kind),
            y: SPAWN_Y,
        }
    }

    pub fn moved(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Next rotation state at the same anchor
    pub fn rotated(self) -> Self {
        Self {
            rotation: (self.rotation + 1) % 4,
            ..self
        }
    }

    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_position(self.kind, self.x, self.y, self.rotation)
    }

    /// Absolute board coordinates of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        cells(self.kind, self.rotation).map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<ShapeKind>,
    hold: Option<ShapeKind>,
    can_hold: bool,
    score: u32,
    lines: u32,
    level: u32,
    combo: u32,
    phase: GamePhase,
    game_over_cause: Option<GameOverCause>,
    drop_interval_ms: u32,
    /// Last lock event (consumed by the engine).
    last_event: Option<LockEvent>,
    shapes: Box<dyn ShapeSource>,
}

impl GameState {
    /// Create an idle game drawing shapes from `shapes`
    pub fn new(shapes: Box<dyn ShapeSource>) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: START_LEVEL,
            combo: 0,
            phase: GamePhase::Idle,
            game_over_cause: None,
            drop_interval_ms: drop_interval_ms(START_LEVEL),
            last_event: None,
            shapes,
        }
    }

    /// Create an idle game with a seeded uniform shape source
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Box::new(UniformShapes::seeded(seed)))
    }

    /// Reset everything and begin a new game. Allowed from every phase.
    pub fn start(&mut self) {
        self.board.reset();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.score = 0;
        self.lines = 0;
        self.level = START_LEVEL;
        self.combo = 0;
        self.game_over_cause = None;
        self.drop_interval_ms = drop_interval_ms(START_LEVEL);
        self.last_event = None;
        self.next = Some(self.shapes.next_shape());
        self.phase = GamePhase::Running;
        self.spawn_next();
    }

    /// End a running or paused game
    pub fn stop(&mut self) -> bool {
        match self.phase {
            GamePhase::Running | GamePhase::Paused => {
                self.end(GameOverCause::Stopped);
                true
            }
            GamePhase::Idle | GamePhase::Over => false,
        }
    }

    /// Toggle between running and paused
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::Idle | GamePhase::Over => return false,
        };
        true
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over_cause
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn hold_piece(&self) -> Option<ShapeKind> {
        self.hold
    }

    pub fn next_piece(&self) -> Option<ShapeKind> {
        self.next
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board contents, e.g. to set up a puzzle.
    ///
    /// The caller keeps the active piece clear of the new cells.
    pub fn load_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.combo = self.combo;
        out.game_over = self.game_over();
        out.paused = self.paused();
        out.phase = self.phase;
        out.game_over_cause = self.game_over_cause;
        out.drop_interval_ms = self.drop_interval_ms;
        out.last_event = self.last_event;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a rules command; returns whether observable state changed.
    ///
    /// `ToggleMute` concerns audio only and never changes game state.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveDown => self.move_down(),
            Command::HardDrop => self.hard_drop(),
            Command::Rotate => self.rotate(),
            Command::Hold => self.hold(),
            Command::Pause => self.toggle_pause(),
            Command::ToggleMute => false,
            Command::Start => {
                self.start();
                true
            }
            Command::Stop => self.stop(),
        }
    }

    /// The active piece, only while commands may act on it
    fn controllable(&self) -> Option<ActivePiece> {
        match self.phase {
            GamePhase::Running => self.active,
            _ => None,
        }
    }

    fn try_replace(&mut self, candidate: ActivePiece) -> bool {
        if candidate.is_valid(&self.board) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        self.try_replace(active.moved(-1, 0))
    }

    pub fn move_right(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        self.try_replace(active.moved(1, 0))
    }

    /// Move one row down; a blocked move locks the piece instead.
    pub fn move_down(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        if !self.try_replace(active.moved(0, 1)) {
            self.lock_piece();
        }
        true
    }

    /// Drop to the lowest valid row, award 2 points per row and lock.
    pub fn hard_drop(&mut self) -> bool {
        let Some(mut landed) = self.controllable() else {
            return false;
        };

        let mut distance: u32 = 0;
        while landed.moved(0, 1).is_valid(&self.board) {
            landed = landed.moved(0, 1);
            distance += 1;
        }

        self.active = Some(landed);
        self.score = self.score.saturating_add(hard_drop_score(distance));
        self.lock_piece();
        true
    }

    /// Rotate in place; rejected if the next state does not fit (no kicks).
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        self.try_replace(active.rotated())
    }

    /// Set the active shape aside, once per piece.
    ///
    /// With an empty hold slot the next piece spawns. Otherwise the held
    /// shape comes back at its spawn position; if it would not fit there the
    /// swap is refused. Normal play ends the game before that can happen, so
    /// the refusal is only reachable on a board set up with `load_board`.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.controllable() else {
            return false;
        };

        match self.hold {
            None => {
                self.hold = Some(active.kind);
                self.active = None;
                self.spawn_next();
            }
            Some(held) => {
                let swapped = ActivePiece::spawn(held);
                if !swapped.is_valid(&self.board) {
                    return false;
                }
                self.hold = Some(active.kind);
                self.active = Some(swapped);
            }
        }

        self.can_hold = false;
        true
    }

    /// Fold the active piece into the board and settle the consequences
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .place_piece(active.kind, active.x, active.y, active.rotation);

        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len() as u32;

        let mut score_delta = 0;
        if lines_cleared > 0 {
            self.combo += 1;
            self.lines += lines_cleared;

            // Scored at the level in effect before this clear.
            score_delta = calculate_score(lines_cleared, self.level, self.combo).total;
            self.score = self.score.saturating_add(score_delta);

            self.level = calculate_level(self.lines);
            self.drop_interval_ms = drop_interval_ms(self.level);
        } else {
            self.combo = 0;
        }

        self.last_event = Some(LockEvent {
            lines_cleared,
            score_delta,
            combo: self.combo,
            cleared_rows_mask: cleared.iter().fold(0, |mask, &y| mask | (1u32 << y)),
        });

        if self.board.is_game_over() {
            self.end(GameOverCause::BoardOverflow);
            return;
        }

        self.spawn_next();
    }

    /// Promote the next shape to the active piece and draw a new next shape.
    ///
    /// Ends the game if the new piece overlaps the board where it appears.
    fn spawn_next(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.shapes.next_shape(),
        };
        self.next = Some(self.shapes.next_shape());
        self.can_hold = true;

        let piece = ActivePiece::spawn(kind);
        if !piece.is_valid(&self.board) {
            self.end(GameOverCause::SpawnBlocked);
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn end(&mut self, cause: GameOverCause) {
        self.phase = GamePhase::Over;
        self.game_over_cause = Some(cause);
        self.active = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
