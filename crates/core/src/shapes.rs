//! Shapes module - the fixed tetromino catalog
//!
//! Every shape carries its four rotation states as authored bitmaps.
//! Rotation is a table lookup, never a geometric transform at runtime.
//! Bitmaps are row-major, row 0 on top, `1` marking a filled cell. The
//! top-left corner of a bitmap sits on the piece anchor.

use crate::types::{Rgb, ShapeKind, BOARD_WIDTH};

/// One rotation state: rows of 0/1 cells
pub type Bitmap = &'static [&'static [u8]];

/// An immutable catalog entry
#[derive(Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    pub rotations: [Bitmap; 4],
}

impl Shape {
    pub fn color(&self) -> Rgb {
        self.kind.color()
    }
}

/// The seven shapes, in [`ShapeKind::ALL`] order.
pub static SHAPES: [Shape; 7] = [
    Shape {
        kind: ShapeKind::I,
        rotations: [
            &[&[1, 1, 1, 1]],
            &[&[1], &[1], &[1], &[1]],
            &[&[1, 1, 1, 1]],
            &[&[1], &[1], &[1], &[1]],
        ],
    },
    Shape {
        kind: ShapeKind::O,
        rotations: [
            &[&[1, 1], &[1, 1]],
            &[&[1, 1], &[1, 1]],
            &[&[1, 1], &[1, 1]],
            &[&[1, 1], &[1, 1]],
        ],
    },
    Shape {
        kind: ShapeKind::T,
        rotations: [
            &[&[0, 1, 0], &[1, 1, 1]],
            &[&[1, 0], &[1, 1], &[1, 0]],
            &[&[1, 1, 1], &[0, 1, 0]],
            &[&[0, 1], &[1, 1], &[0, 1]],
        ],
    },
    Shape {
        kind: ShapeKind::S,
        rotations: [
            &[&[0, 1, 1], &[1, 1, 0]],
            &[&[1, 0], &[1, 1], &[0, 1]],
            &[&[0, 1, 1], &[1, 1, 0]],
            &[&[1, 0], &[1, 1], &[0, 1]],
        ],
    },
    Shape {
        kind: ShapeKind::Z,
        rotations: [
            &[&[1, 1, 0], &[0, 1, 1]],
            &[&[0, 1], &[1, 1], &[1, 0]],
            &[&[1, 1, 0], &[0, 1, 1]],
            &[&[0, 1], &[1, 1], &[1, 0]],
        ],
    },
    Shape {
        kind: ShapeKind::J,
        rotations: [
            &[&[1, 0, 0], &[1, 1, 1]],
            &[&[1, 1], &[1, 0], &[1, 0]],
            &[&[1, 1, 1], &[0, 0, 1]],
            &[&[0, 1], &[0, 1], &[1, 1]],
        ],
    },
    Shape {
        kind: ShapeKind::L,
        rotations: [
            &[&[0, 0, 1], &[1, 1, 1]],
            &[&[1, 0], &[1, 0], &[1, 1]],
            &[&[1, 1, 1], &[1, 0, 0]],
            &[&[1, 1], &[0, 1], &[0, 1]],
        ],
    },
];

/// Catalog entry for a shape kind
pub fn shape(kind: ShapeKind) -> &'static Shape {
    &SHAPES[kind as usize]
}

/// Bitmap for a rotation index (taken mod 4)
pub fn rotate_tetromino(kind: ShapeKind, rotation: u8) -> Bitmap {
    shape(kind).rotations[(rotation % 4) as usize]
}

/// Filled cell offsets `(dx, dy)` from the anchor, row by row
pub fn cells(kind: ShapeKind, rotation: u8) -> impl Iterator<Item = (i8, i8)> {
    rotate_tetromino(kind, rotation)
        .iter()
        .enumerate()
        .flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, bit)| **bit != 0)
                .map(move |(dx, _)| (dx as i8, dy as i8))
        })
}

/// Columns spanned by a bitmap
pub fn bitmap_width(bitmap: Bitmap) -> u8 {
    bitmap.first().map_or(0, |row| row.len() as u8)
}

/// Rows spanned by a bitmap
pub fn bitmap_height(bitmap: Bitmap) -> u8 {
    bitmap.len() as u8
}

/// Spawn column: the rotation-0 bitmap centered on the board (rounded left)
pub fn spawn_x(kind: ShapeKind) -> i8 {
    let width = bitmap_width(rotate_tetromino(kind, 0));
    ((BOARD_WIDTH - width) / 2) as i8
}
