//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! Everything here is plain data, usable from the rules core, the engine,
//! the terminal front-end and the JSON snapshot trace alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn row**: -1 (pieces may start partially above the visible board)
//!
//! # Gravity by Level
//!
//! Levels start at 1 and advance every 10 cleared lines. The drop interval
//! shrinks by 50ms per level down to a 50ms floor:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 800ms |
//! | 2 | 750ms |
//! | 5 | 600ms |
//! | 10 | 350ms |
//! | 16+ | 50ms |
//!
//! # Examples
//!
//! ```
//! use drop_tetris_types::{Command, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row at which new pieces are anchored (one row above the visible board)
pub const SPAWN_Y: i8 = -1;

/// Number of top rows that end the game if occupied after a lock
pub const GAME_OVER_ROWS: u8 = 2;

/// Level a fresh game starts at
pub const START_LEVEL: u32 = 1;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 800;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 50;

/// Fastest gravity interval
pub const MIN_DROP_MS: u32 = 50;

/// Line clear scoring table, indexed by rows cleared in one lock.
///
/// Multiplied by the level that was current when the lock happened.
/// Clears wider than four rows score no base points.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Bonus per consecutive clearing lock after the first
pub const COMBO_BONUS: u32 = 50;

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// A single board cell: [`EMPTY`] or [`FILLED`].
///
/// Placed cells carry no shape identity.
pub type Cell = u8;

/// Unoccupied cell
pub const EMPTY: Cell = 0;

/// Occupied cell
pub const FILLED: Cell = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_table_matches_formula() {
        assert_eq!(BASE_DROP_MS, 800);
        assert_eq!(DROP_STEP_MS, 50);
        assert_eq!(MIN_DROP_MS, 50);
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(COMBO_BONUS, 50);
    }

    #[test]
    fn shape_names_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(kind.name()), Some(kind));
        }
        assert_eq!(ShapeKind::from_str("x"), None);
    }

    #[test]
    fn shape_colors_are_distinct() {
        for (i, a) in ShapeKind::ALL.iter().enumerate() {
            for b in &ShapeKind::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{:?} and {:?} share a color", a, b);
            }
        }
        assert_eq!(ShapeKind::I.color().hex(), "#00f5ff");
    }

    #[test]
    fn command_names_round_trip() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
        assert_eq!(Command::from_str("TOGGLEMUTE"), Some(Command::ToggleMute));
        assert_eq!(Command::from_str("rotateCcw"), None);
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS-style `#rrggbb` string
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The seven tetromino shapes
///
/// Each shape has a distinct display color:
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// Every shape, in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Parse shape from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use drop_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(ShapeKind::I),
            "O" => Some(ShapeKind::O),
            "T" => Some(ShapeKind::T),
            "S" => Some(ShapeKind::S),
            "Z" => Some(ShapeKind::Z),
            "J" => Some(ShapeKind::J),
            "L" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Single-letter display name
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }

    /// Display color of a falling piece of this shape
    pub fn color(&self) -> Rgb {
        match self {
            ShapeKind::I => Rgb::new(0x00, 0xf5, 0xff),
            ShapeKind::O => Rgb::new(0xff, 0xed, 0x4e),
            ShapeKind::T => Rgb::new(0xad, 0x00, 0xff),
            ShapeKind::S => Rgb::new(0x4a, 0xde, 0x80),
            ShapeKind::Z => Rgb::new(0xef, 0x44, 0x44),
            ShapeKind::J => Rgb::new(0x3b, 0x82, 0xf6),
            ShapeKind::L => Rgb::new(0xf9, 0x73, 0x16),
        }
    }
}

/// Commands accepted by the engine.
///
/// These come from keyboard input; each takes no argument and its effect is
/// observed only through the next published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    MoveDown,
    /// Drop piece to its lowest valid position and lock it
    HardDrop,
    /// Advance to the next rotation state (no wall kicks)
    Rotate,
    /// Hold or swap the active piece
    Hold,
    /// Toggle pause
    Pause,
    /// Toggle audio mute
    ToggleMute,
    /// Start a fresh game (from any state)
    Start,
    /// End the current game
    Stop,
}

impl Command {
    pub const ALL: [Command; 10] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveDown,
        Command::HardDrop,
        Command::Rotate,
        Command::Hold,
        Command::Pause,
        Command::ToggleMute,
        Command::Start,
        Command::Stop,
    ];

    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use drop_tetris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("toggleMute"), Some(Command::ToggleMute));
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "movedown" => Some(Command::MoveDown),
            "harddrop" => Some(Command::HardDrop),
            "rotate" => Some(Command::Rotate),
            "hold" => Some(Command::Hold),
            "pause" => Some(Command::Pause),
            "togglemute" => Some(Command::ToggleMute),
            "start" => Some(Command::Start),
            "stop" => Some(Command::Stop),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveDown => "moveDown",
            Command::HardDrop => "hardDrop",
            Command::Rotate => "rotate",
            Command::Hold => "hold",
            Command::Pause => "pause",
            Command::ToggleMute => "toggleMute",
            Command::Start => "start",
            Command::Stop => "stop",
        }
    }
}

/// Lifecycle of a game session.
///
/// `Idle` → `Running` ⇄ `Paused`, and `Running`/`Paused` → `Over`.
/// Starting is allowed from every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Paused,
    Over,
}

/// Why a game reached [`GamePhase::Over`].
///
/// The two lock-path causes are checked independently and can disagree on
/// the exact moment the game ends; both are kept as separate transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOverCause {
    /// A cell in the top two rows was occupied after a lock
    BoardOverflow,
    /// The next piece overlapped existing cells at its spawn position
    SpawnBlocked,
    /// The game was stopped explicitly
    Stopped,
}

/// Outcome of the most recent lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Line-clear points awarded by this lock (hard drop points excluded)
    pub score_delta: u32,
    /// Combo counter after the lock
    pub combo: u32,
    /// Bit `y` is set when pre-clear row `y` was removed
    pub cleared_rows_mask: u32,
}
