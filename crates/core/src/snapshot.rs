use serde::Serialize;

use crate::game_state::ActivePiece;
use crate::types::{
    Cell, GameOverCause, GamePhase, LockEvent, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Immutable copy of everything a presenter needs to draw a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<ShapeKind>,
    pub hold: Option<ShapeKind>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub combo: u32,
    pub game_over: bool,
    pub paused: bool,
    pub phase: GamePhase,
    pub game_over_cause: Option<GameOverCause>,
    pub drop_interval_ms: u32,
    pub last_event: Option<LockEvent>,
}

impl GameSnapshot {
    /// Commands can take effect
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Filled cells on the board (excluding the active piece)
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|&&c| c != EMPTY)
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: crate::types::START_LEVEL,
            combo: 0,
            game_over: false,
            paused: false,
            phase: GamePhase::Idle,
            game_over_cause: None,
            drop_interval_ms: crate::types::BASE_DROP_MS,
            last_event: None,
        }
    }
}
