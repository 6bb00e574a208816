//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and scoring.
//! It has **no dependencies** on timers, audio, terminals or I/O, so the same
//! rules run under the interactive engine, in tests and in benchmarks.
//!
//! # Module Structure
//!
//! - [`shapes`]: The seven tetrominoes with four authored rotation bitmaps each
//! - [`board`]: 10x20 occupancy grid with collision checks and line clearing
//! - [`rng`]: Uniform shape draws (seedable) and scripted shape sequences
//! - [`scoring`]: Line-clear points, combo bonus, level and gravity curves
//! - [`game_state`]: Active piece, next/hold, counters and the lock sequence
//! - [`snapshot`]: Copyable view of the state handed to observers
//!
//! # Game Rules
//!
//! - **Uniform draws**: Each shape is picked independently; repeats are allowed
//! - **Plain rotation**: One clockwise step, rejected if it does not fit (no kicks)
//! - **Immediate lock**: A piece locks as soon as a downward move is blocked
//! - **Hold**: Store one shape for later use (once per piece)
//! - **Game over**: Any filled cell in the top two rows after a lock, or a
//!   spawn that overlaps the board
//!
//! # Example
//!
//! ```
//! use drop_tetris_core::GameState;
//! use drop_tetris_types::Command;
//!
//! // Create and start a game
//! let mut game = GameState::with_seed(12345);
//! game.start();
//!
//! // Apply commands
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! // Hard drops award 2 points per row
//! assert!(game.score() > 0);
//! ```

pub mod board;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use drop_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use game_state::{ActivePiece, GameState};
pub use rng::{ShapeCycle, ShapeSource, UniformShapes};
pub use scoring::{calculate_level, calculate_score, drop_interval_ms, ScoreResult};
pub use shapes::{rotate_tetromino, Shape, SHAPES};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
