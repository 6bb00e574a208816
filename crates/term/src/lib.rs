//! Terminal front-end.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer, and the presenter writes only what changed since the last
//! frame. No widget toolkit is involved.
//!
//! - [`fb`]: styled character cells
//! - [`game_view`]: snapshot to framebuffer (pure)
//! - [`presenter`]: framebuffer to terminal (crossterm)

pub mod fb;
pub mod game_view;
pub mod presenter;

pub use drop_tetris_core as core;
pub use drop_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, HudStatus, Viewport};
pub use presenter::Presenter;
