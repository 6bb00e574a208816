//! Terminal input module.
//!
//! Maps `crossterm` key events onto engine [`Command`](crate::types::Command)s.
//! Each key press is one command; there is no auto-repeat handling beyond
//! what the terminal itself sends.

pub mod map;

pub use drop_tetris_types as types;

pub use map::{handle_key_event, should_quit};
