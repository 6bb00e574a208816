//! Drop Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `drop_tetris::{core,engine,input,term,types}`
//! and hosts the pieces only the binary needs: configuration, logging setup
//! and the terminal bell audio backend.

pub mod audio;
pub mod config;
pub mod logging;

pub use drop_tetris_core as core;
pub use drop_tetris_engine as engine;
pub use drop_tetris_input as input;
pub use drop_tetris_term as term;
pub use drop_tetris_types as types;
