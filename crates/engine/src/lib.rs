//! Game engine - drives the rules core in real time.
//!
//! The core crate is pure: it knows nothing about time, sound or who is
//! watching. This crate adds those collaborators around it:
//!
//! - [`timer`]: cancellable drop timer that turns elapsed time into gravity steps
//! - [`clock`]: time sources (system and manual)
//! - [`audio`]: sound hooks the engine calls at lock, clear, start, pause and stop
//! - [`observer`]: the single subscriber that receives a snapshot after each change
//! - [`engine`]: the command surface tying them together
//!
//! # Example
//!
//! ```
//! use drop_tetris_engine::{Engine, ManualClock};
//! use drop_tetris_core::GameSnapshot;
//!
//! let clock = ManualClock::new();
//! let mut engine = Engine::with_seed(7).with_clock(clock.clone());
//! engine.set_observer(|s: &GameSnapshot| assert!(s.score < 1_000_000));
//!
//! engine.start();
//! clock.advance_ms(800);
//! assert!(engine.pump());
//! ```

pub mod audio;
pub mod clock;
pub mod engine;
pub mod observer;
pub mod timer;

pub use audio::{Audio, SilentAudio};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::Engine;
pub use observer::{JsonLinesObserver, StateObserver, Tee};
pub use timer::DropTimer;
