//! Terminal bell audio.
//!
//! A terminal has exactly one sound. Line clears ring the bell; placements
//! and the background loop are tracked but silent.

use std::io::{self, Write};

use crate::engine::Audio;

const BEL: &[u8] = b"\x07";

#[derive(Debug)]
pub struct BellAudio<W: Write + Send> {
    out: W,
    muted: bool,
    looping: bool,
}

impl BellAudio<io::Stdout> {
    pub fn stdout(muted: bool) -> Self {
        Self::new(io::stdout(), muted)
    }
}

impl<W: Write + Send> BellAudio<W> {
    pub fn new(out: W, muted: bool) -> Self {
        Self {
            out,
            muted,
            looping: false,
        }
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    fn ring(&mut self) {
        if self.muted {
            return;
        }
        // Playback failures never reach the game.
        if let Err(err) = self.out.write_all(BEL).and_then(|_| self.out.flush()) {
            tracing::trace!(error = %err, "bell failed");
        }
    }
}

impl<W: Write + Send> Audio for BellAudio<W> {
    fn play_placement_sound(&mut self) {}

    fn play_line_clear_sound(&mut self) {
        self.ring();
    }

    fn play_background_loop(&mut self) {
        self.looping = true;
    }

    fn stop_background_loop(&mut self) {
        self.looping = false;
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
