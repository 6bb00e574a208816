//! Audio collaborator contract.
//!
//! The engine only says *when* sounds should happen. Implementations decide
//! how (or whether) they are produced, and must swallow their own playback
//! failures.

/// Sound hooks called by the engine
pub trait Audio: Send {
    /// A piece locked into the board
    fn play_placement_sound(&mut self);
    /// One or more lines were cleared
    fn play_line_clear_sound(&mut self);
    fn play_background_loop(&mut self);
    fn stop_background_loop(&mut self);
    /// Flip the mute flag, returning the new value
    fn toggle_mute(&mut self) -> bool;
    fn is_muted(&self) -> bool;
}

/// Produces no sound; tracks mute and loop state only
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    muted: bool,
    looping: bool,
}

impl SilentAudio {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            looping: false,
        }
    }

    /// Whether the background loop would currently be playing
    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

impl Audio for SilentAudio {
    fn play_placement_sound(&mut self) {}

    fn play_line_clear_sound(&mut self) {}

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_audio_tracks_state() {
        let mut audio = SilentAudio::default();
        assert!(!audio.is_muted());
        assert!(audio.toggle_mute());
        assert!(audio.is_muted());
        assert!(!audio.toggle_mute());

        audio.play_background_loop();
        assert!(audio.is_looping());
        audio.stop_background_loop();
        assert!(!audio.is_looping());
    }

    #[test]
    fn test_silent_audio_can_start_muted() {
        let mut audio = SilentAudio::new(true);
        assert!(audio.is_muted());
        assert!(!audio.is_looping());
        assert!(!audio.toggle_mute());
    }
}
