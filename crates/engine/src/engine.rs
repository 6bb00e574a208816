//! Engine - the command surface around the rules machine.
//!
//! `Engine` is the only writer of the game state. It adds what the pure
//! rules leave out: the drop timer, the audio collaborator and the single
//! state observer. Every command runs to completion synchronously and, if
//! it changed observable state, publishes exactly one snapshot before
//! returning. Rejected commands publish nothing.

use std::time::{Duration, Instant};

use drop_tetris_core::{GameSnapshot, GameState, ShapeSource, UniformShapes};
use drop_tetris_types::{Command, GamePhase};
use tracing::{debug, info};

use crate::audio::{Audio, SilentAudio};
use crate::clock::{Clock, SystemClock};
use crate::observer::StateObserver;
use crate::timer::DropTimer;

pub struct Engine {
    state: GameState,
    timer: DropTimer,
    observer: Option<Box<dyn StateObserver>>,
    audio: Box<dyn Audio>,
    clock: Box<dyn Clock>,
}

impl Engine {
    /// Idle engine with silent audio and the system clock
    pub fn new(shapes: Box<dyn ShapeSource>) -> Self {
        Self {
            state: GameState::new(shapes),
            timer: DropTimer::default(),
            observer: None,
            audio: Box::new(SilentAudio::default()),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Box::new(UniformShapes::seeded(seed)))
    }

    pub fn with_audio(mut self, audio: impl Audio + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Register the state observer, replacing any previous one
    pub fn set_observer(&mut self, observer: impl StateObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    /// When gravity next moves the piece; `None` unless running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Replace the board contents and publish the result
    pub fn load_board(&mut self, board: drop_tetris_core::Board) {
        self.state.load_board(board);
        let snapshot = self.state.snapshot();
        self.publish(&snapshot);
    }

    /// Route a command to its handler
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveDown => self.move_down(),
            Command::HardDrop => self.hard_drop(),
            Command::Rotate => self.rotate(),
            Command::Hold => self.hold(),
            Command::Pause => self.pause(),
            Command::ToggleMute => {
                self.toggle_mute();
            }
            Command::Start => self.start(),
            Command::Stop => self.stop(),
        }
    }

    /// Begin a fresh game from any phase
    pub fn start(&mut self) {
        self.state.start();
        info!(next = ?self.state.next_piece(), "game started");

        self.audio.play_background_loop();
        self.restart_timer();
        self.settle(self.state.level());
    }

    pub fn stop(&mut self) {
        if !self.state.stop() {
            return;
        }
        info!(score = self.state.score(), "game stopped");
        self.halt();
        let snapshot = self.state.snapshot();
        self.publish(&snapshot);
    }

    /// Toggle between running and paused
    pub fn pause(&mut self) {
        if !self.state.toggle_pause() {
            return;
        }

        if self.state.paused() {
            self.timer.cancel();
            self.audio.stop_background_loop();
            info!("paused");
        } else {
            // Elapsed time before the pause is not carried over.
            self.restart_timer();
            self.audio.play_background_loop();
            info!("resumed");
        }
        let snapshot = self.state.snapshot();
        self.publish(&snapshot);
    }

    pub fn move_left(&mut self) {
        self.act(GameState::move_left);
    }

    pub fn move_right(&mut self) {
        self.act(GameState::move_right);
    }

    /// Move down one row, locking if blocked. Also the gravity step.
    pub fn move_down(&mut self) {
        self.act(GameState::move_down);
    }

    pub fn hard_drop(&mut self) {
        self.act(GameState::hard_drop);
    }

    pub fn rotate(&mut self) {
        self.act(GameState::rotate);
    }

    pub fn hold(&mut self) {
        self.act(GameState::hold);
    }

    /// Flip audio mute; game state is untouched and nothing is published.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.audio.toggle_mute();
        info!(muted, "mute toggled");
        muted
    }

    /// Run the gravity step if the drop timer is due.
    ///
    /// Returns whether a tick fired.
    pub fn pump(&mut self) -> bool {
        let now = self.clock.now();
        if !self.timer.poll(now) {
            return false;
        }
        self.move_down();
        true
    }

    fn current_interval(&self) -> Duration {
        Duration::from_millis(self.state.drop_interval_ms() as u64)
    }

    fn restart_timer(&mut self) {
        let now = self.clock.now();
        let interval = self.current_interval();
        self.timer.schedule(now, interval);
    }

    fn act(&mut self, command: impl FnOnce(&mut GameState) -> bool) {
        let level_before = self.state.level();
        if command(&mut self.state) {
            self.settle(level_before);
        }
    }

    /// Follow up on a state change: lock side effects, then publish.
    fn settle(&mut self, level_before: u32) {
        let snapshot = self.state.snapshot();

        if let Some(event) = self.state.take_last_event() {
            self.audio.play_placement_sound();
            debug!(
                lines = event.lines_cleared,
                score_delta = event.score_delta,
                combo = event.combo,
                score = self.state.score(),
                "piece locked"
            );
            if event.lines_cleared > 0 {
                self.audio.play_line_clear_sound();
            }
        }

        if self.state.level() != level_before {
            info!(
                level = self.state.level(),
                interval_ms = self.state.drop_interval_ms(),
                "level up"
            );
            let interval = self.current_interval();
            self.timer.set_interval(interval);
        }

        if self.state.game_over() {
            info!(
                cause = ?self.state.game_over_cause(),
                score = self.state.score(),
                lines = self.state.lines(),
                "game over"
            );
            self.halt();
        }

        self.publish(&snapshot);
    }

    fn halt(&mut self) {
        self.timer.cancel();
        self.audio.stop_background_loop();
    }

    fn publish(&mut self, snapshot: &GameSnapshot) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_state_change(snapshot);
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("timer", &self.timer)
            .field("has_observer", &self.observer.is_some())
            .field("muted", &self.audio.is_muted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use drop_tetris_core::{Board, ShapeCycle};
    use drop_tetris_types::GameOverCause;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingAudio {
        calls: Arc<Mutex<Vec<&'static str>>>,
        muted: bool,
    }

    impl RecordingAudio {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl Audio for RecordingAudio {
        fn play_placement_sound(&mut self) {
            self.record("placement");
        }
        fn play_line_clear_sound(&mut self) {
            self.record("line_clear");
        }
        fn play_background_loop(&mut self) {
            self.record("loop_start");
        }
        fn stop_background_loop(&mut self) {
            self.record("loop_stop");
        }
        fn toggle_mute(&mut self) -> bool {
            self.muted = !self.muted;
            self.muted
        }
        fn is_muted(&self) -> bool {
            self.muted
        }
    }

    struct Harness {
        engine: Engine,
        clock: ManualClock,
        audio: RecordingAudio,
        published: Arc<Mutex<Vec<GameSnapshot>>>,
    }

    impl Harness {
        fn new(script: &str) -> Self {
            let clock = ManualClock::new();
            let audio = RecordingAudio::default();
            let published = Arc::new(Mutex::new(Vec::new()));

            let mut engine = Engine::new(Box::new(ShapeCycle::parse(script).unwrap()))
                .with_clock(clock.clone())
                .with_audio(audio.clone());
            let sink = published.clone();
            engine.set_observer(move |s: &GameSnapshot| sink.lock().unwrap().push(*s));

            Self {
                engine,
                clock,
                audio,
                published,
            }
        }

        fn published(&self) -> usize {
            self.published.lock().unwrap().len()
        }

        fn last(&self) -> GameSnapshot {
            *self.published.lock().unwrap().last().unwrap()
        }
    }

    #[test]
    fn test_start_publishes_and_schedules() {
        let mut h = Harness::new("T");
        assert!(h.engine.next_deadline().is_none());

        h.engine.start();
        assert_eq!(h.published(), 1);
        assert_eq!(h.last().phase, GamePhase::Running);
        assert!(h.last().playable());
        assert!(h.engine.next_deadline().is_some());
        assert_eq!(h.audio.calls(), vec!["loop_start"]);
    }

    #[test]
    fn test_rejected_command_publishes_nothing() {
        let mut h = Harness::new("O");
        h.engine.start();
        for _ in 0..4 {
            h.engine.move_left();
        }
        let count = h.published();
        h.engine.move_left();
        assert_eq!(h.published(), count);
    }

    #[test]
    fn test_one_notification_per_command_in_order() {
        let mut h = Harness::new("T");
        h.engine.start();
        h.engine.move_left();
        h.engine.move_right();
        h.engine.rotate();

        let published = h.published.lock().unwrap();
        assert_eq!(published.len(), 4);
        let xs: Vec<i8> = published.iter().map(|s| s.active.unwrap().x).collect();
        assert_eq!(xs, vec![3, 2, 3, 3]);
        assert_eq!(published[3].active.unwrap().rotation, 1);
    }

    #[test]
    fn test_pump_moves_down_on_deadline() {
        let mut h = Harness::new("T");
        h.engine.start();

        h.clock.advance_ms(799);
        assert!(!h.engine.pump());
        h.clock.advance_ms(1);
        assert!(h.engine.pump());
        assert_eq!(h.last().active.unwrap().y, 0);
    }

    #[test]
    fn test_pause_discards_elapsed_time() {
        let mut h = Harness::new("T");
        h.engine.start();

        h.clock.advance_ms(700);
        h.engine.pause();
        assert!(h.engine.next_deadline().is_none());

        h.clock.advance_ms(5_000);
        assert!(!h.engine.pump());

        h.engine.pause();
        h.clock.advance_ms(700);
        assert!(!h.engine.pump());
        h.clock.advance_ms(100);
        assert!(h.engine.pump());
        assert_eq!(
            h.audio.calls(),
            vec!["loop_start", "loop_stop", "loop_start"]
        );
    }

    #[test]
    fn test_commands_ignored_while_paused() {
        let mut h = Harness::new("T");
        h.engine.start();
        h.engine.pause();
        assert!(h.engine.state().paused());
        assert!(!h.last().playable());
        let count = h.published();

        h.engine.move_left();
        h.engine.hard_drop();
        h.engine.hold();
        assert_eq!(h.published(), count);
    }

    #[test]
    fn test_lock_plays_placement_and_line_clear() {
        let mut h = Harness::new("I");
        h.engine.start();
        h.engine.load_board(Board::from_rows(&["....######"]));

        // Park the first I on the right so the left gap stays open.
        for _ in 0..3 {
            h.engine.move_right();
        }
        h.engine.hard_drop();
        assert_eq!(h.audio.calls(), vec!["loop_start", "placement"]);

        for _ in 0..3 {
            h.engine.move_left();
        }
        h.engine.hard_drop();
        let last = h.last();
        assert_eq!(last.last_event.unwrap().lines_cleared, 1);
        assert_eq!(
            h.audio.calls(),
            vec!["loop_start", "placement", "placement", "line_clear"]
        );
    }

    #[test]
    fn test_game_over_stops_timer_and_loop() {
        let mut h = Harness::new("O");
        h.engine.start();
        while h.engine.phase() != GamePhase::Over {
            h.engine.hard_drop();
        }
        assert_eq!(h.last().game_over_cause, Some(GameOverCause::BoardOverflow));
        assert!(h.last().game_over);
        assert!(h.engine.next_deadline().is_none());
        assert_eq!(h.audio.calls().last(), Some(&"loop_stop"));

        let count = h.published();
        h.engine.move_left();
        h.engine.pause();
        assert_eq!(h.published(), count);
    }

    #[test]
    fn test_stop_and_restart() {
        let mut h = Harness::new("T");
        h.engine.stop();
        assert_eq!(h.published(), 0);

        h.engine.start();
        h.engine.stop();
        assert_eq!(h.last().game_over_cause, Some(GameOverCause::Stopped));
        assert!(h.engine.next_deadline().is_none());

        h.engine.dispatch(Command::Start);
        assert_eq!(h.last().phase, GamePhase::Running);
        assert!(h.engine.next_deadline().is_some());
    }

    #[test]
    fn test_toggle_mute_is_state_independent() {
        let mut h = Harness::new("T");
        assert!(h.engine.toggle_mute());
        assert!(h.engine.is_muted());
        assert_eq!(h.published(), 0);
        assert_eq!(h.engine.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_replacing_observer_drops_previous() {
        let mut h = Harness::new("T");
        let second = Arc::new(Mutex::new(0usize));
        let counter = second.clone();

        h.engine.start();
        h.engine
            .set_observer(move |_: &GameSnapshot| *counter.lock().unwrap() += 1);
        h.engine.move_left();

        assert_eq!(h.published(), 1);
        assert_eq!(*second.lock().unwrap(), 1);

        h.engine.clear_observer();
        h.engine.move_right();
        assert_eq!(*second.lock().unwrap(), 1);
        assert_eq!(h.engine.state().active().map(|p| p.x), Some(3));
    }
}
