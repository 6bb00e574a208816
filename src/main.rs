//! Terminal Tetris runner (default binary).
//!
//! Reads keys with crossterm, drives the engine, and redraws whenever the
//! engine publishes a new snapshot. The loop sleeps in `event::poll` until
//! either a key arrives or the drop timer is due.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

use drop_tetris::audio::BellAudio;
use drop_tetris::config::{Config, USAGE};
use drop_tetris::core::{GameSnapshot, ShapeSource, UniformShapes};
use drop_tetris::engine::{Engine, JsonLinesObserver, Tee};
use drop_tetris::input::{handle_key_event, should_quit};
use drop_tetris::logging;
use drop_tetris::term::{FrameBuffer, GameView, HudStatus, Presenter, Viewport};
use drop_tetris::types::Command;

/// Poll timeout while no drop timer is running (idle, paused, game over)
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = Config::load(&args)? else {
        print!("{}", USAGE);
        return Ok(());
    };
    logging::init(&config)?;

    let mut presenter = Presenter::stdout();
    presenter.enter()?;

    let result = run(&config, &mut presenter);

    // Always try to restore terminal state.
    let _ = presenter.leave();
    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting with error");
    }
    result
}

fn build_engine(config: &Config) -> Result<(Engine, mpsc::UnboundedReceiver<GameSnapshot>)> {
    let shapes: Box<dyn ShapeSource> = match config.seed {
        Some(seed) => Box::new(UniformShapes::seeded(seed)),
        None => Box::new(UniformShapes::from_entropy()),
    };
    let mut engine = Engine::new(shapes).with_audio(BellAudio::stdout(config.muted));

    let (tx, rx) = mpsc::unbounded_channel();
    match &config.trace_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create trace file {}", path.display()))?;
            engine.set_observer(Tee::new(tx, JsonLinesObserver::new(BufWriter::new(file))));
        }
        None => engine.set_observer(tx),
    }

    tracing::info!(seed = ?config.seed, muted = config.muted, "engine ready");
    Ok((engine, rx))
}

fn run<W: std::io::Write>(config: &Config, presenter: &mut Presenter<W>) -> Result<()> {
    let (mut engine, mut snapshots) = build_engine(config)?;

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = engine.snapshot();
    let mut dirty = true;

    loop {
        while let Ok(next) = snapshots.try_recv() {
            snapshot = next;
            dirty = true;
        }

        // Render.
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let hud = HudStatus {
                muted: engine.is_muted(),
            };
            view.render_into_with_hud(&snapshot, hud, Viewport::new(w, h), &mut fb);
            presenter.present(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until the next gravity step.
        let timeout = engine
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        engine.dispatch(command);
                        // Mute is not part of the snapshot; redraw the HUD.
                        if command == Command::ToggleMute {
                            dirty = true;
                        }
                    }
                }
                Event::Resize(..) => {
                    presenter.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        engine.pump();
    }
}
