//! State observers - where snapshots go after every mutation.
//!
//! The engine holds exactly one observer. To feed more than one consumer,
//! combine them with [`Tee`] and register the result.

use std::io::Write;

use drop_tetris_core::GameSnapshot;
use tokio::sync::mpsc::UnboundedSender;

pub trait StateObserver: Send {
    fn on_state_change(&mut self, snapshot: &GameSnapshot);
}

impl<F> StateObserver for F
where
    F: FnMut(&GameSnapshot) + Send,
{
    fn on_state_change(&mut self, snapshot: &GameSnapshot) {
        self(snapshot)
    }
}

/// Forward into a channel. A dropped receiver is ignored.
impl StateObserver for UnboundedSender<GameSnapshot> {
    fn on_state_change(&mut self, snapshot: &GameSnapshot) {
        let _ = self.send(*snapshot);
    }
}

/// Writes each snapshot as one line of JSON.
///
/// The first write failure is logged and disables the observer.
#[derive(Debug)]
pub struct JsonLinesObserver<W> {
    writer: W,
    written: u64,
    broken: bool,
}

impl<W: Write + Send> JsonLinesObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            broken: false,
        }
    }

    /// Lines successfully written
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, snapshot: &GameSnapshot) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write + Send> StateObserver for JsonLinesObserver<W> {
    fn on_state_change(&mut self, snapshot: &GameSnapshot) {
        if self.broken {
            return;
        }
        match self.write_line(snapshot) {
            Ok(()) => self.written += 1,
            Err(err) => {
                tracing::warn!(error = %err, "snapshot trace write failed; tracing disabled");
                self.broken = true;
            }
        }
    }
}

/// Fan one snapshot out to two observers, first then second
#[derive(Debug)]
pub struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A, B> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: StateObserver, B: StateObserver> StateObserver for Tee<A, B> {
    fn on_state_change(&mut self, snapshot: &GameSnapshot) {
        self.first.on_state_change(snapshot);
        self.second.on_state_change(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_lines_one_line_per_snapshot() {
        let mut observer = JsonLinesObserver::new(Vec::new());
        let snapshot = GameSnapshot::default();
        observer.on_state_change(&snapshot);
        observer.on_state_change(&snapshot);
        assert_eq!(observer.written(), 2);

        let out = String::from_utf8(observer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["phase"], "idle");
        assert_eq!(value["dropIntervalMs"], 800);
        assert_eq!(value["board"].as_array().unwrap().len(), 20);
    }

    #[test]
    fn test_json_lines_write_failure_is_swallowed() {
        let mut observer = JsonLinesObserver::new(FailingWriter);
        observer.on_state_change(&GameSnapshot::default());
        observer.on_state_change(&GameSnapshot::default());
        assert_eq!(observer.written(), 0);
        assert!(observer.broken);
    }

    #[tokio::test]
    async fn test_channel_observer_forwards_and_ignores_closed_receiver() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut observer = tx;
        let snapshot = GameSnapshot {
            score: 42,
            ..GameSnapshot::default()
        };
        observer.on_state_change(&snapshot);
        assert_eq!(rx.recv().await.unwrap().score, 42);

        drop(rx);
        observer.on_state_change(&snapshot);
    }

    #[test]
    fn test_tee_feeds_both_in_order() {
        let mut seen = Vec::new();
        {
            let mut tee = Tee::new(
                |s: &GameSnapshot| assert_eq!(s.score, 7),
                JsonLinesObserver::new(&mut seen),
            );
            tee.on_state_change(&GameSnapshot {
                score: 7,
                ..GameSnapshot::default()
            });
        }
        assert!(String::from_utf8(seen).unwrap().contains("\"score\":7"));
    }
}
