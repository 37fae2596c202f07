//! Event log observer: writes each [`TurnRecord`] as one JSON line.
//!
//! Output looks like:
//! ```json
//! {"year":1961,"turn":2,"event_id":"land_reform","option":1,"country":{...}}
//! ```

use super::{ObserverError, RunObserver, TurnRecord};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

pub struct EventLogObserver {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl EventLogObserver {
    /// Create observer writing to stdout.
    pub fn stdout() -> Self {
        Self::new(Box::new(BufWriter::new(std::io::stdout())))
    }

    /// Create observer writing to a file, truncating it.
    pub fn file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }

    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl RunObserver for EventLogObserver {
    fn on_turn(&self, record: &TurnRecord) -> Result<(), ObserverError> {
        let line = serde_json::to_string(record)?;
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{}", line)?;
        if record.game_over_reason.is_some() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "event_log"
    }

    fn on_shutdown(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writer.flush() {
            log::warn!("Failed to flush event log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameOverReason;
    use crate::testing::GameStateBuilder;
    use std::sync::Arc;

    /// Writer that shares its buffer so the test can read it back.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_one_json_line_per_turn() {
        let buf = SharedBuf::default();
        let observer = EventLogObserver::new(Box::new(buf.clone()));

        let state = GameStateBuilder::new().year(1961).turn(2).build();
        observer
            .on_turn(&TurnRecord::new(&state, Some("land_reform"), Some(1)))
            .unwrap();

        let mut over = GameStateBuilder::new().year(1962).turn(3).build();
        over.game_over = true;
        over.game_over_reason = Some(GameOverReason::Famine);
        observer.on_turn(&TurnRecord::new(&over, None, None)).unwrap();
        observer.on_shutdown();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event_id"], "land_reform");
        assert_eq!(first["option"], 1);
        assert_eq!(first["country"]["stability"], 50.0);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["game_over_reason"], "famine");
        assert!(second.get("event_id").is_none());
    }
}
