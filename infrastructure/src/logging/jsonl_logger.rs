//! JSONL transcript writer for debate events.
//!
//! Every [`ConversationEvent`] becomes one JSON line carrying its `type`,
//! a millisecond `timestamp` and a per-file `seq` number.

use mad_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct Sink {
    writer: BufWriter<File>,
    seq: u64,
    failed: bool,
}

/// Append-only JSONL transcript of a debate.
pub struct JsonlConversationLogger {
    sink: Mutex<Sink>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript file, creating parent directories.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            sink: Mutex::new(Sink {
                writer: BufWriter::new(file),
                seq: 0,
                failed: false,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent, seq: u64) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), json!(event.kind.as_str()));
        map.insert("timestamp".to_string(), json!(timestamp));
        map.insert("seq".to_string(), json!(seq));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        if sink.failed {
            return;
        }

        sink.seq += 1;
        let record = Self::record(event, sink.seq);
        if let Err(e) = write_line(&mut sink.writer, &record) {
            // Warn once; the rest of the transcript is dropped.
            warn!(
                "Conversation log {} stopped: {}",
                self.path.display(),
                e
            );
            sink.failed = true;
        }
    }
}

fn write_line(writer: &mut BufWriter<File>, record: &Value) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        let sink = self.sink.get_mut().unwrap_or_else(|e| e.into_inner());
        let _ = sink.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mad_application::ConversationEventKind;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.conversation.jsonl");
        let logger = JsonlConversationLogger::create(&path).unwrap();

        logger.log(ConversationEvent::new(
            ConversationEventKind::PromptSent,
            json!({"provider": "chatgpt", "element": "Security", "bytes": 120}),
        ));
        logger.log(ConversationEvent::new(
            ConversationEventKind::CycleVerdict,
            json!({"element": "Security", "is_cycle": false}),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "prompt_sent");
        assert_eq!(lines[0]["provider"], "chatgpt");
        assert_eq!(lines[0]["seq"], 1);
        assert_eq!(lines[1]["type"], "cycle_verdict");
        assert_eq!(lines[1]["is_cycle"], false);
        assert_eq!(lines[1]["seq"], 2);
        assert!(lines.iter().all(|l| l["timestamp"].is_string()));
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapped.jsonl");
        let logger = JsonlConversationLogger::create(&path).unwrap();

        logger.log(ConversationEvent::new(ConversationEventKind::DebateCompleted, json!("done")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "debate_completed");
        assert_eq!(lines[0]["data"], "done");
    }

    #[test]
    fn test_creates_parent_dirs_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join("t.jsonl");

        let first = JsonlConversationLogger::create(&path).unwrap();
        first.log(ConversationEvent::new(ConversationEventKind::DebateStarted, json!({})));
        drop(first);

        let second = JsonlConversationLogger::create(&path).unwrap();
        assert_eq!(second.path(), path.as_path());
        second.log(ConversationEvent::new(ConversationEventKind::DebateStarted, json!({})));
        drop(second);

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_create_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        assert!(JsonlConversationLogger::create(blocker.join("t.jsonl")).is_err());
    }
}
