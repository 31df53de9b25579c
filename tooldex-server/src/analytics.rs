//! File-based analytics sinks
//!
//! One append-only JSONL file per event kind, written through
//! non-blocking appenders so a slow disk never stalls a request.
//! Write failures are logged and swallowed: analytics endpoints always
//! acknowledge.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

use shared::request::{ChatEvent, SearchEvent};

/// Append-only analytics log (search + chat sinks)
#[derive(Clone)]
pub struct AnalyticsLog {
    search: NonBlocking,
    chat: NonBlocking,
    // Guards flush pending lines on drop of the last clone
    _guards: Arc<(WorkerGuard, WorkerGuard)>,
}

impl AnalyticsLog {
    pub fn new(dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let (search, search_guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "search.jsonl"));
        let (chat, chat_guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "chat.jsonl"));
        Ok(Self {
            search,
            chat,
            _guards: Arc::new((search_guard, chat_guard)),
        })
    }

    pub fn record_search(&self, event: &SearchEvent) {
        Self::append(self.search.clone(), event);
    }

    pub fn record_chat(&self, event: &ChatEvent) {
        Self::append(self.chat.clone(), event);
    }

    fn append<T: Serialize>(mut writer: NonBlocking, event: &T) {
        match serde_json::to_vec(event) {
            Ok(mut line) => {
                line.push(b'\n');
                if let Err(e) = writer.write_all(&line) {
                    tracing::warn!(error = %e, "Analytics write failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Analytics serialize failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_search_events_are_appended_as_jsonl() {
        let dir = TempDir::new().unwrap();
        let log = AnalyticsLog::new(dir.path()).unwrap();

        log.record_search(&SearchEvent {
            search_term: "chatgpt".into(),
            timestamp: "2024-05-01T12:00:00Z".into(),
            session_id: "s1".into(),
        });
        log.record_search(&SearchEvent {
            search_term: "imagens".into(),
            timestamp: "2024-05-01T12:00:05Z".into(),
            session_id: "s1".into(),
        });

        // Dropping the log flushes the background writer
        drop(log);

        let content = std::fs::read_to_string(dir.path().join("search.jsonl")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"searchTerm\":\"chatgpt\""));
        assert!(lines[1].contains("\"searchTerm\":\"imagens\""));
    }

    #[test]
    fn test_chat_events_go_to_their_own_file() {
        let dir = TempDir::new().unwrap();
        let log = AnalyticsLog::new(dir.path()).unwrap();

        log.record_chat(&ChatEvent {
            messages: vec![shared::request::IncomingMessage::new("user", "hi")],
            timestamp: "2024-05-01T12:00:00Z".into(),
            session_id: "s2".into(),
        });
        drop(log);

        let content = std::fs::read_to_string(dir.path().join("chat.jsonl")).unwrap();
        assert!(content.contains("\"sessionId\":\"s2\""));
        assert!(!dir.path().join("search.jsonl").exists() || {
            let s = std::fs::read_to_string(dir.path().join("search.jsonl")).unwrap();
            s.is_empty()
        });
    }
}
