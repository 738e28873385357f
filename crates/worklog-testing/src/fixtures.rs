//! Transcript fixture generation.
//!
//! Builds JSONL session files line by line so tests can express exactly
//! which records a transcript contains, including deliberately corrupt
//! lines.

use anyhow::Result;
use serde_json::json;
use std::path::Path;

/// Builder for one JSONL transcript file.
///
/// # Example
/// ```no_run
/// use worklog_testing::TranscriptFixture;
///
/// TranscriptFixture::new()
///     .user_message("2025-03-03T09:00:00Z", "/home/dev/api", "wire up the payment webhook")
///     .completed_todos("2025-03-03T09:45:00Z", &["add webhook route"])
///     .write_to("session-1.jsonl".as_ref())
///     .unwrap();
/// ```
#[derive(Default)]
pub struct TranscriptFixture {
    lines: Vec<String>,
}

impl TranscriptFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bare timestamped record (extends the session span, nothing else).
    pub fn record(mut self, timestamp: &str, cwd: &str) -> Self {
        self.lines.push(
            json!({
                "timestamp": timestamp,
                "cwd": cwd,
                "type": "assistant",
            })
            .to_string(),
        );
        self
    }

    /// A user-authored message record.
    pub fn user_message(mut self, timestamp: &str, cwd: &str, content: &str) -> Self {
        self.lines.push(
            json!({
                "timestamp": timestamp,
                "cwd": cwd,
                "type": "user",
                "message": { "content": content },
            })
            .to_string(),
        );
        self
    }

    /// A tool-result record carrying completed todo labels.
    pub fn completed_todos(mut self, timestamp: &str, todos: &[&str]) -> Self {
        let items: Vec<serde_json::Value> = todos
            .iter()
            .map(|content| json!({ "status": "completed", "content": content }))
            .collect();
        self.lines.push(
            json!({
                "timestamp": timestamp,
                "toolUseResult": { "newTodos": items },
            })
            .to_string(),
        );
        self
    }

    /// A record without a timestamp (must be ignored by extraction).
    pub fn untimestamped(mut self) -> Self {
        self.lines
            .push(json!({ "type": "user", "cwd": "/nowhere" }).to_string());
        self
    }

    /// A line that is not valid JSON (simulates a partial write).
    pub fn corrupt_line(mut self) -> Self {
        self.lines.push(r#"{"timestamp": "2025-03-"#.to_string());
        self
    }

    /// An arbitrary pre-rendered line.
    pub fn raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = self.lines.join("\n");
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }
}
