//! Model-command suggester.
//!
//! Runs a user-configured external command with the file path appended,
//! expecting a JSON object {"suggested_filename": "..."} somewhere in its
//! stdout. Model front-ends tend to wrap their answer in prose, so the
//! output is scanned for the first object that parses and carries a real
//! (non-placeholder) filename.

use std::path::Path;
use std::process::Command;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::RenamerError;

use super::Suggester;

const PLACEHOLDER: &str = "<filename>";

#[derive(Debug, Clone)]
pub struct ModelSuggester {
    command: String,
    max_read_bytes: usize,
}

#[derive(Debug, Deserialize)]
struct ModelReply {
    suggested_filename: Option<String>,
}

impl ModelSuggester {
    pub fn new(command: &str, max_read_bytes: usize) -> Self {
        Self {
            command: command.to_string(),
            max_read_bytes,
        }
    }
}

impl Suggester for ModelSuggester {
    fn suggest(&self, file: &Path) -> Result<String, RenamerError> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| RenamerError::SuggesterUnavailable("empty model command".into()))?;

        let output = Command::new(program)
            .args(parts)
            .arg(file)
            .env("AI_RENAME_MAX_READ_BYTES", self.max_read_bytes.to_string())
            .output()
            .map_err(|e| {
                RenamerError::SuggesterUnavailable(format!("failed to run '{program}': {e}"))
            })?;

        if !output.status.success() {
            warn!(command = %self.command, status = ?output.status.code(), "model command exited non-zero");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match extract_suggestion(&stdout) {
            Some(name) => {
                debug!(file = %file.display(), name = %name, "model suggestion accepted");
                Ok(name)
            }
            None => Err(RenamerError::SuggesterUnavailable(format!(
                "no usable suggestion in output of '{}'",
                self.command
            ))),
        }
    }
}

/// Scan `response` for the first JSON object with a usable
/// `suggested_filename`. Objects that fail to parse, carry the placeholder,
/// or leave the field empty are skipped.
pub fn extract_suggestion(response: &str) -> Option<String> {
    for candidate in json_objects(response) {
        if let Ok(reply) = serde_json::from_str::<ModelReply>(candidate) {
            match reply.suggested_filename {
                Some(name) if !name.trim().is_empty() && name != PLACEHOLDER => {
                    return Some(name.trim().to_string());
                }
                _ => continue,
            }
        }
    }
    None
}

/// Yield non-nested `{...}` slices in order of appearance.
fn json_objects(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let open = rest.find('{')?;
        let close = rest[open..].find('}')? + open;
        let slice = &rest[open..=close];
        rest = &rest[close + 1..];
        Some(slice)
    })
}
