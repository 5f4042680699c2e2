//! Utterance classification.
//!
//! Turns free-form text (spoken or typed) into a task command. The checks run
//! in fixed priority order and the first match wins, so a phrase like
//! "mark add task done" is a completion, not a creation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static ADD_PHRASES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)add task|new task|create task").expect("valid add-phrase regex"));

/// Classified meaning of an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Create a new task with this title.
    AddTask(String),
    /// Complete the task best matching this phrase. Carries the full
    /// utterance so the matcher can see every word the user said.
    CompleteTask(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("no task title in command")]
    EmptyCommand,
}

/// Classify an utterance.
///
/// Priority order: completion keywords, then add keywords, then the default
/// of treating the whole utterance as a new task title. The default is a
/// deliberate product choice carried over from the original client:
/// unrecognized phrasing becomes a task rather than an error.
pub fn interpret(utterance: &str) -> Result<Intent, IntentError> {
    let text = utterance.trim();
    if text.is_empty() {
        return Err(IntentError::EmptyCommand);
    }
    let lower = text.to_lowercase();

    if lower.contains("mark") && (lower.contains("complete") || lower.contains("done")) {
        return Ok(Intent::CompleteTask(text.to_string()));
    }

    if ADD_PHRASES.is_match(text) {
        let title = ADD_PHRASES.replace_all(text, "").trim().to_string();
        if title.is_empty() {
            return Err(IntentError::EmptyCommand);
        }
        return Ok(Intent::AddTask(title));
    }

    Ok(Intent::AddTask(text.to_string()))
}
