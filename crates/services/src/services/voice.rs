//! Voice-driven task completion.

use db::models::task::{Task, TaskError};
use sqlx::SqlitePool;

use super::matcher;

/// Result of resolving a spoken completion phrase against the store.
#[derive(Debug)]
pub enum VoiceCompleteOutcome {
    /// Exactly one task was marked complete.
    Completed { task: Task },
    /// Nothing to complete: every task is already done (or none exist).
    NoIncompleteTasks,
    /// No incomplete task cleared the similarity threshold; store untouched.
    NoMatch,
}

pub struct VoiceTaskService;

impl VoiceTaskService {
    pub async fn complete_by_phrase(
        pool: &SqlitePool,
        phrase: &str,
    ) -> Result<VoiceCompleteOutcome, TaskError> {
        let incomplete = Task::find_incomplete(pool).await?;
        if incomplete.is_empty() {
            return Ok(VoiceCompleteOutcome::NoIncompleteTasks);
        }

        let Some(matched) = matcher::best_match(phrase, &incomplete) else {
            tracing::debug!("No task matched phrase '{}'", phrase);
            return Ok(VoiceCompleteOutcome::NoMatch);
        };

        let task = Task::mark_completed(pool, matched.id).await?;
        tracing::info!("Voice command completed task '{}' ({})", task.title, task.id);
        Ok(VoiceCompleteOutcome::Completed { task })
    }
}
