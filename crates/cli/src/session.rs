//! Command session state
//!
//! Owns the single in-flight mutation lock as an explicit field instead of
//! ambient state. While one mutating request is outstanding,
//! new commands are suppressed rather than queued. After every successful
//! mutation the full snapshot is re-fetched; a failed request leaves the
//! last-known-good snapshot alone and is surfaced as a transient banner.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use services::services::intent::{self, Intent, IntentError};
use uuid::Uuid;

use crate::{api::ApiClient, output::OutputHandler};

#[derive(Default)]
pub struct CommandSession {
    in_flight: AtomicBool,
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl CommandSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlightGuard {
                flag: &self.in_flight,
            })
    }

    /// Classify an utterance and run the resulting command.
    pub async fn run_utterance(
        &self,
        api: &ApiClient,
        output: &OutputHandler,
        utterance: &str,
    ) -> Result<()> {
        let Some(_guard) = self.try_begin() else {
            output.print_warning("Still working on the previous command");
            return Ok(());
        };

        match intent::interpret(utterance) {
            Err(IntentError::EmptyCommand) => {
                output.print_error("Please specify a task to add");
            }
            Ok(Intent::AddTask(title)) => match api.create_task(&title).await {
                Ok(task) => {
                    output.print_success(&format!("Added task: \"{}\"", task.title));
                    refresh(api, output).await;
                }
                Err(e) => output.print_error(&format!("Error creating task: {e}")),
            },
            Ok(Intent::CompleteTask(phrase)) => match api.voice_complete(&phrase).await {
                Ok(outcome) if outcome.success => {
                    output.print_success(&outcome.message);
                    refresh(api, output).await;
                }
                Ok(outcome) => output.print_error(&outcome.message),
                Err(e) => output.print_error(&format!("Error completing task: {e}")),
            },
        }
        Ok(())
    }

    pub async fn toggle(&self, api: &ApiClient, output: &OutputHandler, id: Uuid) -> Result<()> {
        let Some(_guard) = self.try_begin() else {
            output.print_warning("Still working on the previous command");
            return Ok(());
        };

        match api.toggle_task(id).await {
            Ok(Some(task)) => {
                let state = if task.completed { "complete" } else { "incomplete" };
                output.print_success(&format!("Marked \"{}\" as {}", task.title, state));
                refresh(api, output).await;
            }
            Ok(None) => output.print_error("Task not found"),
            Err(e) => output.print_error(&format!("Error updating task: {e}")),
        }
        Ok(())
    }

    pub async fn delete(&self, api: &ApiClient, output: &OutputHandler, id: Uuid) -> Result<()> {
        let Some(_guard) = self.try_begin() else {
            output.print_warning("Still working on the previous command");
            return Ok(());
        };

        match api.delete_task(id).await {
            Ok(true) => {
                output.print_success("Task deleted");
                refresh(api, output).await;
            }
            Ok(false) => output.print_error("Task not found"),
            Err(e) => output.print_error(&format!("Error deleting task: {e}")),
        }
        Ok(())
    }

    pub async fn clear_completed(&self, api: &ApiClient, output: &OutputHandler) -> Result<()> {
        let Some(_guard) = self.try_begin() else {
            output.print_warning("Still working on the previous command");
            return Ok(());
        };

        match api.clear_completed().await {
            Ok(removed) => {
                output.print_success(&format!("Cleared {removed} completed tasks"));
                refresh(api, output).await;
            }
            Err(e) => output.print_error(&format!("Error clearing completed tasks: {e}")),
        }
        Ok(())
    }
}

/// Re-fetch and render the full snapshot. A failed refresh keeps whatever the
/// user last saw and says so.
async fn refresh(api: &ApiClient, output: &OutputHandler) {
    match api.list_tasks().await {
        Ok(tasks) => output.print_tasks(&tasks),
        Err(e) => output.print_error(&format!("Error loading tasks: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_command_is_suppressed_while_one_is_in_flight() {
        let session = CommandSession::new();
        let guard = session.try_begin().expect("first begin succeeds");
        assert!(session.is_busy());
        assert!(session.try_begin().is_none());

        drop(guard);
        assert!(!session.is_busy());
        assert!(session.try_begin().is_some());
    }
}
