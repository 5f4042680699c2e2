//! One-shot subcommand implementations.

use anyhow::Result;
use services::services::capture::{CaptureError, CaptureSession};
use uuid::Uuid;

use crate::{
    api::ApiClient, output::OutputHandler, recognizer::TypedRecognizer, session::CommandSession,
};

pub async fn list_tasks(api: &ApiClient, output: &OutputHandler) -> Result<()> {
    let tasks = api.list_tasks().await?;
    output.print_tasks(&tasks);
    Ok(())
}

pub async fn add_task(api: &ApiClient, output: &OutputHandler, title: &str) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        output.print_error("Please specify a task to add");
        return Ok(());
    }
    match api.create_task(title).await {
        Ok(task) => output.print_success(&format!("Added task: \"{}\"", task.title)),
        Err(e) => output.print_error(&format!("Error creating task: {e}")),
    }
    Ok(())
}

pub async fn toggle_task(api: &ApiClient, output: &OutputHandler, id: Uuid) -> Result<()> {
    let session = CommandSession::new();
    session.toggle(api, output, id).await
}

pub async fn delete_task(api: &ApiClient, output: &OutputHandler, id: Uuid) -> Result<()> {
    let session = CommandSession::new();
    session.delete(api, output, id).await
}

pub async fn clear_completed(api: &ApiClient, output: &OutputHandler) -> Result<()> {
    let session = CommandSession::new();
    session.clear_completed(api, output).await
}

/// Interpret an utterance exactly as if it had been spoken.
pub async fn say(api: &ApiClient, output: &OutputHandler, utterance: &str) -> Result<()> {
    let session = CommandSession::new();
    session.run_utterance(api, output, utterance).await
}

/// One single-shot capture through the typed-input recognition engine.
pub async fn listen(api: &ApiClient, output: &OutputHandler) -> Result<()> {
    let mut recognizer = TypedRecognizer::from_stdin()?;
    let mut capture = CaptureSession::new();
    match capture.run(&mut recognizer) {
        Ok(Some(utterance)) => {
            output.print_info(&format!("You said: \"{utterance}\""));
            let session = CommandSession::new();
            session.run_utterance(api, output, &utterance).await?;
        }
        Ok(None) => output.print_info("Nothing captured"),
        Err(CaptureError::Unavailable) => {
            output.print_error("Speech recognition is not available");
        }
        Err(e) => output.print_error(&e.to_string()),
    }
    Ok(())
}
