//! API client for the VoxTask backend
//!
//! Handles all HTTP communication with the task server.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API client for the VoxTask server
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// JSON envelope every endpoint responds with.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // ============ Tasks ============

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let resp = self
            .client
            .get(format!("{}/api/tasks", self.base_url))
            .send()
            .await
            .context("Failed to fetch tasks")?;

        if resp.status().is_success() {
            let envelope: ApiEnvelope<Vec<Task>> = resp
                .json()
                .await
                .context("Failed to parse tasks response")?;
            Ok(envelope.data.unwrap_or_default())
        } else {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Failed to fetch tasks: {} - {}", status, text)
        }
    }

    pub async fn create_task(&self, title: &str) -> Result<Task> {
        tracing::debug!("POST /api/tasks title='{title}'");
        let resp = self
            .client
            .post(format!("{}/api/tasks", self.base_url))
            .json(&CreateTaskRequest {
                title: title.to_string(),
            })
            .send()
            .await
            .context("Failed to reach the server")?;

        if resp.status().is_success() {
            let envelope: ApiEnvelope<Task> = resp.json().await?;
            envelope
                .data
                .context("Server returned no task in response")
        } else {
            let err_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Failed to create task: {}", err_text)
        }
    }

    pub async fn toggle_task(&self, task_id: Uuid) -> Result<Option<Task>> {
        let resp = self
            .client
            .post(format!("{}/api/tasks/toggle/{}", self.base_url, task_id))
            .send()
            .await?;

        if resp.status().is_success() {
            let envelope: ApiEnvelope<Task> = resp.json().await?;
            Ok(envelope.data)
        } else if resp.status().as_u16() == 404 {
            Ok(None)
        } else {
            anyhow::bail!("Failed to toggle task: {}", resp.status())
        }
    }

    pub async fn delete_task(&self, task_id: Uuid) -> Result<bool> {
        let resp = self
            .client
            .delete(format!("{}/api/tasks/{}", self.base_url, task_id))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(true)
        } else if resp.status().as_u16() == 404 {
            Ok(false)
        } else {
            anyhow::bail!("Failed to delete task: {}", resp.status())
        }
    }

    pub async fn clear_completed(&self) -> Result<u64> {
        let resp = self
            .client
            .delete(format!("{}/api/tasks/clear-completed", self.base_url))
            .send()
            .await?;

        if resp.status().is_success() {
            let envelope: ApiEnvelope<ClearCompletedData> = resp.json().await?;
            Ok(envelope.data.map(|d| d.removed_count).unwrap_or(0))
        } else {
            anyhow::bail!("Failed to clear completed tasks: {}", resp.status())
        }
    }

    /// Send a completion phrase to the server-side matcher. A miss is a
    /// successful HTTP exchange with `success = false` in the envelope.
    pub async fn voice_complete(&self, spoken_text: &str) -> Result<VoiceCompleteOutcome> {
        let resp = self
            .client
            .post(format!("{}/api/tasks/voice-complete", self.base_url))
            .json(&VoiceCompleteRequest {
                spoken_text: spoken_text.to_string(),
            })
            .send()
            .await
            .context("Failed to reach the server")?;

        if resp.status().is_success() {
            let envelope: ApiEnvelope<VoiceCompleteData> = resp.json().await?;
            Ok(VoiceCompleteOutcome {
                success: envelope.success,
                matched_task_title: envelope.data.map(|d| d.matched_task_title),
                message: envelope.message.unwrap_or_default(),
            })
        } else {
            anyhow::bail!("Voice completion failed: {}", resp.status())
        }
    }

    // ============ Status ============

    pub async fn post_status_check(&self, client_name: &str) -> Result<()> {
        self.client
            .post(format!("{}/api/status", self.base_url))
            .json(&CreateStatusCheckRequest {
                client_name: client_name.to_string(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    // ============ Health Check ============

    pub async fn health_check(&self) -> Result<bool> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await;

        match resp {
            Ok(r) => Ok(r.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

// ============ Data Types ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceCompleteRequest {
    pub spoken_text: String,
}

#[derive(Debug, Deserialize)]
pub struct VoiceCompleteData {
    pub matched_task_title: String,
}

#[derive(Debug, Deserialize)]
pub struct ClearCompletedData {
    pub removed_count: u64,
}

#[derive(Debug, Serialize)]
pub struct CreateStatusCheckRequest {
    pub client_name: String,
}

/// Client-side view of a voice completion exchange.
#[derive(Debug)]
pub struct VoiceCompleteOutcome {
    pub success: bool,
    pub matched_task_title: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tolerates_missing_data_and_message() {
        let envelope: ApiEnvelope<Task> =
            serde_json::from_str(r#"{"success": false, "message": "nope"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("nope"));
    }

    #[test]
    fn task_round_trips_through_the_wire_shape() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "title": "buy milk",
            "completed": false,
            "created_at": "2025-07-10T12:00:00Z",
            "updated_at": "2025-07-10T12:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.title, "buy milk");
        assert!(!task.completed);
    }
}
