use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StatusCheckError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Connectivity ping recorded by a client.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStatusCheck {
    pub client_name: String,
}

impl StatusCheck {
    pub async fn create(
        pool: &SqlitePool,
        data: &CreateStatusCheck,
        id: Uuid,
    ) -> Result<Self, StatusCheckError> {
        let check = sqlx::query_as::<_, StatusCheck>(
            r#"INSERT INTO status_checks (id, client_name)
               VALUES (?1, ?2)
               RETURNING id, client_name, timestamp"#,
        )
        .bind(id)
        .bind(&data.client_name)
        .fetch_one(pool)
        .await?;
        Ok(check)
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, StatusCheckError> {
        let checks = sqlx::query_as::<_, StatusCheck>(
            r#"SELECT id, client_name, timestamp
               FROM status_checks
               ORDER BY timestamp DESC"#,
        )
        .fetch_all(pool)
        .await?;
        Ok(checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_utils::setup_test_pool;

    #[tokio::test]
    async fn create_and_list_status_checks() {
        let pool = setup_test_pool().await;
        let created = StatusCheck::create(
            &pool,
            &CreateStatusCheck {
                client_name: "cli".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        assert_eq!(created.client_name, "cli");

        let all = StatusCheck::find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
    }
}
