use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("Task not found")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl Task {
    /// All tasks, newest first.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"SELECT id, title, completed, created_at, updated_at
               FROM tasks
               ORDER BY created_at DESC"#,
        )
        .fetch_all(pool)
        .await?;
        Ok(tasks)
    }

    /// Incomplete tasks, newest first. Input set for voice completion.
    pub async fn find_incomplete(pool: &SqlitePool) -> Result<Vec<Self>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"SELECT id, title, completed, created_at, updated_at
               FROM tasks
               WHERE completed = 0
               ORDER BY created_at DESC"#,
        )
        .fetch_all(pool)
        .await?;
        Ok(tasks)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, TaskError> {
        let task = sqlx::query_as::<_, Task>(
            r#"SELECT id, title, completed, created_at, updated_at
               FROM tasks
               WHERE id = ?1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(task)
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateTask,
        task_id: Uuid,
    ) -> Result<Self, TaskError> {
        let task = sqlx::query_as::<_, Task>(
            r#"INSERT INTO tasks (id, title)
               VALUES (?1, ?2)
               RETURNING id, title, completed, created_at, updated_at"#,
        )
        .bind(task_id)
        .bind(&data.title)
        .fetch_one(pool)
        .await?;
        Ok(task)
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        title: String,
        completed: bool,
    ) -> Result<Self, TaskError> {
        sqlx::query_as::<_, Task>(
            r#"UPDATE tasks
               SET title = ?2, completed = ?3, updated_at = datetime('now', 'subsec')
               WHERE id = ?1
               RETURNING id, title, completed, created_at, updated_at"#,
        )
        .bind(id)
        .bind(title)
        .bind(completed)
        .fetch_optional(pool)
        .await?
        .ok_or(TaskError::NotFound)
    }

    /// Flip the completion flag. Its own inverse.
    pub async fn toggle(pool: &SqlitePool, id: Uuid) -> Result<Self, TaskError> {
        sqlx::query_as::<_, Task>(
            r#"UPDATE tasks
               SET completed = NOT completed, updated_at = datetime('now', 'subsec')
               WHERE id = ?1
               RETURNING id, title, completed, created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(TaskError::NotFound)
    }

    pub async fn mark_completed(pool: &SqlitePool, id: Uuid) -> Result<Self, TaskError> {
        sqlx::query_as::<_, Task>(
            r#"UPDATE tasks
               SET completed = 1, updated_at = datetime('now', 'subsec')
               WHERE id = ?1
               RETURNING id, title, completed, created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(TaskError::NotFound)
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Remove every completed task; returns the number removed.
    pub async fn clear_completed(pool: &SqlitePool) -> Result<u64, TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE completed = 1")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_utils::setup_test_pool;

    async fn insert(pool: &SqlitePool, title: &str) -> Task {
        Task::create(
            pool,
            &CreateTask {
                title: title.to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .expect("insert failed")
    }

    #[tokio::test]
    async fn create_defaults_to_incomplete() {
        let pool = setup_test_pool().await;
        let task = insert(&pool, "buy milk").await;
        assert_eq!(task.title, "buy milk");
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn toggle_is_its_own_inverse() {
        let pool = setup_test_pool().await;
        let task = insert(&pool, "water plants").await;

        let toggled = Task::toggle(&pool, task.id).await.unwrap();
        assert!(toggled.completed);

        let restored = Task::toggle(&pool, task.id).await.unwrap();
        assert_eq!(restored.completed, task.completed);
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_not_found() {
        let pool = setup_test_pool().await;
        let err = Task::toggle(&pool, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound));
    }

    #[tokio::test]
    async fn clear_completed_removes_exactly_the_completed_and_is_idempotent() {
        let pool = setup_test_pool().await;
        let done = insert(&pool, "done task").await;
        let pending = insert(&pool, "pending task").await;
        Task::mark_completed(&pool, done.id).await.unwrap();

        let removed = Task::clear_completed(&pool).await.unwrap();
        assert_eq!(removed, 1);

        let remaining = Task::find_all(&pool).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, pending.id);

        // Second pass has nothing left to remove.
        let removed_again = Task::clear_completed(&pool).await.unwrap();
        assert_eq!(removed_again, 0);
    }

    #[tokio::test]
    async fn find_all_orders_newest_first() {
        let pool = setup_test_pool().await;
        let older = insert(&pool, "older").await;
        // Backdate so ordering doesn't depend on sub-second insert timing.
        sqlx::query("UPDATE tasks SET created_at = datetime('now', '-1 hour') WHERE id = ?1")
            .bind(older.id)
            .execute(&pool)
            .await
            .unwrap();
        let newer = insert(&pool, "newer").await;

        let all = Task::find_all(&pool).await.unwrap();
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);
    }

    #[tokio::test]
    async fn find_incomplete_excludes_completed() {
        let pool = setup_test_pool().await;
        let a = insert(&pool, "a").await;
        let b = insert(&pool, "b").await;
        Task::mark_completed(&pool, a.id).await.unwrap();

        let incomplete = Task::find_incomplete(&pool).await.unwrap();
        assert_eq!(incomplete.len(), 1);
        assert_eq!(incomplete[0].id, b.id);
    }
}
