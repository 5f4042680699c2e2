use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::{delete, get, post},
};
use db::models::task::{CreateTask, Task, UpdateTask};
use serde::{Deserialize, Serialize};
use services::services::voice::{VoiceCompleteOutcome, VoiceTaskService};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::load_task_middleware};

pub async fn get_tasks(
    State(deployment): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Task>>>, ApiError> {
    let tasks = Task::find_all(&deployment.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(tasks)))
}

pub async fn get_task(
    Extension(task): Extension<Task>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn create_task(
    State(deployment): State<AppState>,
    Json(payload): Json<CreateTask>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    let title = payload.title.trim().to_string();
    if title.is_empty() {
        return Err(ApiError::BadRequest(
            "Task title must not be empty".to_string(),
        ));
    }

    let id = Uuid::new_v4();
    tracing::debug!("Creating task '{}'", title);
    let task = Task::create(&deployment.db().pool, &CreateTask { title }, id).await?;

    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn update_task(
    Extension(existing_task): Extension<Task>,
    State(deployment): State<AppState>,
    Json(payload): Json<UpdateTask>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    // Use existing values if not provided in update
    let title = payload.title.unwrap_or(existing_task.title.clone());
    let completed = payload.completed.unwrap_or(existing_task.completed);

    if title.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Task title must not be empty".to_string(),
        ));
    }

    let task = Task::update(
        &deployment.db().pool,
        existing_task.id,
        title.trim().to_string(),
        completed,
    )
    .await?;

    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn toggle_task(
    State(deployment): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    let task = Task::toggle(&deployment.db().pool, task_id).await?;
    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn delete_task(
    Extension(task): Extension<Task>,
    State(deployment): State<AppState>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Task::delete(&deployment.db().pool, task.id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }
    Ok(ResponseJson(ApiResponse::success_with_message(
        (),
        "Task deleted successfully",
    )))
}

#[derive(Debug, Serialize)]
pub struct ClearCompletedResponse {
    pub removed_count: u64,
}

pub async fn clear_completed(
    State(deployment): State<AppState>,
) -> Result<ResponseJson<ApiResponse<ClearCompletedResponse>>, ApiError> {
    let removed = Task::clear_completed(&deployment.db().pool).await?;
    tracing::debug!("Cleared {} completed tasks", removed);
    Ok(ResponseJson(ApiResponse::success_with_message(
        ClearCompletedResponse {
            removed_count: removed,
        },
        format!("Cleared {removed} completed tasks"),
    )))
}

#[derive(Debug, Deserialize)]
pub struct VoiceCompleteRequest {
    pub spoken_text: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceCompleteResponse {
    pub matched_task_title: String,
}

/// Completion by spoken phrase. Business-level misses (nothing matched, or
/// nothing left to complete) come back as HTTP 200 with `success = false` so
/// the client can surface the message verbatim.
pub async fn voice_complete(
    State(deployment): State<AppState>,
    Json(payload): Json<VoiceCompleteRequest>,
) -> Result<ResponseJson<ApiResponse<VoiceCompleteResponse>>, ApiError> {
    let outcome =
        VoiceTaskService::complete_by_phrase(&deployment.db().pool, &payload.spoken_text).await?;

    let response = match outcome {
        VoiceCompleteOutcome::Completed { task } => ApiResponse::success_with_message(
            VoiceCompleteResponse {
                matched_task_title: task.title.clone(),
            },
            format!("Marked '{}' as completed", task.title),
        ),
        VoiceCompleteOutcome::NoIncompleteTasks => ApiResponse::error("No incomplete tasks found"),
        VoiceCompleteOutcome::NoMatch => {
            ApiResponse::error("Could not find a matching task to complete")
        }
    };
    Ok(ResponseJson(response))
}

pub fn router(deployment: &AppState) -> Router<AppState> {
    let task_id_router = Router::new()
        .route("/", get(get_task).put(update_task).delete(delete_task))
        .layer(from_fn_with_state(deployment.clone(), load_task_middleware));

    let inner = Router::new()
        .route("/", get(get_tasks).post(create_task))
        .route("/toggle/{task_id}", post(toggle_task))
        .route("/clear-completed", delete(clear_completed))
        .route("/voice-complete", post(voice_complete))
        .nest("/{task_id}", task_id_router);

    Router::new().nest("/tasks", inner)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use sqlx::{
        SqlitePool,
        sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    };
    use tower::util::ServiceExt;

    use super::*;

    async fn test_app() -> (Router, SqlitePool) {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("invalid sqlite config")
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("failed to open sqlite memory db");
        db::MIGRATOR.run(&pool).await.expect("migrations failed");

        let state = AppState::new(db::DBService::from_pool(pool.clone()));
        let app = Router::new().merge(router(&state)).with_state(state);
        (app, pool)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_and_list_tasks() {
        let (app, _pool) = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/tasks",
                serde_json::json!({"title": "buy milk"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["success"], true);
        assert_eq!(created["data"]["title"], "buy milk");
        assert_eq!(created["data"]["completed"], false);

        let response = app
            .oneshot(empty_request("GET", "/tasks"))
            .await
            .unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let (app, _pool) = test_app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/tasks",
                serde_json::json!({"title": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn toggle_flips_and_restores() {
        let (app, pool) = test_app().await;
        let task = Task::create(
            &pool,
            &CreateTask {
                title: "water plants".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        let response = app
            .clone()
            .oneshot(empty_request("POST", &format!("/tasks/toggle/{}", task.id)))
            .await
            .unwrap();
        let toggled = body_json(response).await;
        assert_eq!(toggled["data"]["completed"], true);

        let response = app
            .oneshot(empty_request("POST", &format!("/tasks/toggle/{}", task.id)))
            .await
            .unwrap();
        let restored = body_json(response).await;
        assert_eq!(restored["data"]["completed"], false);
    }

    #[tokio::test]
    async fn unknown_task_id_is_404() {
        let (app, _pool) = test_app().await;
        let missing = Uuid::new_v4();

        let response = app
            .clone()
            .oneshot(empty_request("POST", &format!("/tasks/toggle/{missing}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(empty_request("DELETE", &format!("/tasks/{missing}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn clear_completed_reports_removed_count() {
        let (app, pool) = test_app().await;
        for title in ["a", "b", "c"] {
            Task::create(
                &pool,
                &CreateTask {
                    title: title.to_string(),
                },
                Uuid::new_v4(),
            )
            .await
            .unwrap();
        }
        let all = Task::find_all(&pool).await.unwrap();
        Task::mark_completed(&pool, all[0].id).await.unwrap();
        Task::mark_completed(&pool, all[1].id).await.unwrap();

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", "/tasks/clear-completed"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["removed_count"], 2);

        let response = app
            .oneshot(empty_request("DELETE", "/tasks/clear-completed"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["removed_count"], 0);
    }

    #[tokio::test]
    async fn voice_complete_matches_and_reports_the_title() {
        let (app, pool) = test_app().await;
        Task::create(
            &pool,
            &CreateTask {
                title: "Buy groceries".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                "/tasks/voice-complete",
                serde_json::json!({"spoken_text": "mark groceries done"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["matched_task_title"], "Buy groceries");
    }

    #[tokio::test]
    async fn voice_complete_miss_is_200_with_success_false() {
        let (app, pool) = test_app().await;
        Task::create(
            &pool,
            &CreateTask {
                title: "Buy groceries".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                "/tasks/voice-complete",
                serde_json::json!({"spoken_text": "mark the quarterly filing done"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);

        let incomplete = Task::find_incomplete(&pool).await.unwrap();
        assert_eq!(incomplete.len(), 1);
    }

    #[tokio::test]
    async fn update_task_changes_title_and_completed() {
        let (app, pool) = test_app().await;
        let task = Task::create(
            &pool,
            &CreateTask {
                title: "old title".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/tasks/{}", task.id),
                serde_json::json!({"title": "new title", "completed": true}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["title"], "new title");
        assert_eq!(body["data"]["completed"], true);
    }
}
