use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use db::models::task::Task;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Load the task addressed by the `{task_id}` path segment and hand it to the
/// inner handler as an Extension; 404s before the handler runs otherwise.
pub async fn load_task_middleware(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let task = Task::find_by_id(&state.db().pool, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    request.extensions_mut().insert(task);
    Ok(next.run(request).await)
}
