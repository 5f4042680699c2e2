//! Connectivity status checks recorded by clients.

use axum::{Json, Router, extract::State, response::Json as ResponseJson, routing::get};
use db::models::status_check::{CreateStatusCheck, StatusCheck};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn get_status_checks(
    State(deployment): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<StatusCheck>>>, ApiError> {
    let checks = StatusCheck::find_all(&deployment.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(checks)))
}

pub async fn create_status_check(
    State(deployment): State<AppState>,
    Json(payload): Json<CreateStatusCheck>,
) -> Result<ResponseJson<ApiResponse<StatusCheck>>, ApiError> {
    let check = StatusCheck::create(&deployment.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(check)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(get_status_checks).post(create_status_check))
}
