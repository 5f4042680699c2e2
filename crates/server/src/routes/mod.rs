use axum::{
    Router,
    routing::{IntoMakeService, get},
};
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;

pub mod health;
pub mod status;
pub mod tasks;

pub fn router(deployment: AppState) -> IntoMakeService<Router> {
    let base_routes = Router::new()
        .route("/health", get(health::health_check))
        .merge(tasks::router(&deployment))
        .merge(status::router())
        .with_state(deployment);

    // Same permissive CORS posture as the original backend: single-user
    // tool, browser clients served from arbitrary origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", base_routes)
        .layer(cors)
        .into_make_service()
}
