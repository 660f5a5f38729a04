//! 路由模块

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root_greeting))
        .route("/api/hello", get(handlers::api_greeting))
        .route("/test", get(handlers::test_database))
        .route("/api/assist", post(handlers::assist))
        .route("/api/health", get(handlers::health_check))
}
