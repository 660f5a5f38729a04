//! Handler模块

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use common::errors::{AppError, AppResult};
use common::models::{AssistAnswer, DiagnosticReport, QuestionRequest};

use crate::service::{AssistService, DiagnosticsService};
use crate::state::AppState;

/// 根路径问候
#[utoipa::path(
    get,
    path = "/",
    tag = "greeting",
    responses(
        (status = 200, description = "问候语", body = Greeting)
    )
)]
pub async fn root_greeting() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello from FastAPI Backend!".to_string(),
    })
}

/// API 问候
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "greeting",
    responses(
        (status = 200, description = "问候语", body = Greeting)
    )
)]
pub async fn api_greeting() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello from the backend API!".to_string(),
    })
}

/// 数据库诊断端点，检查数据库是否可用
#[utoipa::path(
    get,
    path = "/test",
    tag = "diagnostics",
    responses(
        (status = 200, description = "诊断报告，失败也以描述文字返回", body = DiagnosticReport)
    )
)]
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticReport> {
    let report = DiagnosticsService::report(
        &state.database,
        state.config.database_url_set(),
        state.config.database_name_set(),
    )
    .await;

    Json(report)
}

/// 规则问答助手
#[utoipa::path(
    post,
    path = "/api/assist",
    tag = "assist",
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "固定回答", body = AssistAnswer),
        (status = 400, description = "请求体无法解析")
    )
)]
pub async fn assist(
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> AppResult<Json<AssistAnswer>> {
    let Json(req) = payload.map_err(|e| AppError::InvalidRequestBody(e.body_text()))?;

    Ok(Json(AssistAnswer {
        answer: AssistService::answer(&req.question).to_string(),
    }))
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "assist-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// 固定问候响应
#[derive(Serialize, ToSchema)]
pub struct Greeting {
    pub message: String,
}

/// 健康检查响应
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}
