//! 学生平台助手后端服务
//!
//! 提供以下端点：
//! - `/` 与 `/api/hello` 固定问候
//! - `/test` 数据库诊断探针
//! - `/api/assist` 规则问答助手
//! - `/api/health` 健康检查

mod handlers;
mod routes;
mod service;
mod state;

use axum::{middleware, routing::get, Json, Router};
use common::config::AppConfig;
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "assist-service";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "学生平台助手 API",
        version = "0.1.0",
        description = "问候、数据库诊断与规则问答后端"
    ),
    paths(
        handlers::root_greeting,
        handlers::api_greeting,
        handlers::test_database,
        handlers::assist,
        handlers::health_check,
    ),
    components(schemas(
        common::models::QuestionRequest,
        common::models::AssistAnswer,
        common::models::DiagnosticReport,
        handlers::Greeting,
        handlers::HealthResponse,
    )),
    tags(
        (name = "greeting", description = "问候端点"),
        (name = "diagnostics", description = "诊断端点"),
        (name = "assist", description = "问答助手端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything else
    load_dotenv();

    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置
    let config = AppConfig::from_env();

    // 创建应用状态（可选数据库句柄在此获取一次，失败不阻止启动）
    let state = AppState::new(config.clone()).await;

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = format!("{}:{}", config.host, config.port);
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    let listener = TcpListener::bind(&addr).await.expect("绑定地址失败");
    axum::serve(listener, app).await.expect("服务启动失败");
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Load .env file from the working directory (best-effort, no error if missing).
fn load_dotenv() {
    let env_path = std::path::Path::new(".env");
    if env_path.exists() {
        if let Ok(content) = std::fs::read_to_string(env_path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim();
                    // Only set if not already set by the environment
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::state::DatabaseHandle;

    fn test_state() -> AppState {
        AppState {
            config: AppConfig {
                host: "0.0.0.0".to_string(),
                port: 0,
                database_url: None,
                database_name: None,
            },
            database: DatabaseHandle::Absent,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_returns_exact_greeting() {
        let app = create_router(test_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"message":"Hello from FastAPI Backend!"}"#);
    }

    #[tokio::test]
    async fn test_api_hello_returns_exact_greeting() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/hello")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"message":"Hello from the backend API!"}"#);
    }

    #[tokio::test]
    async fn test_assist_answers_gpa_question() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/assist")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"question":"How do I calculate my CGPA?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["answer"].as_str().unwrap().contains("GPA tool"));
    }

    #[tokio::test]
    async fn test_assist_prompts_on_whitespace_question() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/assist")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"question":"  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["answer"]
            .as_str()
            .unwrap()
            .starts_with("Please type a question"));
    }

    #[tokio::test]
    async fn test_assist_rejects_malformed_body() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/assist")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INVALID_REQUEST_BODY");
    }

    #[tokio::test]
    async fn test_assist_rejects_missing_question_field() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/assist")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"context":"no question here"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_REQUEST_BODY");
    }

    #[tokio::test]
    async fn test_diagnostics_without_database() {
        let app = create_router(test_state());

        let response = app
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["backend"], "✅ Running");
        assert!(json["database"].as_str().unwrap().contains("module not found"));
        assert_eq!(json["database_url"], "❌ Not Set");
        assert_eq!(json["database_name"], "❌ Not Set");
        assert_eq!(json["connection_status"], "Not Connected");
        assert_eq!(json["collections"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_health_check_reports_healthy() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "assist-service");
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("x-request-id", "trace-me-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            "trace-me-123"
        );
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
