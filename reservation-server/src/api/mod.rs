//! API 路由模块
//!
//! - [`health`] - 健康检查
//! - [`tables`] - 桌台接口
//! - [`reservations`] - 预订接口

mod extract;
pub mod health;
pub mod reservations;
pub mod tables;

use axum::{Json, Router, middleware, response::IntoResponse};
use http::{HeaderName, StatusCode, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use extract::AppJson;
use crate::utils::ApiResponse;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());

    response
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::message_only("Resource not found")),
    )
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-amz-date"),
            header::AUTHORIZATION,
            HeaderName::from_static("x-api-key"),
            HeaderName::from_static("x-amz-security-token"),
        ])
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(reservations::router())
        .fallback(not_found)
}

/// Build the full service with state and tower layers
pub fn build_router(state: ServerState) -> Router {
    build_app()
        .with_state(state)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
}
