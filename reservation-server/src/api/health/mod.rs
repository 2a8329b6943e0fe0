//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 简单健康检查 |
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "store": "redb", "policy": "open", "uptime_seconds": 42 }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 状态 (ok)
    status: &'static str,
    version: &'static str,
    /// 存储后端 (redb | memory)
    store: &'static str,
    /// 准入策略
    policy: &'static str,
    uptime_seconds: u64,
}

/// GET /health
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.backend(),
        policy: state.admission.policy_name(),
        uptime_seconds: state.uptime_secs(),
    })
}
