use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::state::AppState;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health -- 不依赖模型服务，始终返回 ok
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// 健康检查路由（挂在根路径下）
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
