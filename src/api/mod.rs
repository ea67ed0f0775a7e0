//! HTTP 接口层
//!
//! 负责把考试阶段暴露为 HTTP 接口（axum）

pub mod extract;
pub mod handlers;
pub mod health;
pub mod router;
pub mod state;

pub use router::{build_app_router, build_cors_layer, exam_routes};
pub use state::AppState;
