//! 应用路由构建
//!
//! 生产二进制和集成测试使用同一个 [`build_app_router`]，保证中间件栈一致

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::state::AppState;
use super::{handlers, health};
use crate::config::Config;
use crate::error::ConfigError;

/// 考试阶段路由，挂在 `/api/exam` 下
///
/// ```text
/// /welcome    POST  生成题目
/// /guardian   POST  有效作答判断
/// /check      POST  评分
/// /lesson     POST  补充讲解
/// /summary    POST  考试汇总
/// ```
pub fn exam_routes() -> Router<AppState> {
    Router::new()
        .route("/welcome", post(handlers::welcome))
        .route("/guardian", post(handlers::guardian))
        .route("/check", post(handlers::check))
        .route("/lesson", post(handlers::lesson))
        .route("/summary", post(handlers::summary))
}

/// 构建带完整中间件栈的应用路由
///
/// 中间件自下而上依次为：
///
/// 1. CORS
/// 2. 为请求设置 request id
/// 3. 请求/响应追踪
/// 4. 把 request id 写回响应
/// 5. panic 恢复（返回 500）
///
/// 不设置整体超时，模型调用耗时多久就等多久
pub fn build_app_router(state: AppState, config: &Config) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&config.cors_origins)?;
    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(health::router())
        .nest("/api/exam", exam_routes())
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    Ok(router)
}

/// 根据允许的来源列表构建 CORS 层
///
/// 任何一个来源不合法都会返回错误，启动随之中止。
/// 携带凭据时不允许通配来源，`*` 同样视为不合法
pub fn build_cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|o| {
            let invalid = || ConfigError::InvalidOrigin { origin: o.clone() };
            if o.trim() == "*" {
                return Err(invalid());
            }
            o.parse::<HeaderValue>().map_err(|_| invalid())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}
