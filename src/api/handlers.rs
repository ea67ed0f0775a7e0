//! 考试阶段的 HTTP 处理函数
//!
//! 每个处理函数只做提取和转发，校验、渲染和模型调用都在 [`StageRouter`] 中完成
//!
//! [`StageRouter`]: crate::workflow::StageRouter

use axum::extract::State;
use axum::Json;

use super::extract::ExamJson;
use super::state::AppState;
use crate::error::AppResult;
use crate::models::{CheckRequest, GuardianRequest, LessonRequest, SummaryRequest, WelcomeRequest};
use crate::services::JsonObject;

/// POST /api/exam/welcome
pub async fn welcome(
    State(state): State<AppState>,
    ExamJson(request): ExamJson<WelcomeRequest>,
) -> AppResult<Json<JsonObject>> {
    state.stages.welcome(&request).await.map(Json)
}

/// POST /api/exam/guardian
pub async fn guardian(
    State(state): State<AppState>,
    ExamJson(request): ExamJson<GuardianRequest>,
) -> AppResult<Json<JsonObject>> {
    state.stages.guardian(&request).await.map(Json)
}

/// POST /api/exam/check
pub async fn check(
    State(state): State<AppState>,
    ExamJson(request): ExamJson<CheckRequest>,
) -> AppResult<Json<JsonObject>> {
    state.stages.check(&request).await.map(Json)
}

/// POST /api/exam/lesson
pub async fn lesson(
    State(state): State<AppState>,
    ExamJson(request): ExamJson<LessonRequest>,
) -> AppResult<Json<JsonObject>> {
    state.stages.lesson(&request).await.map(Json)
}

/// POST /api/exam/summary
pub async fn summary(
    State(state): State<AppState>,
    ExamJson(request): ExamJson<SummaryRequest>,
) -> AppResult<Json<JsonObject>> {
    state.stages.summary(&request).await.map(Json)
}
