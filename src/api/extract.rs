use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::{AppError, ValidationError};

/// JSON 请求体提取器
///
/// 与 `axum::Json` 相同，但缺少字段、类型不符或非法 JSON 时返回
/// 带 `VALIDATION_ERROR` 的 400 响应，而不是框架默认的纯文本错误
pub struct ExamJson<T>(pub T);

impl<S, T> FromRequest<S> for ExamJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ValidationError::Malformed(rejection.body_text()).into()),
        }
    }
}
