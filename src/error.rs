use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::models::Stage;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 请求参数校验错误
    #[error("请求校验失败: {0}")]
    Validation(#[from] ValidationError),
    /// 模型调用错误
    #[error("模型调用失败: {0}")]
    Model(#[from] ModelInvocationError),
    /// 启动配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// 稳定的错误类别，写入响应体的 `code` 字段
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Model(_) => "MODEL_INVOCATION_ERROR",
            AppError::Config(_) => "STARTUP_CONFIGURATION_ERROR",
        }
    }

    /// 对应的 HTTP 状态码
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Model(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Validation(e) => tracing::debug!(error = %e, "请求被拒绝"),
            AppError::Model(e) => tracing::warn!(error = %e, "模型调用失败"),
            AppError::Config(e) => tracing::error!(error = %e, "配置错误"),
        }

        let body = json!({
            "error": self.to_string(),
            "code": self.code(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 请求校验错误
///
/// 在调用模型之前由阶段路由检测，始终指明被违反的约束
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必填字段为空
    #[error("字段 `{field}` 不能为空")]
    EmptyField { field: String },
    /// 列表为空
    #[error("列表 `{field}` 至少需要一个元素")]
    EmptyList { field: String },
    /// 数值超出范围
    #[error("字段 `{field}` 的值 {value} 超出范围 [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
    /// 请求体无法解析（缺少字段、类型不符、非法 JSON）
    #[error("请求体格式错误: {0}")]
    Malformed(String),
}

/// 模型调用错误
///
/// 传输、鉴权、限流失败，以及返回内容不是 JSON 对象，都归为这一类
#[derive(Debug, Error)]
pub enum ModelInvocationError {
    /// API 调用失败
    #[error("LLM API 调用失败 (模型: {model}): {message}")]
    RequestFailed { model: String, message: String },
    /// 返回内容为空
    #[error("LLM 返回内容为空 (模型: {model})")]
    EmptyResponse { model: String },
    /// 返回内容不是合法 JSON
    #[error("LLM 返回内容不是合法 JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
    /// 返回的 JSON 不是对象
    #[error("LLM 返回的 JSON 不是对象，而是 {kind}")]
    NotAnObject { kind: &'static str },
    /// 返回对象不符合阶段输出约定
    #[error("阶段 {stage} 的返回内容不符合约定: {reason}")]
    ContractViolation { stage: Stage, reason: String },
}

/// 配置错误
///
/// 全部发生在启动阶段，任何一个都会中止进程初始化
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 提示词文件缺失或不可读
    #[error("无法读取阶段 {stage} 的提示词文件 ({path}): {source}")]
    PromptMissing {
        stage: Stage,
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 提示词文件为空
    #[error("阶段 {stage} 的提示词文件为空: {path}")]
    PromptEmpty { stage: Stage, path: String },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// CORS 来源不合法
    #[error("CORS 来源不合法: '{origin}'")]
    InvalidOrigin { origin: String },
}

// ========== 便捷构造函数 ==========

impl ValidationError {
    /// 创建字段为空错误
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// 创建列表为空错误
    pub fn empty_list(field: impl Into<String>) -> Self {
        ValidationError::EmptyList {
            field: field.into(),
        }
    }

    /// 创建数值越界错误
    pub fn out_of_range(field: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }
}

impl ModelInvocationError {
    /// 创建LLM API调用错误
    pub fn request_failed(model: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ModelInvocationError::RequestFailed {
            model: model.into(),
            message: err.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = AppError::from(ValidationError::out_of_range("scoring", 11, 0, 10));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("scoring"));
        assert!(err.to_string().contains("[0, 10]"));
    }

    #[test]
    fn test_model_error_maps_to_server_error() {
        let err = AppError::from(ModelInvocationError::NotAnObject { kind: "array" });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "MODEL_INVOCATION_ERROR");
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_request_failed_keeps_cause() {
        let err = ModelInvocationError::request_failed("gpt-4o-mini", "401 Unauthorized");
        let text = err.to_string();
        assert!(text.contains("gpt-4o-mini"));
        assert!(text.contains("401 Unauthorized"));
    }
}
