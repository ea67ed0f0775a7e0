//! LLM 服务 - 业务能力层
//!
//! 只负责"调用模型并拿回 JSON 对象"的能力，不关心是哪个考试阶段
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务
//! - 请求 `json_object` 格式的回复，再在本地解析

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ModelInvocationError;

/// 模型返回的 JSON 对象
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// 外部模型调用能力
///
/// 阶段路由只依赖这个接口，测试时可以替换成不访问网络的实现
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// 用系统提示词和用户消息调用模型，返回解析后的 JSON 对象
    async fn invoke(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> Result<JsonObject, ModelInvocationError>;
}

/// 把模型回复解析为 JSON 对象
///
/// 非法 JSON 和非对象的 JSON（数组、字符串、数字等）都视为解析失败
pub fn parse_json_object(raw: &str) -> Result<JsonObject, ModelInvocationError> {
    let value: JsonValue = serde_json::from_str(raw.trim())
        .map_err(|source| ModelInvocationError::InvalidJson { source })?;

    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(ModelInvocationError::NotAnObject {
            kind: json_kind(&other),
        }),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// LLM 服务
///
/// 职责：
/// - 调用兼容 OpenAI 的聊天补全接口
/// - 每次调用只发一次请求，不重试、不缓存
/// - 不认识考试阶段和请求结构
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 当前使用的模型名称
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 发送一次聊天请求，要求模型以 JSON 对象格式回复
    ///
    /// # 参数
    /// - `system_message`: 系统消息
    /// - `user_message`: 用户消息内容
    ///
    /// # 返回
    /// 返回 LLM 的原始响应内容（去掉首尾空白）
    pub async fn send_to_llm(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> Result<String, ModelInvocationError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let request_failed = |e: async_openai::error::OpenAIError| {
            ModelInvocationError::request_failed(&self.model_name, e)
        };

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_message)
            .build()
            .map_err(request_failed)?;

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(request_failed)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(request_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            request_failed(e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ModelInvocationError::EmptyResponse {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl ModelInvoker for LlmService {
    async fn invoke(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> Result<JsonObject, ModelInvocationError> {
        let raw = self.send_to_llm(system_message, user_message).await?;
        parse_json_object(&raw).inspect_err(|e| {
            warn!("LLM 返回内容无法解析为 JSON 对象: {}", e);
        })
    }
}
