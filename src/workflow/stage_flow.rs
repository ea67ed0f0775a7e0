//! 考试阶段流程 - 流程层
//!
//! 核心职责：定义"一个阶段"的完整处理流程
//!
//! 流程顺序：
//! 1. 校验请求
//! 2. 渲染用户消息
//! 3. 调用模型（携带该阶段的系统提示词）
//! 4. （可选）检查输出约定
//! 5. 原样返回模型的 JSON 对象

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::models::{
    CheckRequest, GuardianRequest, LessonRequest, PromptSet, SummaryRequest, WelcomeRequest,
};
use crate::services::{check_output, JsonObject, ModelInvoker, StageRequest};
use crate::utils::logging::truncate_text;

/// 阶段路由
///
/// - 每个阶段是独立的操作，不保存任何跨请求状态
/// - 只持有只读的提示词和模型调用能力，可以被并发请求共享
/// - 校验失败时不会调用模型
#[derive(Clone)]
pub struct StageRouter {
    prompts: PromptSet,
    invoker: Arc<dyn ModelInvoker>,
    validate_output: bool,
}

impl StageRouter {
    /// 创建新的阶段路由
    pub fn new(prompts: PromptSet, invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            prompts,
            invoker,
            validate_output: false,
        }
    }

    /// 开启或关闭输出约定检查
    pub fn with_output_contracts(mut self, enabled: bool) -> Self {
        self.validate_output = enabled;
        self
    }

    /// 执行一个阶段
    pub async fn run<R: StageRequest>(&self, request: &R) -> AppResult<JsonObject> {
        let stage = R::STAGE;

        request.validate()?;

        let user_message = request.render();
        debug!(
            "[阶段 {}] 用户消息 ({} 字符): {}",
            stage,
            user_message.chars().count(),
            truncate_text(&user_message, 120)
        );

        let output = self
            .invoker
            .invoke(self.prompts.get(stage), &user_message)
            .await
            .inspect_err(|e| warn!("[阶段 {}] ⚠️ 模型调用失败: {}", stage, e))?;

        if self.validate_output {
            check_output(stage, &output)?;
        }

        info!("[阶段 {}] ✓ 模型返回 {} 个字段", stage, output.len());

        Ok(output)
    }

    /// 根据技术栈生成题目
    pub async fn welcome(&self, request: &WelcomeRequest) -> AppResult<JsonObject> {
        self.run(request).await
    }

    /// 判断回答是否是有效作答
    pub async fn guardian(&self, request: &GuardianRequest) -> AppResult<JsonObject> {
        self.run(request).await
    }

    /// 给回答打分
    pub async fn check(&self, request: &CheckRequest) -> AppResult<JsonObject> {
        self.run(request).await
    }

    /// 生成补充讲解
    pub async fn lesson(&self, request: &LessonRequest) -> AppResult<JsonObject> {
        self.run(request).await
    }

    /// 汇总整场考试
    pub async fn summary(&self, request: &SummaryRequest) -> AppResult<JsonObject> {
        self.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ModelInvocationError, ValidationError};
    use crate::models::{QuestionData, Stage, TechnologyLevel};
    use crate::services::parse_json_object;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录每次调用并返回固定文本的模型
    struct RecordingInvoker {
        reply: String,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl RecordingInvoker {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelInvoker for RecordingInvoker {
        async fn invoke(
            &self,
            system_message: &str,
            user_message: &str,
        ) -> Result<JsonObject, ModelInvocationError> {
            self.calls
                .lock()
                .unwrap()
                .push((system_message.to_string(), user_message.to_string()));
            parse_json_object(&self.reply)
        }
    }

    fn router(invoker: Arc<RecordingInvoker>) -> StageRouter {
        let prompts = PromptSet::from_fn(|stage| format!("SYSTEM:{}", stage));
        StageRouter::new(prompts, invoker)
    }

    #[tokio::test]
    async fn test_check_passes_model_output_through() {
        let invoker = RecordingInvoker::new(r#"{"correct": true, "feedback": "Good"}"#);
        let router = router(invoker.clone());

        let output = router
            .check(&CheckRequest {
                question: "What is a pointer?".to_string(),
                answer: "A variable holding an address".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.get("feedback").and_then(|v| v.as_str()), Some("Good"));

        let calls = invoker.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "SYSTEM:check");
        assert_eq!(
            calls[0].1,
            "Question: What is a pointer?\n\nUser answer: A variable holding an address"
        );
    }

    #[tokio::test]
    async fn test_each_stage_uses_its_own_prompt() {
        let invoker = RecordingInvoker::new("{}");
        let router = router(invoker.clone());

        router
            .welcome(&WelcomeRequest {
                technologies: vec![TechnologyLevel {
                    technology: "Python".to_string(),
                    level: 1,
                }],
                question_count: 1,
            })
            .await
            .unwrap();
        router
            .guardian(&GuardianRequest {
                question: "q".to_string(),
                answer: "a".to_string(),
            })
            .await
            .unwrap();
        router
            .lesson(&LessonRequest {
                question: "q".to_string(),
                answer: "a".to_string(),
                scoring: 4,
                comment: "c".to_string(),
            })
            .await
            .unwrap();
        router
            .summary(&SummaryRequest { questions: vec![] })
            .await
            .unwrap();

        let systems: Vec<String> = invoker.calls().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            systems,
            vec!["SYSTEM:welcome", "SYSTEM:guardian", "SYSTEM:lesson", "SYSTEM:summary"]
        );
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_model() {
        let invoker = RecordingInvoker::new("{}");
        let router = router(invoker.clone());

        for scoring in [-1, 11] {
            let err = router
                .lesson(&LessonRequest {
                    question: "q".to_string(),
                    answer: "a".to_string(),
                    scoring,
                    comment: "c".to_string(),
                })
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                AppError::Validation(ValidationError::OutOfRange { .. })
            ));
        }

        assert!(invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_summary_still_calls_model_once() {
        let invoker = RecordingInvoker::new(r#"{"summary": "nothing answered"}"#);
        let router = router(invoker.clone());

        router
            .summary(&SummaryRequest { questions: vec![] })
            .await
            .unwrap();

        let calls = invoker.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "");
    }

    #[tokio::test]
    async fn test_model_failure_is_surfaced() {
        let invoker = RecordingInvoker::new("[1, 2]");
        let router = router(invoker);

        let err = router
            .guardian(&GuardianRequest {
                question: "q".to_string(),
                answer: "a".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Model(ModelInvocationError::NotAnObject { kind: "array" })
        ));
    }

    #[tokio::test]
    async fn test_output_contracts_are_opt_in() {
        let summary = SummaryRequest {
            questions: vec![QuestionData {
                question: "q".to_string(),
                comment: "c".to_string(),
                scoring: 5,
            }],
        };

        let lenient = router(RecordingInvoker::new(r#"{"anything": 1}"#));
        assert!(lenient.summary(&summary).await.is_ok());

        let strict = router(RecordingInvoker::new(r#"{"anything": 1}"#)).with_output_contracts(true);
        let err = strict.summary(&summary).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Model(ModelInvocationError::ContractViolation {
                stage: Stage::Summary,
                ..
            })
        ));
    }
}
