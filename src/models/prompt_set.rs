use std::sync::Arc;

use super::Stage;

/// 各阶段的系统提示词
///
/// 启动时加载一次，之后只读共享，按阶段取用
#[derive(Debug, Clone)]
pub struct PromptSet {
    welcome: Arc<str>,
    guardian: Arc<str>,
    check: Arc<str>,
    lesson: Arc<str>,
    summary: Arc<str>,
}

impl PromptSet {
    /// 用给定函数为每个阶段生成提示词
    pub fn from_fn(mut f: impl FnMut(Stage) -> String) -> Self {
        Self {
            welcome: f(Stage::Welcome).into(),
            guardian: f(Stage::Guardian).into(),
            check: f(Stage::Check).into(),
            lesson: f(Stage::Lesson).into(),
            summary: f(Stage::Summary).into(),
        }
    }

    /// 获取阶段对应的系统提示词
    pub fn get(&self, stage: Stage) -> &str {
        match stage {
            Stage::Welcome => &self.welcome,
            Stage::Guardian => &self.guardian,
            Stage::Check => &self.check,
            Stage::Lesson => &self.lesson,
            Stage::Summary => &self.summary,
        }
    }
}
