//! 考试请求模型
//!
//! 所有请求都是一次性的值对象：从请求体构造，渲染时消费一次，之后丢弃

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 技术级别下限
pub const MIN_LEVEL: i64 = 1;
/// 技术级别上限
pub const MAX_LEVEL: i64 = 5;
/// 评分下限
pub const MIN_SCORING: i64 = 0;
/// 评分上限
pub const MAX_SCORING: i64 = 10;
/// 单次生成题目数量下限
pub const MIN_QUESTION_COUNT: i64 = 1;
/// 单次生成题目数量上限
pub const MAX_QUESTION_COUNT: i64 = 50;

/// 请求校验
///
/// 在调用模型之前执行，失败时返回被违反的约束
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 技术及其级别（1-5）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyLevel {
    pub technology: String,
    pub level: i64,
}

/// 生成题目请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeRequest {
    pub technologies: Vec<TechnologyLevel>,
    pub question_count: i64,
}

/// 有效作答判断请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianRequest {
    pub question: String,
    pub answer: String,
}

/// 评分请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub question: String,
    pub answer: String,
}

/// 讲解请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRequest {
    pub question: String,
    pub answer: String,
    pub scoring: i64,
    pub comment: String,
}

/// 汇总中的单道题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionData {
    pub question: String,
    pub comment: String,
    pub scoring: i64,
}

/// 汇总请求，题目顺序会原样保留到渲染结果中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub questions: Vec<QuestionData>,
}

fn check_range(field: impl Into<String>, value: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::out_of_range(field, value, min, max));
    }
    Ok(())
}

fn check_scoring(field: impl Into<String>, scoring: i64) -> Result<(), ValidationError> {
    check_range(field, scoring, MIN_SCORING, MAX_SCORING)
}

impl Validate for WelcomeRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.technologies.is_empty() {
            return Err(ValidationError::empty_list("technologies"));
        }

        for (i, tech) in self.technologies.iter().enumerate() {
            if tech.technology.trim().is_empty() {
                return Err(ValidationError::empty_field(format!(
                    "technologies[{}].technology",
                    i
                )));
            }
            check_range(
                format!("technologies[{}].level", i),
                tech.level,
                MIN_LEVEL,
                MAX_LEVEL,
            )?;
        }

        check_range(
            "question_count",
            self.question_count,
            MIN_QUESTION_COUNT,
            MAX_QUESTION_COUNT,
        )
    }
}

// 问题和回答的内容由模型判断，这里只要求字段存在
impl Validate for GuardianRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for CheckRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for LessonRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_scoring("scoring", self.scoring)
    }
}

impl Validate for SummaryRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        for (i, q) in self.questions.iter().enumerate() {
            check_scoring(format!("questions[{}].scoring", i), q.scoring)?;
        }
        Ok(())
    }
}
