//! 阶段输出约定
//!
//! 默认关闭。开启后检查模型回复中前端依赖的顶层字段是否存在且类型正确，
//! 其余字段原样透传。

use serde_json::Value as JsonValue;

use crate::error::ModelInvocationError;
use crate::models::Stage;
use crate::services::llm_service::JsonObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Array,
    Bool,
    Number,
    String,
}

impl FieldKind {
    fn matches(self, value: &JsonValue) -> bool {
        match self {
            FieldKind::Array => value.is_array(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Number => value.is_number(),
            FieldKind::String => value.is_string(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldKind::Array => "array",
            FieldKind::Bool => "boolean",
            FieldKind::Number => "number",
            FieldKind::String => "string",
        }
    }
}

fn required_fields(stage: Stage) -> &'static [(&'static str, FieldKind)] {
    match stage {
        Stage::Welcome => &[("questions", FieldKind::Array)],
        Stage::Guardian => &[("valid", FieldKind::Bool)],
        Stage::Check => &[("scoring", FieldKind::Number), ("comment", FieldKind::String)],
        Stage::Lesson => &[
            ("explanation", FieldKind::String),
            ("key_concepts", FieldKind::Array),
            ("example", FieldKind::String),
            ("summary", FieldKind::String),
        ],
        Stage::Summary => &[
            ("summary", FieldKind::String),
            ("average_score", FieldKind::Number),
            ("strengths", FieldKind::Array),
            ("improvements", FieldKind::Array),
            ("recommendations", FieldKind::Array),
        ],
    }
}

/// 检查模型回复是否满足阶段的输出约定
pub fn check_output(stage: Stage, output: &JsonObject) -> Result<(), ModelInvocationError> {
    for (field, kind) in required_fields(stage) {
        let reason = match output.get(*field) {
            None => format!("缺少字段 `{}`", field),
            Some(value) if !kind.matches(value) => {
                format!("字段 `{}` 应为 {}", field, kind.name())
            }
            Some(_) => continue,
        };
        return Err(ModelInvocationError::ContractViolation { stage, reason });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: JsonValue) -> JsonObject {
        match value {
            JsonValue::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_check_output_accepts_expected_shape() {
        let output = obj(json!({"scoring": 7, "comment": "Solid", "extra": [1]}));
        assert!(check_output(Stage::Check, &output).is_ok());

        let output = obj(json!({"valid": false, "explanation": "Off topic"}));
        assert!(check_output(Stage::Guardian, &output).is_ok());
    }

    #[test]
    fn test_check_output_reports_missing_field() {
        let output = obj(json!({"summary": "ok", "average_score": 6.5, "strengths": []}));
        let err = check_output(Stage::Summary, &output).unwrap_err();
        assert!(err.to_string().contains("improvements"));
    }

    #[test]
    fn test_check_output_reports_wrong_type() {
        let output = obj(json!({"questions": "none"}));
        match check_output(Stage::Welcome, &output) {
            Err(ModelInvocationError::ContractViolation { stage, reason }) => {
                assert_eq!(stage, Stage::Welcome);
                assert!(reason.contains("array"));
            }
            other => panic!("应当违反约定，实际: {:?}", other),
        }
    }
}
