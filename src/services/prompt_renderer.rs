//! 提示词渲染 - 业务能力层
//!
//! 把类型化的请求渲染成发送给模型的用户消息。
//! 渲染是纯函数：不做 I/O，对通过校验的请求总能得到确定的结果。

use crate::models::{
    CheckRequest, GuardianRequest, LessonRequest, QuestionData, Stage, SummaryRequest,
    TechnologyLevel, Validate, WelcomeRequest,
};

/// 汇总消息的标题，题目为空时不输出
pub const SUMMARY_HEADER: &str = "Questions and comments:";

/// 绑定到某个考试阶段的请求
pub trait StageRequest: Validate + Send + Sync {
    /// 请求所属阶段
    const STAGE: Stage;

    /// 渲染用户消息
    fn render(&self) -> String;
}

fn technology_line(tech: &TechnologyLevel) -> String {
    format!("- {} (level {})", tech.technology, tech.level)
}

fn question_answer(question: &str, answer: &str) -> String {
    format!("Question: {}\n\nUser answer: {}", question, answer)
}

fn summary_block(q: &QuestionData) -> String {
    format!(
        "Question: {}\nScoring: {}/10\nComment: {}",
        q.question, q.scoring, q.comment
    )
}

impl StageRequest for WelcomeRequest {
    const STAGE: Stage = Stage::Welcome;

    fn render(&self) -> String {
        let tech_list: Vec<String> = self.technologies.iter().map(technology_line).collect();
        format!(
            "Technologies and levels:\n{}\n\nNumber of questions to generate: {}",
            tech_list.join("\n"),
            self.question_count
        )
    }
}

impl StageRequest for GuardianRequest {
    const STAGE: Stage = Stage::Guardian;

    fn render(&self) -> String {
        question_answer(&self.question, &self.answer)
    }
}

impl StageRequest for CheckRequest {
    const STAGE: Stage = Stage::Check;

    fn render(&self) -> String {
        question_answer(&self.question, &self.answer)
    }
}

impl StageRequest for LessonRequest {
    const STAGE: Stage = Stage::Lesson;

    fn render(&self) -> String {
        format!(
            "{}\n\nScoring: {}/10\n\nComment: {}",
            question_answer(&self.question, &self.answer),
            self.scoring,
            self.comment
        )
    }
}

impl StageRequest for SummaryRequest {
    const STAGE: Stage = Stage::Summary;

    fn render(&self) -> String {
        if self.questions.is_empty() {
            return String::new();
        }

        let blocks: Vec<String> = self.questions.iter().map(summary_block).collect();
        format!("{}\n\n{}", SUMMARY_HEADER, blocks.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech(technology: &str, level: i64) -> TechnologyLevel {
        TechnologyLevel {
            technology: technology.to_string(),
            level,
        }
    }

    fn question(q: &str, scoring: i64, comment: &str) -> QuestionData {
        QuestionData {
            question: q.to_string(),
            comment: comment.to_string(),
            scoring,
        }
    }

    #[test]
    fn test_render_welcome() {
        let req = WelcomeRequest {
            technologies: vec![tech("Python", 2), tech("SQL", 1), tech("Docker", 3)],
            question_count: 4,
        };

        assert_eq!(
            req.render(),
            "Technologies and levels:\n\
             - Python (level 2)\n\
             - SQL (level 1)\n\
             - Docker (level 3)\n\
             \n\
             Number of questions to generate: 4"
        );
    }

    #[test]
    fn test_welcome_keeps_one_line_per_technology_in_order() {
        let names = ["Git and GitHub", "Pandas", "Machine Learning", "Pandas"];
        let req = WelcomeRequest {
            technologies: names.iter().map(|n| tech(n, 1)).collect(),
            question_count: 2,
        };

        let rendered = req.render();
        let lines: Vec<&str> = rendered.lines().filter(|l| l.starts_with("- ")).collect();
        let expected: Vec<String> = names.iter().map(|n| format!("- {} (level 1)", n)).collect();
        assert_eq!(lines, expected);
        assert!(rendered.ends_with("Number of questions to generate: 2"));
    }

    #[test]
    fn test_render_guardian_and_check_share_layout() {
        let guardian = GuardianRequest {
            question: "What is a pointer?".to_string(),
            answer: "A variable holding an address".to_string(),
        };
        let check = CheckRequest {
            question: guardian.question.clone(),
            answer: guardian.answer.clone(),
        };

        assert_eq!(
            guardian.render(),
            "Question: What is a pointer?\n\nUser answer: A variable holding an address"
        );
        assert_eq!(guardian.render(), check.render());
    }

    #[test]
    fn test_render_lesson() {
        let req = LessonRequest {
            question: "What does `git rebase` do?".to_string(),
            answer: "Merges branches".to_string(),
            scoring: 3,
            comment: "Confuses rebase with merge".to_string(),
        };

        assert_eq!(
            req.render(),
            "Question: What does `git rebase` do?\n\n\
             User answer: Merges branches\n\n\
             Scoring: 3/10\n\n\
             Comment: Confuses rebase with merge"
        );
    }

    #[test]
    fn test_render_summary_blocks_in_order() {
        let req = SummaryRequest {
            questions: vec![
                question("Q1", 8, "Good"),
                question("Q2", 0, "Missing"),
                question("Q3", 10, "Perfect"),
            ],
        };

        let rendered = req.render();
        let body = rendered
            .strip_prefix(&format!("{}\n\n", SUMMARY_HEADER))
            .unwrap();
        let blocks: Vec<&str> = body.split("\n\n").collect();

        assert_eq!(
            blocks,
            vec![
                "Question: Q1\nScoring: 8/10\nComment: Good",
                "Question: Q2\nScoring: 0/10\nComment: Missing",
                "Question: Q3\nScoring: 10/10\nComment: Perfect",
            ]
        );
    }

    #[test]
    fn test_render_empty_summary() {
        let req = SummaryRequest { questions: vec![] };
        assert_eq!(req.render(), "");
    }

    #[test]
    fn test_stage_binding() {
        assert_eq!(<WelcomeRequest as StageRequest>::STAGE, Stage::Welcome);
        assert_eq!(<CheckRequest as StageRequest>::STAGE, Stage::Check);
        assert_eq!(<SummaryRequest as StageRequest>::STAGE, Stage::Summary);
    }
}
