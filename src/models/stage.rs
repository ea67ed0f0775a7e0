/// 考试阶段
///
/// 每个阶段对应一个固定的系统提示词和一种请求结构，阶段之间互不依赖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// 根据技术栈和级别生成题目
    Welcome,
    /// 判断用户回答是否是有效作答
    Guardian,
    /// 给回答打分并点评
    Check,
    /// 针对回答生成补充讲解
    Lesson,
    /// 汇总整场考试
    Summary,
}

impl Stage {
    /// 全部阶段，按考试流程顺序排列
    pub const ALL: [Stage; 5] = [
        Stage::Welcome,
        Stage::Guardian,
        Stage::Check,
        Stage::Lesson,
        Stage::Summary,
    ];

    /// 获取阶段标识（同时也是路由路径和提示词文件名）
    pub fn name(self) -> &'static str {
        match self {
            Stage::Welcome => "welcome",
            Stage::Guardian => "guardian",
            Stage::Check => "check",
            Stage::Lesson => "lesson",
            Stage::Summary => "summary",
        }
    }

    /// 提示词文件名
    pub fn prompt_file(self) -> String {
        format!("{}.md", self.name())
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
