use crate::workflow::StageRouter;

/// Axum 处理函数共享的应用状态
///
/// 克隆开销很小（内部只有 `Arc`），请求之间没有可变共享数据
#[derive(Clone)]
pub struct AppState {
    /// 五个考试阶段的处理流程
    pub stages: StageRouter,
}

impl AppState {
    pub fn new(stages: StageRouter) -> Self {
        Self { stages }
    }
}
