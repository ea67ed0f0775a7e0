//! # Exam Gateway
//!
//! 把考试流程中的各个阶段转换成对外部大模型的模板化调用，并把模型返回的 JSON 交给前端
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 请求值对象、考试阶段标识、提示词资源
//! - `Stage` - 五个互相独立的考试阶段
//! - `PromptSet` - 启动时加载一次的系统提示词
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心是哪个阶段在调用
//! - `StageRequest` - 把请求渲染成用户消息
//! - `ModelInvoker` / `LlmService` - 调用模型并解析 JSON 对象
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个阶段"的完整处理流程
//! - `StageRouter` - 校验 → 渲染 → 调用模型 → 返回
//!
//! ### ④ 接口层（API）
//! - `api/` - axum 路由、请求提取和中间件
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, ModelInvocationError, ValidationError};
pub use models::{PromptSet, Stage};
pub use services::{JsonObject, LlmService, ModelInvoker};
pub use workflow::StageRouter;
