//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 已加载的配置（不会输出 API 密钥）
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 考试网关启动");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 模型: {} ({})", config.llm_model_name, config.llm_api_base_url);
    info!("📁 提示词目录: {}", config.prompts_dir.display());
    info!("🌐 允许的来源: {}", config.cors_origins.join(", "));
    info!(
        "📋 输出约定检查: {}",
        if config.validate_output { "开启" } else { "关闭" }
    );
    info!("{}", "=".repeat(60));
}

/// 记录服务开始监听
pub fn log_listening(addr: &std::net::SocketAddr) {
    info!("✓ 正在监听 http://{}", addr);
}

/// 记录服务停止
pub fn log_shutdown() {
    info!("\n{}", "─".repeat(60));
    info!(
        "服务已停止: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
