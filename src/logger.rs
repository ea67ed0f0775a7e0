use tracing_subscriber::EnvFilter;

/// 默认日志级别，可以通过 `RUST_LOG` 覆盖
pub const DEFAULT_FILTER: &str = "exam_gateway=info,tower_http=info";

/// 初始化日志
///
/// 可以重复调用，已经初始化时直接返回
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
