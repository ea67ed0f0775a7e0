use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

use crate::api::{build_app_router, AppState};
use crate::config::Config;
use crate::models::load_prompt_set;
use crate::services::{LlmService, ModelInvoker};
use crate::utils::logging::{log_listening, log_shutdown, log_startup};
use crate::workflow::StageRouter;

/// 应用主结构
pub struct App {
    config: Config,
    router: Router,
}

impl App {
    /// 初始化应用
    ///
    /// 加载全部提示词并创建模型客户端，任何一步失败都中止启动
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let service = LlmService::new(&config);
        info!("模型客户端已创建，模型: {}", service.model_name());

        let invoker: Arc<dyn ModelInvoker> = Arc::new(service);
        Self::with_invoker(config, invoker).await
    }

    /// 使用指定的模型调用能力初始化应用
    pub async fn with_invoker(config: Config, invoker: Arc<dyn ModelInvoker>) -> Result<Self> {
        let prompts = load_prompt_set(&config.prompts_dir)
            .await
            .with_context(|| format!("无法加载提示词: {}", config.prompts_dir.display()))?;

        let stages = StageRouter::new(prompts, invoker).with_output_contracts(config.validate_output);
        let router = build_app_router(AppState::new(stages), &config)?;

        Ok(Self { config, router })
    }

    /// 已构建好的路由（测试中直接驱动）
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// 运行应用主逻辑：监听端口直到收到退出信号
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .with_context(|| format!("监听地址不合法: {}:{}", self.config.host, self.config.port))?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("无法绑定地址: {}", addr))?;
        log_listening(&addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务运行失败")?;

        log_shutdown();
        Ok(())
    }
}

/// 等待退出信号（Ctrl-C 或 SIGTERM）
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("无法监听 Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("收到 Ctrl-C，开始关闭"),
        () = terminate => info!("收到 SIGTERM，开始关闭"),
    }
}
