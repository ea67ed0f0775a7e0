use std::collections::HashMap;
use std::path::Path;

use tokio::fs;

use crate::error::ConfigError;
use crate::models::{PromptSet, Stage};

/// 读取单个阶段的提示词文件
pub async fn load_prompt(prompts_dir: &Path, stage: Stage) -> Result<String, ConfigError> {
    let path = prompts_dir.join(stage.prompt_file());

    let content = fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::PromptMissing {
            stage,
            path: path.display().to_string(),
            source,
        })?;

    if content.trim().is_empty() {
        return Err(ConfigError::PromptEmpty {
            stage,
            path: path.display().to_string(),
        });
    }

    Ok(content)
}

/// 从目录中加载全部阶段的提示词
///
/// 任何一个文件缺失或为空都会返回错误，调用方应当中止启动
pub async fn load_prompt_set(prompts_dir: &Path) -> Result<PromptSet, ConfigError> {
    let mut loaded = HashMap::with_capacity(Stage::ALL.len());

    for stage in Stage::ALL {
        let prompt = load_prompt(prompts_dir, stage).await?;
        tracing::info!("已加载提示词: {} ({} 字符)", stage.prompt_file(), prompt.chars().count());
        loaded.insert(stage, prompt);
    }

    Ok(PromptSet::from_fn(|stage| {
        loaded.remove(&stage).unwrap_or_default()
    }))
}
