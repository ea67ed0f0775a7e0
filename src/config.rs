use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// 默认配置文件名（存在时才读取）
pub const DEFAULT_CONFIG_FILE: &str = "exam_gateway.toml";

/// 程序配置
///
/// 解析顺序：内置默认值 → TOML 配置文件 → 环境变量
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 允许跨域访问的前端来源
    pub cors_origins: Vec<String>,
    /// 提示词文件目录
    pub prompts_dir: PathBuf,
    /// 是否按阶段检查模型返回内容的结构
    pub validate_output: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            prompts_dir: PathBuf::from("prompts"),
            validate_output: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    /// 从配置文件和进程环境变量加载配置
    ///
    /// `CONFIG_FILE` 指定的文件必须存在；未指定时只在默认文件存在时读取
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };

        base.with_env(|name| std::env::var(name).ok())?.ensure_credentials()
    }

    /// 读取 TOML 配置文件，未出现的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    /// 用环境变量覆盖配置项
    ///
    /// `lookup` 按变量名返回取值，便于在测试中替换进程环境
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.port = parse_var("PORT", &v, "u16")?;
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            self.cors_origins = split_origins(&v);
        }
        if let Some(v) = lookup("PROMPTS_DIR") {
            self.prompts_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("VALIDATE_OUTPUT") {
            self.validate_output = parse_var("VALIDATE_OUTPUT", &v, "bool")?;
        }
        if let Some(v) = lookup("OPENAI_API_KEY") {
            self.llm_api_key = v;
        }
        if let Some(v) = lookup("LLM_API_BASE_URL") {
            self.llm_api_base_url = v;
        }
        if let Some(v) = lookup("LLM_MODEL_NAME") {
            self.llm_model_name = v;
        }
        Ok(self)
    }

    /// 模型服务的 API 密钥是启动必需项
    pub fn ensure_credentials(self) -> Result<Self, ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::EnvVarNotFound {
                var_name: "OPENAI_API_KEY".to_string(),
            });
        }
        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
