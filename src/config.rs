use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

/// 配置文件结构 (~/.config/nutritrack/config.toml)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// 解析完成的运行配置，api_key 必定非空
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub log_level: String,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("nutritrack").join("config.toml"))
}

/// 从 TOML 文件加载配置，文件不存在时使用默认值
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl ConfigFile {
    /// 合并命令行/环境变量提供的密钥并校验
    ///
    /// 优先级: `key_override` (--api-key 或 NUTRITRACK_API_KEY) > 配置文件。
    /// 没有内置的后备密钥，缺失即报错。
    pub fn resolve(self, key_override: Option<String>, path: &Path) -> Result<Config, ConfigError> {
        let api_key = key_override
            .or(self.api_key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(path.display().to_string()))?;

        let base_url = self.base_url.trim_end_matches('/').to_string();

        Ok(Config {
            api_key,
            base_url,
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            log_level: self.log_level,
        })
    }
}

/// 加载并解析配置
pub fn load_config(path: &Path, key_override: Option<String>) -> Result<Config, ConfigError> {
    load_config_file(path)?.resolve(key_override, path)
}
