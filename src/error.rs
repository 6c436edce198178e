//! 错误类型
//!
//! 单次查询失败在聚合层被折叠为"未找到"，这里仍保留具体原因用于日志

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 单个食物查询失败
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog responded with HTTP {0}")]
    Status(u16),

    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no matching food")]
    NoMatch,
}

/// 一次分析失败，向用户展示
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("please enter at least one food item")]
    EmptyInput,

    #[error("no data found, please try other food items")]
    NoResults,
}

/// 配置错误，在接管终端前报告
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "missing API key: set NUTRITRACK_API_KEY, pass --api-key, or add `api_key` to {0}"
    )]
    MissingApiKey(String),

    #[error("cannot determine the user config directory")]
    NoConfigDir,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 顶层错误
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}
