//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（JSON，路径由 LIBRARY_CONFIG 指定）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::types::AppConfig;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "LIBRARY_CONFIG";

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 加载应用配置
///
/// 配置文件路径取自 `LIBRARY_CONFIG`，未设置或为空时只使用默认值与环境变量。
///
/// # 环境变量示例
/// - `LIBRARY_DATA_URI=postgres://library@db/library`
/// - `LIBRARY_PORT=8080`
/// - `LIBRARY_DATABASE__MAX_CONNECTIONS=10`
/// - `LIBRARY_CORS__ALLOW_ORIGINS=http://a.example,http://b.example`
/// - `LIBRARY_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);
    load_config_from_path(path.as_deref())
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的 JSON 配置文件路径；文件不存在或无法解析时返回错误
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("data_uri", defaults.data_uri)?
        .set_default("host", defaults.host)?
        .set_default("port", i64::from(defaults.port))?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("database.create_schema", defaults.database.create_schema)?
        .set_default("cors.allow_origins", defaults.cors.allow_origins)?
        .set_default("log.level", defaults.log.level)?
        .set_default("log.json", defaults.log.json)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).format(FileFormat::Json).required(true));
    }

    // 3. 环境变量（最高优先级）
    // 前缀: LIBRARY_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("LIBRARY")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("cors.allow_origins")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.data_uri.is_empty() {
        return Err(ConfigError::ValidationError(
            "data_uri cannot be empty".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "Database max_connections must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// 数据库地址可能含密码，只打印主机部分。
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.addr());
    tracing::info!("Database: {}", redact_uri(&config.data_uri));
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Create Schema: {}", config.database.create_schema);
    tracing::info!("CORS Origins: {:?}", config.cors.allow_origins);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

/// 去掉连接地址中的用户信息
fn redact_uri(uri: &str) -> String {
    match (uri.find("://"), uri.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &uri[..scheme_end], &uri[at..])
        }
        _ => uri.to_string(),
    }
}
