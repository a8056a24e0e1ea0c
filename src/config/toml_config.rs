use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PathwayError, Result};
use crate::utils::validation::{validate_api_base_url, validate_range, validate_store_dir, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_STORE_PATH: &str = "./.edu-pathway";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathwayConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Configuration after defaults and command line overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub store_path: String,
    pub request_timeout: Option<Duration>,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
}

impl PathwayConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PathwayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PathwayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EDU_PATHWAY_API})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PathwayError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn settings(&self) -> Result<Settings> {
        self.validate()?;

        let log_format = match self
            .logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or("compact")
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        Ok(Settings {
            api_base_url: self
                .api
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            store_path: self
                .storage
                .path
                .clone()
                .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string()),
            request_timeout: self.api.timeout_seconds.map(Duration::from_secs),
            log_level: self.logging.as_ref().and_then(|l| l.level.clone()),
            log_format,
        })
    }
}

impl Validate for PathwayConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.api.base_url {
            validate_api_base_url("api.base_url", base_url)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(path) = &self.storage.path {
            validate_store_dir("storage.path", path)?;
        }
        if let Some(logging) = &self.logging {
            if let Some(format) = &logging.format {
                if format != "compact" && format != "json" {
                    return Err(PathwayError::InvalidConfigValueError {
                        field: "logging.format".to_string(),
                        value: format.clone(),
                        reason: "Expected 'compact' or 'json'".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn store_path(&self) -> &str {
        &self.store_path
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}
