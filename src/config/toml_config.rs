use crate::domain::model::Locale;
use crate::utils::error::{PeriodError, Result};
use crate::utils::validation::{validate_timezone, Validate};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    pub timezone: TimezoneConfig,
    pub format: FormatConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimezoneConfig {
    /// Zone used for "now", parsed strings and the period label.
    pub display: String,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            display: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub locale: Locale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "period=info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, one line per event.
    #[default]
    Compact,
    Json,
}

impl PeriodConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| PeriodError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        tracing::debug!(
            "Loaded period config: timezone={}, locale={:?}",
            config.timezone.display,
            config.format.locale
        );
        Ok(config)
    }

    /// 替換環境變數 (例如 ${PERIOD_TZ})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PeriodError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得顯示用時區
    pub fn display_timezone(&self) -> Result<Tz> {
        validate_timezone("timezone.display", &self.timezone.display)
    }

    pub fn locale(&self) -> Locale {
        self.format.locale
    }
}

impl Validate for PeriodConfig {
    fn validate(&self) -> Result<()> {
        self.display_timezone().map(|_| ())
    }
}
