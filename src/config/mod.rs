pub mod toml_config;

pub use toml_config::{FormatConfig, LogFormat, LoggingConfig, PeriodConfig, TimezoneConfig};
