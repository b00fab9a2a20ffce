use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{PeriodError, Result};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 安裝全域 subscriber；`RUST_LOG` 優先於 `logging.level`
pub fn init_logger(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| build_filter(&config.level))?;

    build_subscriber(config.format, filter, std::io::stderr)
        .try_init()
        .map_err(|e| PeriodError::ConfigError {
            message: format!("Logger already installed: {}", e),
        })
}

pub fn build_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| PeriodError::ConfigError {
        message: format!("Invalid log filter `{}`: {}", directives, e),
    })
}

/// Registry with `filter` and one fmt layer writing to `writer`.
pub fn build_subscriber<W>(
    format: LogFormat,
    filter: EnvFilter,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => Box::new(registry.with(layer.compact())),
        LogFormat::Json => Box::new(registry.with(layer.json())),
    }
}
