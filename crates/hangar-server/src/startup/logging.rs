//! Logging bootstrap
//!
//! Console output always; an optional daily-rolling `hangar.log` when file
//! logging is enabled. `RUST_LOG` overrides the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Logging settings extracted from the application configuration.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: String,
    pub file: bool,
}

/// Initialize the global subscriber.
///
/// The returned guard must stay alive for the process lifetime when file
/// logging is on; dropping it stops the background writer.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    if config.file {
        let appender = tracing_appender::rolling::daily(&config.dir, "hangar.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

        Ok(None)
    }
}
