use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

// stdout carries command output (e.g. `list --json`), so every console line goes to stderr
fn add_console_sink(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .build()?);

    builder.sink(stderr);

    Ok(())
}

/// Logger for `config`: the rotating file when a location is set, stderr when asked
/// for or when there is no file. Without a `[log]` table it logs Info and above to stderr.
pub fn build_logger(config: &Config) -> spdlog::Result<Arc<Logger>> {
    let mut builder = Logger::builder();

    let level = match config.log {
        None => {
            add_console_sink(&mut builder)?;
            Level::Info
        }
        Some(ref log) => {
            if let Some(ref location) = log.location {
                let daily_sink = Arc::new(RotatingFileSink::builder()
                    .base_path(location)
                    .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
                    .max_files(30)
                    .rotate_on_open(false)
                    .build()?);
                builder.sink(daily_sink);
            }

            if log.log_to_console || log.location.is_none() {
                add_console_sink(&mut builder)?;
            }
            log.level.into()
        }
    };

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(level));

    Ok(logger)
}

pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    let logger = build_logger(config)?;
    spdlog::set_default_logger(logger);
    Ok(())
}
