use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::ValueEnum;
use factory_configuration::LoggingToml;
use serde::Deserialize;
use serde::Serialize;
use tracing::Level;
use tracing::event;
use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::filter::Filtered;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::fmt::format::Format;
use tracing_subscriber::fmt::format::Json;
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;
use tracing_subscriber::reload::Handle;

pub const LOG_DIR_ENV_VAR: &str = "FACTORY_LOG_DIR";
pub const LOG_LEVEL_ENV_VAR: &str = "FACTORY_LOG_LEVEL";

type LogLayer =
    Filtered<Layer<Registry, JsonFields, Format<Json>, NonBlocking>, EnvFilter, Registry>;

#[derive(Clone, Debug)]
pub struct LogHandles
{
    pub file_handle: Handle<LogLayer, Registry>,
}

impl LogHandles
{
    pub fn set_level(&self, log_level: LogLevel) -> Result<()>
    {
        self.file_handle
            .modify(|layer| *layer.filter_mut() = EnvFilter::new(log_level.to_level_string()))
            .context("Could not change the level of the log file")?;

        event!(Level::INFO, log_level = %log_level.to_level_string(), "log level changed");
        Ok(())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel
{
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel
{
    pub fn to_level_string(&self) -> String
    {
        match self {
            LogLevel::Trace => "trace".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Error => "error".to_string(),
        }
    }
}

/// Installs the JSON file subscriber. The directory comes from
/// `FACTORY_LOG_DIR` when set and from the configuration otherwise, the
/// filter from `FACTORY_LOG_LEVEL` or the configured level. Log files of
/// earlier runs are removed. Keep the returned guard alive for as long as
/// events should reach the file.
pub fn setup_logging(logging_toml: &LoggingToml) -> Result<(LogHandles, WorkerGuard)>
{
    let log_dir = dotenvy::var(LOG_DIR_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| logging_toml.log_dir.clone());

    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Could not create the log directory {}", log_dir.display()))?;

    let previous_log_files = fs::read_dir(&log_dir)
        .with_context(|| format!("Could not read the log directory {}", log_dir.display()))?;

    for log_file in previous_log_files {
        let path = log_file?.path();
        if path.is_file() && path.extension().is_some_and(|extension| extension == "log") {
            fs::remove_file(&path).with_context(|| {
                format!("Could not remove the old log file {}", path.display())
            })?;
        }
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, &logging_toml.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = match dotenvy::var(LOG_LEVEL_ENV_VAR) {
        Ok(directives) => EnvFilter::try_new(directives),
        Err(_) => EnvFilter::try_new(&logging_toml.level),
    }
    .context("Invalid log level directives")?;

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_filter(env_filter);

    let (file_layer, file_handle) = reload::Layer::new(file_layer);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    event!(Level::INFO, log_dir = %log_dir.display(), "starting logging");
    Ok((LogHandles { file_handle }, guard))
}
