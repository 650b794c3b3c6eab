//! Logging initialization.

use std::io;

use thiserror::Error;
use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    filter::ParseError,
    fmt::{layer, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use super::types::LoggerConfig;

#[derive(Debug, Error)]
pub enum LoggingInitError {
    #[error("invalid log directive: {0}")]
    Directive(#[from] ParseError),

    #[error("global subscriber already set: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Builds the level filter: INFO unless `RUST_LOG` says otherwise, plus the extra directives.
pub(crate) fn build_filter(directives: &[String]) -> Result<EnvFilter, LoggingInitError> {
    let mut filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    for directive in directives {
        filt = filt.add_directive(directive.parse()?);
    }
    Ok(filt)
}

/// Initializes the logging subsystem with the provided config.
pub fn init(config: LoggerConfig) -> Result<(), LoggingInitError> {
    let filt = build_filter(&config.directives)?;

    let console_writer = if config.stdout_config.use_stderr {
        BoxMakeWriter::new(io::stderr)
    } else {
        BoxMakeWriter::new(io::stdout)
    };

    // Configure console logging with JSON or compact format
    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_writer(console_writer)
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt)
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(console_writer)
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt)
            .boxed()
    };

    let file_layer = match config.file_logging_config.as_ref() {
        Some(file_config) => {
            let file_filt = build_filter(&config.directives)?;
            let file_appender = RollingFileAppender::new(
                file_config.rotation.clone(),
                &file_config.directory,
                &file_config.file_name_prefix,
            );

            let file_layer = if file_config.json_format {
                layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false) // No color codes in files
                    .with_filter(file_filt)
                    .boxed()
            } else {
                layer()
                    .compact()
                    .with_writer(file_appender)
                    .with_ansi(false) // No color codes in files
                    .with_filter(file_filt)
                    .boxed()
            };
            Some(file_layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()?;

    info!(
        service_name = %config.service_name,
        json = config.stdout_config.json_format,
        file_dir = ?config.file_logging_config.as_ref().map(|f| f.directory.display().to_string()),
        "logging initialized"
    );
    Ok(())
}
