//! Logger Module
//!
//! A logging system based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output with multiple formats (Full, Compact, JSON)
//! - Falling back to stderr when the log file stops accepting writes

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;
pub use writer::RecoveryStrategy;

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};
use writer::FileWriter;

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // File layer goes BEFORE the console layer so that ANSI codes from the
    // console formatter do not leak into span fields written to the file.
    // See: https://github.com/tokio-rs/tracing/issues/1817
    let file_layer = if config.file.enabled {
        Some(file_layer(&config.file)?)
    } else {
        None
    };

    let console_layer = config.console.enabled.then(|| {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggerError::subscriber(e.to_string()))?;

    Ok(())
}

fn file_layer<S>(config: &FileConfig) -> Result<Box<dyn Layer<S> + Send + Sync>, LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let writer = FileWriter::new(config)?;

    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    };

    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_layer_writes_json_lines() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig {
            enabled: true,
            path: dir.path().join("relay.log"),
            append: true,
            format: LogFormat::Json,
        };

        let subscriber = tracing_subscriber::registry().with(file_layer(&config).unwrap());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(message_id = "projects/demo/messages/1", "Successfully sent notification");
        });

        let content = std::fs::read_to_string(&config.path).unwrap();
        let line: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["fields"]["message"], "Successfully sent notification");
        assert_eq!(line["fields"]["message_id"], "projects/demo/messages/1");
    }

    #[test]
    fn test_file_layer_fails_on_unwritable_path() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as the log file
        let config = FileConfig {
            enabled: true,
            path: dir.path().to_path_buf(),
            append: true,
            format: LogFormat::Full,
        };

        let result = file_layer::<tracing_subscriber::Registry>(&config);
        assert!(matches!(result, Err(LoggerError::Io(_))));
    }
}
