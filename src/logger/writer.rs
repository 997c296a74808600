//! Shared file writer for the logger

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// What to do with a log line once the file can no longer be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryStrategy {
    /// Keep logging to stderr
    #[default]
    FallbackToConsole,
    /// Drop the line and report success to the subscriber
    SilentDrop,
}

/// File writer shared by every event the subscriber formats
pub struct FileWriter {
    state: Arc<Mutex<WriterState>>,
    recovery_strategy: RecoveryStrategy,
}

struct WriterState {
    file: BufWriter<File>,
    fallback_mode: bool,
}

impl FileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        Self::with_recovery(config, RecoveryStrategy::default())
    }

    pub fn with_recovery(
        config: &FileConfig,
        recovery_strategy: RecoveryStrategy,
    ) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                fallback_mode: false,
            })),
            recovery_strategy,
        })
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = FileWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriterGuard {
            state: self.state.clone(),
            recovery_strategy: self.recovery_strategy,
        }
    }
}

/// Per-event handle returned by [`FileWriter::make_writer`]
pub struct FileWriterGuard {
    state: Arc<Mutex<WriterState>>,
    recovery_strategy: RecoveryStrategy,
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().write(buf);
        }

        match state.file.write(buf) {
            Ok(written) => Ok(written),
            Err(e) => match self.recovery_strategy {
                RecoveryStrategy::FallbackToConsole => {
                    state.fallback_mode = true;
                    eprintln!("[Logger] File write failed, falling back to stderr: {}", e);
                    io::stderr().write(buf)
                }
                RecoveryStrategy::SilentDrop => Ok(buf.len()),
            },
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().flush();
        }

        state.file.flush()
    }
}

impl Drop for FileWriterGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.file.flush();
        }
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}
