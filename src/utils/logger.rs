//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, writing every record to a log file and echoing
//! it to the console.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Metadata, LevelFilter};

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level that is written
    level: LevelFilter,
}

impl Logger {
    /// Creates a logger writing to `log_file`, truncating it
    pub fn new(log_file: &Path, level: LevelFilter) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
    }

    /// Creates a logger that only echoes to the console
    pub fn console(level: LevelFilter) -> Self {
        Logger {
            file: Mutex::new(None),
            level,
        }
    }

    /// Logs a message to the log file
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Installs a file logger as the global logger
    ///
    /// Falls back to console-only logging when the file cannot be created.
    /// Must be called once at startup.
    pub fn init_global_logger(log_file: &Path, level: LevelFilter) -> io::Result<()> {
        let (global_logger, result) = match Logger::new(log_file, level) {
            Ok(logger) => (logger, Ok(())),
            Err(e) => (Logger::console(level), Err(e)),
        };

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        result
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);

            // Also print to the console, keeping stdout for results
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
