// Logging utilities
// Author: Gabriel Demetrios Lafis

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;

use log::{Level, LevelFilter, Metadata, Record};
use thiserror::Error;

/// Represents an error while installing the logger
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file: {0}")]
    Io(#[from] io::Error),
    #[error("logger already installed: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}

/// Initialize logging with the given level
///
/// Messages go to stderr, or are appended to `file` when one is given, so
/// they never interleave with the menu on stdout.
pub fn init_logging(level: LevelFilter, file: Option<&str>) -> Result<(), LoggingError> {
    let sink = match file {
        Some(path) => Sink::File(Mutex::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => Sink::Stderr,
    };

    log::set_boxed_logger(Box::new(SimpleLogger { level, sink }))?;
    log::set_max_level(level);
    Ok(())
}

enum Sink {
    Stderr,
    File(Mutex<File>),
}

/// Simple logger implementation
struct SimpleLogger {
    level: LevelFilter,
    sink: Sink,
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

        match &self.sink {
            Sink::Stderr => {
                let level_str = match record.level() {
                    Level::Error => "\x1B[31mERROR\x1B[0m",
                    Level::Warn => "\x1B[33mWARN\x1B[0m",
                    Level::Info => "\x1B[32mINFO\x1B[0m",
                    Level::Debug => "\x1B[34mDEBUG\x1B[0m",
                    Level::Trace => "\x1B[90mTRACE\x1B[0m",
                };
                eprintln!("[{}] {}: {}", timestamp, level_str, record.args());
            }
            Sink::File(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "[{}] {}: {}", timestamp, record.level(), record.args());
                }
            }
        }
    }

    fn flush(&self) {
        if let Sink::File(file) = &self.sink {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
