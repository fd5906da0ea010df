//! A minimal `log` backend. The terminal UI owns stdout, so records are
//! appended to a file instead:
//!
//! ```text
//! LEVEL [seq] [target] [file.rs:42] message
//! ```
//!
//! The level is read from the `LOG` environment variable
//! (`ERROR`, `WARN`, `INFO`, `DEBUG` or `TRACE`; `INFO` otherwise).

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

struct FileLogger {
    file: Mutex<File>,
    sequence: AtomicUsize,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let location = match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
                format!("{file_name}:{line}")
            }
            _ => "unknown".to_owned(),
        };

        if let Ok(mut file) = self.file.lock() {
            // Nowhere left to report a failed log write.
            let _ = writeln!(
                file,
                "{:>5} [{:>4}] [{}] [{}] {}",
                record.level(),
                sequence,
                record.target(),
                location,
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_ascii_uppercase).as_deref() {
        Some("ERROR") => LevelFilter::Error,
        Some("WARN") => LevelFilter::Warn,
        Some("INFO") => LevelFilter::Info,
        Some("DEBUG") => LevelFilter::Debug,
        Some("TRACE") => LevelFilter::Trace,
        Some("OFF") => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Installs the file logger. Must run before any logging macro is used.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let logger = FileLogger {
        file: Mutex::new(file),
        sequence: AtomicUsize::new(0),
    };

    log::set_boxed_logger(Box::new(logger)).context("a logger is already installed")?;
    log::set_max_level(level_from_env(std::env::var("LOG").ok().as_deref()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(level_from_env(Some("trace")), LevelFilter::Trace);
        assert_eq!(level_from_env(Some("WARN")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("verbose")), LevelFilter::Info);
        assert_eq!(level_from_env(None), LevelFilter::Info);
    }
}
