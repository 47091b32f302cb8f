//! Logging setup for Daily Log.
//!
//! Console output is always on; `[logging] file` adds an append-only log
//! file next to it.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard output only.
    Console,
    /// Standard output plus the given file.
    ConsoleAndFile(PathBuf),
}

impl LogTarget {
    /// Pick the target for `config`; a blank `file` means console only.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let file = config.file.trim();
        if file.is_empty() {
            LogTarget::Console
        } else {
            LogTarget::ConsoleAndFile(PathBuf::from(file))
        }
    }
}

/// Log level from its name; unknown names fall back to `info`.
fn parse_level(level: &str) -> Level {
    let level = level.trim();
    if level.eq_ignore_ascii_case("warning") {
        return Level::WARN;
    }
    level.parse().unwrap_or(Level::INFO)
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(parse_level(level).into())
}

/// Open `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the global subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let path = match LogTarget::from_config(config) {
        LogTarget::Console => {
            init_console_only(&config.level);
            return Ok(());
        }
        LogTarget::ConsoleAndFile(path) => path,
    };

    let writer = std::io::stdout.and(Arc::new(open_log_file(&path)?));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(env_filter(&config.level))
        .init();

    tracing::debug!(file = %path.display(), "file logging enabled");
    Ok(())
}

/// Install a console-only subscriber.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(env_filter(level))
        .init();
}
