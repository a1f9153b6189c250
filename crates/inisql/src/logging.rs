//! Logging configuration for inisql
//!
//! The library only emits `tracing` events. Applications that want to see
//! them can install a subscriber through [`LogConfig`], writing to stdout,
//! a daily-rotated file, or both.

use inisql_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name used when a log path has no file component
const DEFAULT_LOG_FILE: &str = "inisql.log";

/// Log output destination
#[derive(Debug, Clone)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to a file with daily rotation
    File(PathBuf),
    /// Output to both stdout and file
    Both(PathBuf),
}

/// Log format style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format (default)
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level filter, in `EnvFilter` syntax (e.g. `inisql=debug`)
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Stdout,
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Info level to stdout
    pub fn info() -> Self {
        Self::default()
    }

    /// Debug level to stdout; shows every bound statement and command
    pub fn debug() -> Self {
        Self::default().with_level("debug")
    }

    /// Warn level to stdout
    pub fn warn() -> Self {
        Self::default().with_level("warn")
    }

    /// Set log output to a rotated file
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::File(path.into());
        self
    }

    /// Set log output to both stdout and a rotated file
    pub fn with_both<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::Both(path.into());
        self
    }

    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level filter
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    /// Install this configuration as the global subscriber.
    ///
    /// `RUST_LOG`, when set, overrides [`LogConfig::level`]. The returned
    /// guard must be kept alive while logging to a file; dropping it flushes
    /// and stops the background writer.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for an unparsable level filter or when a
    /// global subscriber is already installed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use inisql::logging::LogConfig;
    ///
    /// let _guard = LogConfig::debug().init()?;
    /// # Ok::<(), inisql::Error>(())
    /// ```
    pub fn init(self) -> Result<Option<WorkerGuard>> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| Error::InvalidInput(format!("Invalid log level '{}': {}", self.level, e)))?;
        let registry = tracing_subscriber::registry().with(env_filter);

        let installed = match (&self.output, self.format) {
            (LogOutput::Stdout, LogFormat::Pretty) => registry.with(fmt::layer().pretty()).try_init(),
            (LogOutput::Stdout, LogFormat::Compact) => {
                registry.with(fmt::layer().compact()).try_init()
            }
            (LogOutput::File(path), format) => {
                let (writer, guard) = file_writer(path);
                let result = match format {
                    LogFormat::Pretty => registry
                        .with(fmt::layer().with_writer(writer).with_ansi(false).pretty())
                        .try_init(),
                    LogFormat::Compact => registry
                        .with(fmt::layer().with_writer(writer).with_ansi(false).compact())
                        .try_init(),
                };
                return result.map(|_| Some(guard)).map_err(already_set);
            }
            (LogOutput::Both(path), _) => {
                // Both outputs share the default single-line format
                let (writer, guard) = file_writer(path);
                let result = registry
                    .with(fmt::layer())
                    .with(fmt::layer().with_writer(writer).with_ansi(false))
                    .try_init();
                return result.map(|_| Some(guard)).map_err(already_set);
            }
        };

        installed.map(|_| None).map_err(already_set)
    }
}

fn file_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_LOG_FILE);
    tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file_name))
}

fn already_set(err: tracing_subscriber::util::TryInitError) -> Error {
    Error::InvalidInput(format!("Logging already initialized: {}", err))
}
