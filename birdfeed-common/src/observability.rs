//! Shared observability helpers for the binary and integration tests.
//!
//! Standard output carries the rendered feed, so log events go to `stderr`
//! by default. A daily rolling file sink is added only when a log directory
//! is configured, either in [`LogConfig::log_dir`] or via `BIRDFEED_LOG_DIR`.
//! Call [`init_logging`] once near process start; later callers are no-ops
//! and simply receive the resolved log file path, if any.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

const LOG_DIR_ENV: &str = "BIRDFEED_LOG_DIR";

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component (used for file names).
    pub app_name: &'static str,
    /// Directory for the rolling file sink. If `None`, we consult
    /// `BIRDFEED_LOG_DIR`; with neither set no file is written.
    pub log_dir: Option<PathBuf>,
    /// Whether to also log to `stderr` when a file sink is active. Without a
    /// file sink `stderr` is always used.
    pub emit_stderr: bool,
    pub format: LogFormat,
    /// Filter applied when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "birdfeed",
            log_dir: None,
            emit_stderr: false,
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn stderr_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Returns the concrete log file path for the current day, or `None` when
/// only `stderr` is used. Subsequent calls hand back the originally resolved
/// location without touching the subscriber.
pub fn init_logging(config: LogConfig) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    let log_dir = resolve_log_dir(config.log_dir.as_deref(), std::env::var_os(LOG_DIR_ENV));
    let file_path = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

            let log_filename = format!("{}.log", config.app_name);
            let today = Local::now().format("%Y-%m-%d").to_string();
            // `rolling::daily` suffixes the file name with the date.
            let full_path = dir.join(format!("{log_filename}.{today}"));

            let appender = rolling::daily(&dir, &log_filename);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);
            layers.push(match config.format {
                LogFormat::Text => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
                LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
            });
            Some(full_path)
        }
        None => None,
    };
    if config.emit_stderr || file_path.is_none() {
        layers.push(stderr_layer(config.format));
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(file_path.clone());
    Ok(file_path)
}

/// Explicit directory first, then the environment; `None` disables the file sink.
fn resolve_log_dir(explicit: Option<&Path>, env_dir: Option<OsString>) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(expand_home(dir));
    }
    env_dir
        .filter(|d| !d.is_empty())
        .map(|d| expand_home(Path::new(&d)))
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}
