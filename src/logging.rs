//! Debug log setup.
//!
//! Module runs print their JSON result on stdout, so tracing output goes to
//! `<log_dir>/suma_debug.log` instead. `RUST_LOG` overrides the default
//! `debug` filter.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Default directory of the debug log.
pub const DEFAULT_LOG_DIR: &str = "/var/adm/ansible";
/// File name of the debug log.
pub const LOG_FILE_NAME: &str = "suma_debug.log";

pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
}

/// Send tracing output to the debug log, creating its directory if needed.
///
/// Returns the log file path.
pub fn init_file_logging(log_dir: &Path) -> Result<PathBuf> {
    if !log_dir.exists() {
        create_log_dir(log_dir)
            .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;
    }

    let path = log_file_path(log_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(path)
}

/// Fallback when the debug log cannot be opened: log to stderr.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(unix)]
fn create_log_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o744).create(dir)
}

#[cfg(not(unix))]
fn create_log_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        assert_eq!(
            log_file_path(Path::new(DEFAULT_LOG_DIR)),
            PathBuf::from("/var/adm/ansible/suma_debug.log")
        );
    }

    #[test]
    fn test_create_nested_log_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        create_log_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
