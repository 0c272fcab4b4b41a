//! Logging Infrastructure
//!
//! Structured logging for development and production:
//! - Console output, pretty or JSON
//! - Daily rotating application logs, pruned by [`cleanup_old_logs`]
//! - Audit logs (target `audit`) and security logs (target `security`) in
//!   their own directories, never pruned

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Days, Local, NaiveDate};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

pub const AUDIT_TARGET: &str = "audit";
pub const SECURITY_TARGET: &str = "security";

const APP_PREFIX: &str = "app";

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Per-kind log directories under the configured root
#[derive(Debug, Clone)]
pub struct LogDirs {
    pub app: PathBuf,
    pub audit: PathBuf,
    pub security: PathBuf,
}

/// Create `app/`, `audit/` and `security/` under `log_dir`
pub fn prepare_log_dirs(log_dir: &Path) -> std::io::Result<LogDirs> {
    let dirs = LogDirs {
        app: log_dir.join("app"),
        audit: log_dir.join("audit"),
        security: log_dir.join("security"),
    };
    fs::create_dir_all(&dirs.app)?;
    fs::create_dir_all(&dirs.audit)?;
    fs::create_dir_all(&dirs.security)?;
    Ok(dirs)
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Initialize the logging system with daily rotating logs
///
/// # Arguments
/// * `level` - Log level or filter directive (`"info"`, `"a7_server=debug"`);
///   `RUST_LOG` wins when set
/// * `json_format` - JSON lines (production) instead of pretty text
/// * `log_dir` - Optional root directory for file logging
///
/// Fails if a global subscriber is already installed.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = vec![console_layer(json_format)];

    if let Some(dir) = log_dir {
        let dirs = prepare_log_dirs(dir)?;

        let app_log = RollingFileAppender::new(Rotation::DAILY, &dirs.app, APP_PREFIX);
        layers.push(file_layer(app_log, json_format, |target| {
            target != AUDIT_TARGET && target != SECURITY_TARGET
        }));

        let audit_log = RollingFileAppender::new(Rotation::DAILY, &dirs.audit, AUDIT_TARGET);
        layers.push(file_layer(audit_log, json_format, |target| {
            target == AUDIT_TARGET
        }));

        let security_log =
            RollingFileAppender::new(Rotation::DAILY, &dirs.security, SECURITY_TARGET);
        layers.push(file_layer(security_log, json_format, |target| {
            target == SECURITY_TARGET
        }));
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;
    Ok(())
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

fn file_layer(
    appender: RollingFileAppender,
    json_format: bool,
    accept_target: fn(&str) -> bool,
) -> BoxedLayer {
    let writer = std::sync::Mutex::new(appender);
    let filter = filter_fn(move |meta| accept_target(meta.target()));
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    }
}

/// Delete rotated application logs (`app.YYYY-MM-DD`) older than
/// `keep_days`. Audit and security logs are never touched.
///
/// Returns the number of files removed.
pub fn cleanup_old_logs(log_dir: &Path, keep_days: u64) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let today = Local::now().date_naive();
    let cutoff = today.checked_sub_days(Days::new(keep_days)).unwrap_or(today);

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name.strip_prefix("app.")
            && let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_log_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = prepare_log_dirs(tmp.path()).unwrap();
        assert!(dirs.app.is_dir());
        assert!(dirs.audit.is_dir());
        assert!(dirs.security.is_dir());
    }

    #[test]
    fn test_cleanup_removes_only_old_app_logs() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = prepare_log_dirs(tmp.path()).unwrap();

        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        fs::write(dirs.app.join("app.2020-01-01"), "old").unwrap();
        fs::write(dirs.app.join(format!("app.{today}")), "new").unwrap();
        fs::write(dirs.app.join("notes.txt"), "keep").unwrap();
        fs::write(dirs.security.join("security.2020-01-01"), "keep").unwrap();

        let removed = cleanup_old_logs(tmp.path(), 14).unwrap();
        assert_eq!(removed, 1);
        assert!(!dirs.app.join("app.2020-01-01").exists());
        assert!(dirs.app.join(format!("app.{today}")).exists());
        assert!(dirs.app.join("notes.txt").exists());
        assert!(dirs.security.join("security.2020-01-01").exists());
    }

    #[test]
    fn test_cleanup_without_app_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(tmp.path(), 14).unwrap(), 0);
    }
}
