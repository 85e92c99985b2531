//! Logging setup.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Get the logs directory path.
pub fn logs_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "threatlens", "ThreatLens").map(|dirs| dirs.data_dir().join("logs"))
}

/// Default filter directive for a log level.
pub fn default_directive(log_level: &str) -> String {
    format!("threatlens={},warn", log_level)
}

/// Initialize console logging, plus a rotating log file when `to_file` is set.
///
/// `RUST_LOG` overrides `log_level`. Keep the returned guard alive for the
/// life of the process or buffered file output is lost.
pub fn init_logging(log_level: &str, to_file: bool) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(log_level)));

    if to_file {
        if let Some(log_dir) = logs_dir() {
            if std::fs::create_dir_all(&log_dir).is_ok() {
                let file_appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .max_log_files(5)
                    .filename_prefix("threatlens")
                    .filename_suffix("log")
                    .build(&log_dir)
                    .ok();

                if let Some(appender) = file_appender {
                    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().with_writer(std::io::stderr))
                        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                        .init();

                    tracing::info!("Logging to {:?}", log_dir);
                    return Some(guard);
                }
            }
        }

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        tracing::warn!("File logging unavailable, using console only");
        return None;
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_scopes_level_to_crate() {
        assert_eq!(default_directive("debug"), "threatlens=debug,warn");
    }

    #[test]
    fn logs_dir_ends_with_logs() {
        if let Some(dir) = logs_dir() {
            assert!(dir.ends_with("logs"));
        }
    }
}
