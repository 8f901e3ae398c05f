//! Logging Infrastructure
//!
//! Structured logging for development (stdout) and production (daily rolling
//! files, optionally JSON).

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with stdout output at `info`
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` wins over `log_level` when set. Files roll daily under
/// `log_dir` with the `dwl-server` prefix; a missing directory falls back to
/// stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{level},sqlx=warn,hyper=warn")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let appender = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if let Err(e) = std::fs::create_dir_all(log_path) {
            eprintln!("Cannot create log dir {dir}: {e}; logging to stdout");
            return None;
        }
        Some(tracing_appender::rolling::daily(log_path, "dwl-server"))
    });

    // try_init: tests and embedders may have installed a subscriber already
    let result = match (appender, json) {
        (Some(appender), true) => builder.json().with_ansi(false).with_writer(appender).try_init(),
        (Some(appender), false) => builder.with_ansi(false).with_writer(appender).try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}
