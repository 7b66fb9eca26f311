//! Structured logging setup using the `tracing` ecosystem.
//!
//! Everything goes to stderr and to a daily-rotated `rlmk.log` in the log
//! directory, plain text or JSON. `RLMK_LOG` replaces the configured level
//! with a full filter directive when set.

use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::RlmkResult;

/// Environment variable holding a filter directive that wins over config.
pub const LOG_ENV: &str = "RLMK_LOG";

/// Dependencies that are chatty at debug level.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "reqwest", "rustls"];

/// Filter directives for a configured level.
///
/// A bare level ("info", "debug") also caps the HTTP stack dependencies at
/// `warn`. Anything containing a `=` is taken as a full directive list and
/// passed through untouched.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return filter_directives("info");
    }
    if level.contains('=') {
        return level.to_string();
    }
    let mut directives = vec![level.to_string()];
    directives.extend(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")));
    directives.join(",")
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(filter_directives(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber: a compact stderr layer plus the rotated
/// file layer. Keep the returned guard alive for as long as logs should be
/// flushed.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> RlmkResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, "rlmk.log"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    // Exactly one of these is Some.
    let json_layer = json_output.then(|| {
        fmt::layer()
            .with_writer(writer.clone())
            .json()
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
    });
    let text_layer = (!json_output).then(|| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(console_layer)
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::info!(
        "logging initialized: filter={}, dir={}",
        filter_directives(level),
        log_dir.display()
    );

    Ok(LogGuard { _guard: guard })
}

/// Flushes and closes the log file when dropped.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Console subscriber whose output the test harness captures. Later calls
/// are no-ops.
pub fn init_console_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(fmt::layer().with_test_writer().compact())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_quiets_http_stack() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("hyper=warn"));
        assert!(directives.contains("reqwest=warn"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_custom_directives_pass_through() {
        let custom = "warn,rlmk_server=debug,tower_http=trace";
        assert_eq!(filter_directives(custom), custom);
    }

    #[test]
    fn test_empty_level_means_info() {
        assert!(filter_directives("  ").starts_with("info,"));
    }

    #[test]
    fn test_console_logging_twice_is_a_noop() {
        init_console_logging("debug");
        init_console_logging("info");
    }
}
