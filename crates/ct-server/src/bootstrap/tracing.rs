//! Tracing configuration for cliptrans
//!
//! ## Architecture / 架构
//!
//! - `EnvFilter` from `RUST_LOG`, otherwise the directives below
//! - stdout layer plus a daily rolling file layer in the logs directory
//! - `log` records from dependencies are bridged through `tracing-log`
//! - Sentry layer only when `SENTRY_DSN` is set

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "cliptrans.log";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for the app crates
/// - **Production**: info level
/// - HTTP and SQL internals are capped regardless of profile
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let app_level = if is_dev { "debug" } else { "info" };
    let mut directives = vec![
        app_level.to_string(),
        "hyper=warn".to_string(),
        "h2=warn".to_string(),
        "reqwest=info".to_string(),
        "diesel=info".to_string(),
        "tower_http=info".to_string(),
    ];
    for krate in ["ct_app", "ct_infra", "ct_platform", "ct_server"] {
        directives.push(format!("{krate}={app_level}"));
    }
    directives
}

/// Initialize the global subscriber. Call once, before the runtime starts.
///
/// A log file that cannot be opened is reported on stderr and logging
/// continues on stdout only.
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber or `log` bridge is already installed.
pub fn init_tracing_subscriber(logs_dir: &Path) -> anyhow::Result<()> {
    let is_dev = is_development();

    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let sentry_layer = if let Ok(dsn) = std::env::var("SENTRY_DSN") {
        let guard = sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                traces_sample_rate: 1.0,
                ..Default::default()
            },
        ));

        if SENTRY_GUARD.set(guard).is_err() {
            eprintln!("Sentry guard already initialized");
        }

        Some(sentry_tracing::layer())
    } else {
        None
    };

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = match build_file_writer(logs_dir) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
    };

    // "2026-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stdout_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    tracing_log::LogTracer::init()?;

    let subscriber = registry()
        .with(env_filter)
        .with(sentry_layer)
        .with(stdout_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn build_file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert_eq!(dev_directives[0], "debug");
        assert!(dev_directives.contains(&"hyper=warn".to_string()));
        assert!(dev_directives.contains(&"ct_infra=debug".to_string()));

        let prod_directives = build_filter_directives(false);
        assert_eq!(prod_directives[0], "info");
        assert!(prod_directives.contains(&"diesel=info".to_string()));
        assert!(prod_directives.contains(&"ct_platform=info".to_string()));
    }

    #[test]
    fn test_directives_parse_as_env_filter() {
        let joined = build_filter_directives(true).join(",");
        assert!(tracing_subscriber::EnvFilter::try_new(joined).is_ok());
    }
}
