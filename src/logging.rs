//! Per-process tracing setup
//!
//! Every service writes to its own rolling file under `log_dir`. Text mode
//! also echoes to stdout; JSON mode writes the file only.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::AppConfig;

/// Install the global subscriber for one service process.
///
/// Keep the returned guard alive for the life of the process, dropping it
/// flushes the file writer.
pub fn init_logging(config: &AppConfig, service: &str) -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(config, service));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let json_file = config.use_json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_ansi(false)
            .with_writer(file_writer.clone())
    });
    let text_file = (!config.use_json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(file_writer)
    });
    let stdout = (!config.use_json).then(|| fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_file)
        .with(text_file)
        .with(stdout)
        .init();

    tracing::info!(
        service,
        file = %log_file_name(config, service),
        rotation = %config.rotation,
        "logging ready"
    );
    guard
}

fn log_file_name(config: &AppConfig, service: &str) -> String {
    format!("{}-{}.log", config.log_file, service)
}

fn file_appender(config: &AppConfig, service: &str) -> RollingFileAppender {
    let name = log_file_name(config, service);
    match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, name),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, name),
        _ => tracing_appender::rolling::never(&config.log_dir, name),
    }
}

/// Per-call tail events are silenced unless tracing is switched on.
fn filter_directives(config: &AppConfig) -> String {
    if config.enable_tracing {
        config.log_level.clone()
    } else {
        format!("{},tail=off", config.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_events_silenced_unless_tracing_enabled() {
        let mut config = AppConfig::default();
        config.log_level = "debug".to_string();
        assert_eq!(filter_directives(&config), "debug,tail=off");

        config.enable_tracing = true;
        assert_eq!(filter_directives(&config), "debug");
    }

    #[test]
    fn test_each_service_gets_its_own_file() {
        let config = AppConfig::default();
        assert_eq!(log_file_name(&config, "gateway"), "minishop-gateway.log");
        assert_ne!(
            log_file_name(&config, "product"),
            log_file_name(&config, "order")
        );
    }
}
