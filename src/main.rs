//! minishop - service launcher
//!
//! One binary, three processes:
//!
//! ```text
//! minishop --service product   [--env dev] [--port 8081]
//! minishop --service order     [--env dev] [--port 8082]
//! minishop --service gateway   [--env dev] [--port 8080]
//! ```
//!
//! Configuration comes from `config/{env}.yaml`.

use std::sync::Arc;

use anyhow::{Context, bail};

use minishop::config::AppConfig;
use minishop::gateway::{self, AppState};
use minishop::order::{self, OrderService};
use minishop::product::{self, ProductService};
use minishop::server;

// ============================================================
// ARGUMENTS
// ============================================================

fn arg_value(names: &[&str]) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if names.contains(&args[i].as_str()) && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn get_env() -> String {
    arg_value(&["--env", "-e"]).unwrap_or_else(|| "dev".to_string())
}

fn get_service() -> Option<String> {
    arg_value(&["--service", "-s"])
}

/// Get port override from command line (--port argument)
fn get_port_override() -> anyhow::Result<Option<u16>> {
    arg_value(&["--port"])
        .map(|p| p.parse().with_context(|| format!("Invalid --port value: {}", p)))
        .transpose()
}

// ============================================================
// MAIN
// ============================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(service) = get_service() else {
        bail!("Missing --service <product|order|gateway>");
    };
    let env = get_env();
    let port_override = get_port_override()?;

    let app_config = AppConfig::load(&env)?;
    let _log_guard = minishop::logging::init_logging(&app_config, &service);

    tracing::info!(
        "Starting minishop {} service in {} mode (build {})",
        service,
        env,
        env!("GIT_HASH")
    );

    match service.as_str() {
        product::SERVICE_NAME => {
            let cfg = &app_config.product;
            let port = port_override.unwrap_or(cfg.port);
            let svc = Arc::new(ProductService::seeded());
            tracing::info!("Product store seeded with {} items", svc.store().len());
            server::serve(product::router(svc), product::SERVICE_NAME, &cfg.host, port).await
        }
        order::SERVICE_NAME => {
            let cfg = &app_config.order;
            let port = port_override.unwrap_or(cfg.port);
            let svc = Arc::new(OrderService::with_fixtures());
            server::serve(order::router(svc), order::SERVICE_NAME, &cfg.host, port).await
        }
        gateway::SERVICE_NAME => {
            let cfg = &app_config.gateway;
            let port = port_override.unwrap_or(cfg.port);
            let state = Arc::new(AppState::from_config(cfg)?);
            tracing::info!(
                "Upstreams: product={} order={} (timeout {} ms)",
                state.product_url,
                state.order_url,
                cfg.upstream_timeout_ms
            );
            tracing::info!("📖 API Docs: http://{}:{}/docs", cfg.host, port);
            server::serve(gateway::router(state), gateway::SERVICE_NAME, &cfg.host, port).await
        }
        other => bail!("Unknown service '{}', expected product, order or gateway", other),
    }
}
