use std::sync::Arc;
use std::time::Duration;

use crate::config::GatewayConfig;

use super::client::{HttpOrderClient, HttpProductClient, OrderApi, ProductApi, UpstreamError};
use super::service::GatewayService;

/// Gateway application state (shared)
pub struct AppState {
    /// Aggregator over both backends
    pub gateway: GatewayService,
    /// Upstream base URLs, for logs and the health page
    pub product_url: String,
    pub order_url: String,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductApi>,
        orders: Arc<dyn OrderApi>,
        product_url: impl Into<String>,
        order_url: impl Into<String>,
    ) -> Self {
        Self {
            gateway: GatewayService::new(products, orders),
            product_url: product_url.into(),
            order_url: order_url.into(),
        }
    }

    /// HTTP upstreams from config
    pub fn from_config(config: &GatewayConfig) -> Result<Self, UpstreamError> {
        let timeout = Duration::from_millis(config.upstream_timeout_ms);
        let products = HttpProductClient::new(&config.product_url, timeout)?;
        let orders = HttpOrderClient::new(&config.order_url, timeout)?;

        Ok(Self::new(
            Arc::new(products),
            Arc::new(orders),
            &config.product_url,
            &config.order_url,
        ))
    }
}
