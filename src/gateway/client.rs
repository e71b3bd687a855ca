//! Upstream clients for the gateway
//!
//! The aggregator only sees the `ProductApi` / `OrderApi` traits. In
//! production both are backed by [`HttpUpstream`] (reqwest); tests and the
//! in-process mode plug the backend services in directly.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Order, Product};
use crate::order::OrderService;
use crate::product::ProductService;
use crate::work_simulator::LoadParams;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Failed to build HTTP client for {service}: {source}")]
    Client {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} service unreachable: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} service returned HTTP {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{service} service sent an unreadable body: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} service failed: {message}")]
    Other {
        service: &'static str,
        message: String,
    },
}

impl UpstreamError {
    /// Name of the backend that failed
    pub fn service(&self) -> &'static str {
        match self {
            Self::Client { service, .. }
            | Self::Transport { service, .. }
            | Self::Status { service, .. }
            | Self::Decode { service, .. }
            | Self::Other { service, .. } => *service,
        }
    }
}

#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list_products(&self, params: &LoadParams) -> Result<Vec<Product>, UpstreamError>;
}

#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn list_orders(&self, params: &LoadParams) -> Result<Vec<Order>, UpstreamError>;
}

// ============================================================================
// HTTP upstream
// ============================================================================

/// One backend reached over HTTP. Load params are forwarded verbatim as
/// `?work=&tailEvery=&tailExtra=`.
pub struct HttpUpstream {
    service: &'static str,
    base_url: String,
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(
        service: &'static str,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| UpstreamError::Client { service, source })?;

        Ok(Self {
            service,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &LoadParams,
    ) -> Result<T, UpstreamError> {
        let service = self.service;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { service, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { service, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| UpstreamError::Decode { service, source })
    }
}

/// Product backend over HTTP
pub struct HttpProductClient(HttpUpstream);

impl HttpProductClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        HttpUpstream::new(crate::product::SERVICE_NAME, base_url, timeout).map(Self)
    }
}

#[async_trait]
impl ProductApi for HttpProductClient {
    async fn list_products(&self, params: &LoadParams) -> Result<Vec<Product>, UpstreamError> {
        self.0.get_json("/products", params).await
    }
}

/// Order backend over HTTP
pub struct HttpOrderClient(HttpUpstream);

impl HttpOrderClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        HttpUpstream::new(crate::order::SERVICE_NAME, base_url, timeout).map(Self)
    }
}

#[async_trait]
impl OrderApi for HttpOrderClient {
    async fn list_orders(&self, params: &LoadParams) -> Result<Vec<Order>, UpstreamError> {
        self.0.get_json("/orders", params).await
    }
}

// ============================================================================
// In-process upstream
// ============================================================================

#[async_trait]
impl ProductApi for ProductService {
    async fn list_products(&self, params: &LoadParams) -> Result<Vec<Product>, UpstreamError> {
        Ok(self.list(params))
    }
}

#[async_trait]
impl OrderApi for OrderService {
    async fn list_orders(&self, params: &LoadParams) -> Result<Vec<Order>, UpstreamError> {
        Ok(self.list(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let upstream = HttpUpstream::new("product", "http://localhost:8081/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(upstream.base_url, "http://localhost:8081");
    }

    #[test]
    fn test_error_names_the_failing_service() {
        let err = UpstreamError::Status {
            service: "order",
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.service(), "order");
        assert_eq!(
            err.to_string(),
            "order service returned HTTP 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            HttpProductClient::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let err = client
            .list_products(&LoadParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Transport { service: "product", .. }));
    }

    #[tokio::test]
    async fn test_in_process_services_satisfy_traits() {
        let products: &dyn ProductApi = &ProductService::seeded();
        let orders: &dyn OrderApi = &OrderService::with_fixtures();
        let params = LoadParams::default();
        assert_eq!(products.list_products(&params).await.unwrap().len(), 3);
        assert_eq!(orders.list_orders(&params).await.unwrap().len(), 3);
    }
}
