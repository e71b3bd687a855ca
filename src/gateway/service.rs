//! Gateway Aggregator
//!
//! Every operation first runs the gateway's own `WorkSimulator`, then forwards
//! the *same* `LoadParams` to the backends:
//!
//! ```text
//! summary(p) ──▶ work(p) ──▶ products(p) ──▶ work(p) ──▶ product.list(p)
//!                       └──▶ orders(p)   ──▶ work(p) ──▶ order.list(p)     (after products completes)
//! ```
//!
//! `summary` is sequential: the order call starts only after the product call
//! has fully completed. `summary_concurrent` is the separate fan-out variant.

use std::sync::Arc;

use crate::models::{AggregatedSummary, Order, Product};
use crate::work_simulator::{LoadParams, WorkSimulator};

use super::client::{OrderApi, ProductApi};
use super::error::GatewayError;

pub struct GatewayService {
    work: WorkSimulator,
    products: Arc<dyn ProductApi>,
    orders: Arc<dyn OrderApi>,
}

impl GatewayService {
    pub fn new(products: Arc<dyn ProductApi>, orders: Arc<dyn OrderApi>) -> Self {
        Self {
            work: WorkSimulator::new(),
            products,
            orders,
        }
    }

    /// Local work, then the product backend's list.
    pub async fn products(&self, params: &LoadParams) -> Result<Vec<Product>, GatewayError> {
        self.work.apply(params);
        Ok(self.products.list_products(params).await?)
    }

    /// Local work, then the order backend's list.
    pub async fn orders(&self, params: &LoadParams) -> Result<Vec<Order>, GatewayError> {
        self.work.apply(params);
        Ok(self.orders.list_orders(params).await?)
    }

    /// Local work once, then `products` and `orders` one after the other.
    ///
    /// Each nested call applies the gateway work again, so a summary pays the
    /// gateway-local cost three times plus one cost per backend.
    pub async fn summary(&self, params: &LoadParams) -> Result<AggregatedSummary, GatewayError> {
        self.work.apply(params);

        let products = self.products(params).await?;
        let orders = self.orders(params).await?;

        Ok(AggregatedSummary::new(products, orders))
    }

    /// Same as `summary` but both backend calls are in flight together.
    ///
    /// The gateway-local burns still run on this task; only the upstream waits
    /// overlap. Fails as soon as either side fails.
    pub async fn summary_concurrent(
        &self,
        params: &LoadParams,
    ) -> Result<AggregatedSummary, GatewayError> {
        self.work.apply(params);

        let (products, orders) = tokio::try_join!(self.products(params), self.orders(params))?;

        Ok(AggregatedSummary::new(products, orders))
    }

    pub fn work(&self) -> &WorkSimulator {
        &self.work
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::client::UpstreamError;
    use crate::order::OrderService;
    use crate::product::ProductService;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};

    fn in_process() -> (Arc<ProductService>, Arc<OrderService>, GatewayService) {
        let products = Arc::new(ProductService::seeded());
        let orders = Arc::new(OrderService::with_fixtures());
        let gateway = GatewayService::new(products.clone(), orders.clone());
        (products, orders, gateway)
    }

    /// Records when each backend call starts and ends
    struct Recorder {
        events: Mutex<Vec<&'static str>>,
        delay: Duration,
    }

    #[async_trait]
    impl ProductApi for Recorder {
        async fn list_products(&self, _: &LoadParams) -> Result<Vec<Product>, UpstreamError> {
            self.events.lock().unwrap().push("product:start");
            tokio::time::sleep(self.delay).await;
            self.events.lock().unwrap().push("product:end");
            Ok(vec![])
        }
    }

    #[async_trait]
    impl OrderApi for Recorder {
        async fn list_orders(&self, _: &LoadParams) -> Result<Vec<Order>, UpstreamError> {
            self.events.lock().unwrap().push("order:start");
            tokio::time::sleep(self.delay).await;
            self.events.lock().unwrap().push("order:end");
            Ok(vec![])
        }
    }

    struct FailingProducts;

    #[async_trait]
    impl ProductApi for FailingProducts {
        async fn list_products(&self, _: &LoadParams) -> Result<Vec<Product>, UpstreamError> {
            Err(UpstreamError::Other {
                service: "product",
                message: "connection reset".to_string(),
            })
        }
    }

    struct TrackedOrders {
        called: AtomicBool,
    }

    #[async_trait]
    impl OrderApi for TrackedOrders {
        async fn list_orders(&self, _: &LoadParams) -> Result<Vec<Order>, UpstreamError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_products_passthrough() {
        let (_, _, gateway) = in_process();
        let products = gateway.products(&LoadParams::default()).await.unwrap();
        let ids: Vec<u64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_summary_counts_match_lists() {
        let (_, _, gateway) = in_process();
        let summary = gateway.summary(&LoadParams::default()).await.unwrap();
        assert_eq!(summary.product_count, 3);
        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.product_count, summary.products.len());
        assert_eq!(summary.order_count, summary.orders.len());
    }

    #[tokio::test]
    async fn test_summary_elapsed_covers_every_hop() {
        let (_, _, gateway) = in_process();
        let params = LoadParams::new(10, 0, 0);

        let start = Instant::now();
        gateway.summary(&params).await.unwrap();
        let elapsed = start.elapsed();

        // summary + products + product backend + orders + order backend
        assert!(elapsed >= Duration::from_millis(50), "summary took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_same_params_reach_every_tail_counter() {
        let (products, orders, gateway) = in_process();
        let params = LoadParams::new(0, 1000, 1);

        gateway.summary(&params).await.unwrap();

        assert_eq!(gateway.work().calls(), 3);
        assert_eq!(products.work().calls(), 1);
        assert_eq!(orders.work().calls(), 1);
    }

    #[tokio::test]
    async fn test_summary_is_sequential() {
        let recorder = Arc::new(Recorder {
            events: Mutex::new(Vec::new()),
            delay: Duration::from_millis(20),
        });
        let gateway = GatewayService::new(recorder.clone(), recorder.clone());

        gateway.summary(&LoadParams::default()).await.unwrap();

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec!["product:start", "product:end", "order:start", "order:end"]
        );
    }

    #[tokio::test]
    async fn test_concurrent_variant_overlaps_backend_calls() {
        let recorder = Arc::new(Recorder {
            events: Mutex::new(Vec::new()),
            delay: Duration::from_millis(20),
        });
        let gateway = GatewayService::new(recorder.clone(), recorder.clone());

        let summary = gateway
            .summary_concurrent(&LoadParams::default())
            .await
            .unwrap();
        assert_eq!(summary.product_count, 0);

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(&events[..2], &["product:start", "order:start"]);
    }

    #[tokio::test]
    async fn test_product_failure_fails_summary_without_order_call() {
        let orders = Arc::new(TrackedOrders {
            called: AtomicBool::new(false),
        });
        let gateway = GatewayService::new(Arc::new(FailingProducts), orders.clone());

        let err = gateway.summary(&LoadParams::default()).await.unwrap_err();
        let GatewayError::Upstream(cause) = err;
        assert_eq!(cause.service(), "product");
        assert!(!orders.called.load(Ordering::SeqCst));
    }
}
