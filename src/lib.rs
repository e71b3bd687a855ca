//! minishop - fan-out gateway with synthetic load injection
//!
//! Three small HTTP services built to observe how an aggregating gateway
//! behaves when its backends get slow:
//!
//! ```text
//! client ──▶ gateway ──▶ product service
//!                  └───▶ order service      (after product completes)
//! ```
//!
//! Every hop burns CPU according to the caller's `work` / `tailEvery` /
//! `tailExtra` query parameters.
//!
//! # Modules
//!
//! - [`work_simulator`] - CPU burn and periodic tail latency
//! - [`models`] - Product, Order, AggregatedSummary
//! - [`extract`] - Query/path/body extractors with enveloped rejections
//! - [`product`] - Product backend (store, service, HTTP routes)
//! - [`order`] - Order backend (fixtures, service, HTTP routes)
//! - [`gateway`] - Aggregator, upstream clients, HTTP routes, OpenAPI
//! - [`perf`] - Latency percentiles for load runs
//! - [`report`] - Load-run CSV summaries and aggregation

// Load injection - used by every service
pub mod work_simulator;

pub mod extract;
pub mod models;
pub mod response;

// Services
pub mod gateway;
pub mod order;
pub mod product;

// Process wiring
pub mod config;
pub mod logging;
pub mod server;

// Load runs
pub mod perf;
pub mod report;

// Convenient re-exports at crate root
pub use gateway::{GatewayError, GatewayService};
pub use models::{AggregatedSummary, Order, OrderStatus, Product, ProductDraft};
pub use order::OrderService;
pub use product::{ProductService, ProductStore};
pub use work_simulator::{LoadParams, WorkSimulator};
