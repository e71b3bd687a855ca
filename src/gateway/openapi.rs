//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::models::{AggregatedSummary, Order, OrderStatus, Product};
use crate::response::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "minishop Gateway API",
        version = "0.1.0",
        description = "Aggregating gateway over the product and order services. Every endpoint accepts `work`, `tailEvery` and `tailExtra` to inject synthetic CPU load at each hop.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::get_products,
        crate::gateway::handlers::get_orders,
        crate::gateway::handlers::get_summary,
        crate::gateway::handlers::get_summary_concurrent,
        crate::gateway::handlers::health_check,
    ),
    components(
        schemas(
            Product,
            Order,
            OrderStatus,
            AggregatedSummary,
            HealthResponse,
        )
    ),
    tags(
        (name = "Gateway", description = "Fan-out and aggregation"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_gateway_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/products",
            "/api/orders",
            "/api/summary",
            "/api/summary/concurrent",
            "/api/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_summary_variants_document_the_same_failures() {
        let doc = ApiDoc::openapi();
        for path in ["/api/summary", "/api/summary/concurrent"] {
            let op = doc.paths.paths[path].get.as_ref().unwrap();
            for status in ["200", "400", "502", "504"] {
                assert!(
                    op.responses.responses.contains_key(status),
                    "{} missing {}",
                    path,
                    status
                );
            }
        }
    }

    #[test]
    fn test_openapi_serializes() {
        let json = ApiDoc::openapi().to_pretty_json().unwrap();
        assert!(json.contains("tailEvery"));
    }
}
