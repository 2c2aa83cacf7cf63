//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the metrics handler
//! - Wire up middleware (request tracing)
//! - Run one collection pass per scrape and render it
//! - Serve until the shutdown signal fires

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::collector::BalanceCollector;
use crate::config::ListenerConfig;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub collector: Arc<BalanceCollector>,
}

/// HTTP server exposing the metrics path.
pub struct HttpServer {
    router: Router,
    metrics_path: String,
}

impl HttpServer {
    /// Create a new HTTP server serving `collector` on the configured path.
    pub fn new(collector: Arc<BalanceCollector>, config: &ListenerConfig) -> Self {
        let state = AppState { collector };
        let router = Self::build_router(&config.metrics_path, state);
        Self {
            router,
            metrics_path: config.metrics_path.clone(),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(metrics_path: &str, state: AppState) -> Router {
        Router::new()
            .route(metrics_path, get(metrics_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.metrics_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server shutting down");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Scrape handler: one fresh collection pass per request.
///
/// Always answers 200; RPC failures only remove samples.
async fn metrics_handler(State(state): State<AppState>) -> Response {
    let outcome = state.collector.collect().await;

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, metrics::CONTENT_TYPE)],
        metrics::render(&outcome.samples),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::testing::FakeConnector;
    use crate::routing::parse_mapping;
    use alloy::primitives::U256;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;

    fn server(metrics_path: &str) -> HttpServer {
        let connector = Arc::new(
            FakeConnector::new()
                .with_balance("0xAAA", U256::from(1_500_000_000_000_000_000u64))
                .refuse("http://down.example"),
        );
        let collector = Arc::new(BalanceCollector::new(
            parse_mapping("http://up.example:0xAAA,0xBAD|http://down.example:0xCCC").unwrap(),
            connector,
            Duration::from_secs(1),
        ));
        let config = ListenerConfig {
            metrics_path: metrics_path.to_string(),
            ..ListenerConfig::default()
        };
        HttpServer::new(collector, &config)
    }

    async fn get(router: Router, path: &str) -> (StatusCode, String, String) {
        let response = router
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (status, content_type, body) = get(server("/metrics").router(), "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/plain"));
        assert!(body.contains("wallet_balance_eth{wallet=\"0xAAA\"} 1.5"));
        assert!(!body.contains("0xBAD"));
        assert!(!body.contains("0xCCC"));
    }

    #[tokio::test]
    async fn test_wallet_on_two_endpoints_is_exposed_once() {
        let connector = Arc::new(
            FakeConnector::new().with_balance("0xAAA", U256::from(2_000_000_000_000_000_000u64)),
        );
        let collector = Arc::new(BalanceCollector::new(
            parse_mapping("http://b.example:0xAAA|http://a.example:0xAAA,0xAAA").unwrap(),
            connector,
            Duration::from_secs(1),
        ));
        let router = HttpServer::new(collector, &ListenerConfig::default()).router();

        let (status, _, body) = get(router, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("wallet_balance_eth{wallet=\"0xAAA\"}").count(), 1);
    }

    #[tokio::test]
    async fn test_other_paths_are_not_served() {
        let router = server("/metrics").router();
        let (status, _, _) = get(router.clone(), "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _, _) = get(router, "/health").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_custom_metrics_path() {
        let router = server("/probe/balances").router();
        let (status, _, body) = get(router.clone(), "/probe/balances").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("wallet_balance_eth"));

        let (status, _, _) = get(router, "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
