//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router around the compiled route table
//! - Wire up middleware (tracing, request ID, timeout)
//! - Bind server to listener
//! - Dispatch every request through the strict route table
//! - Observability (metrics, request IDs in logs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::observability::metrics;
use crate::routing::{Dispatch, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
}

/// HTTP server answering from a compiled route table.
pub struct MockServer {
    router: Router,
    endpoints: usize,
}

impl MockServer {
    /// Create a new HTTP server serving `routes`.
    pub fn new(config: ServerConfig, routes: RouteTable) -> Self {
        let routes = Arc::new(routes);
        let state = AppState {
            routes: routes.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            endpoints: routes.len(),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Every path falls through to the dispatch handler; the route table alone
    /// decides between a canned response, 405 and 404.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Router with middleware, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            endpoints = self.endpoints,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Strict dispatch handler.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let path = uri.path();
    let request_id = request_id(&headers);

    let dispatch = state.routes.dispatch(path, &method);
    let matched = if matches!(dispatch, Dispatch::NotFound) { "none" } else { path };
    let response = dispatch.into_response();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        "Request served"
    );
    metrics::record_request(method.as_str(), response.status().as_u16(), matched, start_time);

    response
}
