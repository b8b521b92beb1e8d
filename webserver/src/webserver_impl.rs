//! Main webserver implementation
//!
//! The WebServer owns the registry and the server state, and is generic over
//! the tuition store so the same router runs on the in-memory store, the JSON
//! file store, or a mock in tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use registry::{TuitionRegistry, TuitionStore};
use shared::{logging, service_info, ServiceId};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::{api, codes};

/// Main webserver struct with dependency injection
pub struct WebServer<S: TuitionStore> {
    state: Arc<WebServerState>,
    registry: TuitionRegistry<S>,
}

impl<S: TuitionStore> Clone for WebServer<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            registry: self.registry.clone(),
        }
    }
}

impl<S: TuitionStore + 'static> WebServer<S> {
    pub fn new(bind_address: SocketAddr, registry: TuitionRegistry<S>) -> Self {
        Self {
            state: Arc::new(WebServerState::new(bind_address)),
            registry,
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Tuition routes
            .route(
                "/api/tuitions",
                post(api::create_tuition::<S>).get(api::list_tuitions::<S>),
            )
            .route(
                "/api/tuitions/:code",
                get(api::get_tuition::<S>).delete(api::delete_tuition::<S>),
            )
            .route(
                "/api/tuitions/:code/status",
                put(api::update_tuition_status::<S>),
            )
            // Code routes
            .route("/api/codes/next", get(codes::next_code::<S>))
            .route("/api/codes/normalize", post(codes::normalize_code::<S>))
            .route("/api/codes/:code/available", get(codes::code_available::<S>))
            // Health check
            .route("/health", get(api::health_check::<S>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Serve until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let listener = tokio::net::TcpListener::bind(self.state.bind_address)
            .await
            .map_err(|e| {
                WebServerError::ServerStartup(format!(
                    "Failed to bind to {}: {}",
                    self.state.bind_address, e
                ))
            })?;

        let local_addr = listener.local_addr()?;
        self.state.set_running(true);
        service_info!(
            ServiceId::current(),
            "🌐 Tuition API listening on http://{}",
            local_addr
        );

        let result = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await;

        self.state.set_running(false);
        result.map_err(|e| WebServerError::ServerStartup(format!("Server error: {e}")))?;

        logging::log_success(ServiceId::current(), "HTTP server stopped");
        Ok(())
    }

    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    pub fn registry(&self) -> &TuitionRegistry<S> {
        &self.registry
    }
}
