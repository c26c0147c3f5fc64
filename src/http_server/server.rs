//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::admin_routes::admin_routes;
use super::auth_routes::auth_routes;
use super::config::HttpServerConfig;
use super::public_routes::{contact_routes, health_routes};
use super::questionnaire_routes::{plan_routes, questionnaire_routes};
use super::state::AppState;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(600);

/// HTTP server for the questionnaire and plan API
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<AppState>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration and in-memory state
    pub fn new() -> Self {
        Self::with_state(HttpServerConfig::default(), Arc::new(AppState::in_memory()))
    }

    /// Create a new HTTP server over existing state
    pub fn with_state(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        let router = build_router(&config, Arc::clone(&state));
        Self {
            config,
            state,
            router,
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start serving until Ctrl-C
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        spawn_session_purge(Arc::clone(&self.state));

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "finplan HTTP server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(health_routes())
        .merge(contact_routes())
        .nest("/auth", auth_routes(Arc::clone(&state)))
        .nest("/questionnaire", questionnaire_routes(Arc::clone(&state)))
        .merge(plan_routes(Arc::clone(&state)))
        .nest("/admin", admin_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn spawn_session_purge(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match state.auth.purge_expired_sessions() {
                Ok(0) => {}
                Ok(removed) => info!(removed, "expired sessions purged"),
                Err(e) => warn!(error = %e, "session purge failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
