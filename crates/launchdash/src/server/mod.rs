//! # Dashboard HTTP server
//!
//! Serves the dashboard page and the chart API over axum.
//!
//! # Endpoints
//!
//! - `/` - Dashboard page
//! - `/health` - Health check
//! - `/api/layout` - Control model (dropdown options, slider)
//! - `/api/summary` - Table statistics
//! - `/api/charts/{pie,scatter}` - Chart specifications
//! - `/api/figures/{pie,scatter}` - Plotly figures

mod page;
pub mod routes;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::layout::DashboardLayout;
use crate::table::LaunchTable;

pub use routes::{dashboard_routes, health_routes, DashboardState};

/// HTTP server for the launch dashboard.
#[derive(Debug)]
pub struct DashboardServer {
    config: ServerConfig,
    router: Router,
}

impl DashboardServer {
    /// Create a server over a loaded table.
    #[must_use]
    pub fn new(config: ServerConfig, table: LaunchTable, layout: DashboardLayout) -> Self {
        let router = Self::build_router(&config, DashboardState::new(table, layout));
        Self { config, router }
    }

    fn build_router(config: &ServerConfig, state: DashboardState) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
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
            .merge(dashboard_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    #[must_use]
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the listener and serve until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn start(self) -> Result<()> {
        let addr = self.socket_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| Error::Bind {
                addr: addr.clone(),
                source,
            })?;

        let local = listener.local_addr()?;
        info!("Dashboard available at http://{local}");
        info!("Health check: http://{local}/health");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Dashboard server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
}
