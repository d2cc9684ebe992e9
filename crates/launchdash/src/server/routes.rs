//! Dashboard HTTP routes.
//!
//! Every chart endpoint maps its query string onto one aggregator call over
//! the shared table. Missing parameters fall back to the page's initial
//! control values.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::page;
use crate::aggregate::{payload_outcome_scatter, site_outcome_pie};
use crate::chart::ChartSpec;
use crate::layout::DashboardLayout;
use crate::record::{PayloadRange, SiteSelection, ALL_SITES};
use crate::table::LaunchTable;

/// State shared by the dashboard handlers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    table: Arc<LaunchTable>,
    layout: Arc<DashboardLayout>,
}

impl DashboardState {
    /// Create handler state for a loaded table.
    #[must_use]
    pub fn new(table: LaunchTable, layout: DashboardLayout) -> Self {
        Self {
            table: Arc::new(table),
            layout: Arc::new(layout),
        }
    }

    fn pie(&self, query: &PieQuery) -> ChartSpec {
        site_outcome_pie(&self.table, &SiteSelection::parse(&query.site))
    }

    fn scatter(&self, query: &ScatterQuery) -> ChartSpec {
        let initial = self.layout.initial_range();
        let range = PayloadRange::new(
            query.low.unwrap_or(initial.low),
            query.high.unwrap_or(initial.high),
        );
        payload_outcome_scatter(&self.table, &SiteSelection::parse(&query.site), range)
    }
}

/// Query parameters of the pie endpoints.
#[derive(Debug, Deserialize)]
pub struct PieQuery {
    /// Dropdown value; defaults to `ALL`.
    #[serde(default = "default_site")]
    pub site: String,
}

/// Query parameters of the scatter endpoints.
#[derive(Debug, Deserialize)]
pub struct ScatterQuery {
    /// Dropdown value; defaults to `ALL`.
    #[serde(default = "default_site")]
    pub site: String,
    /// Lower payload bound in kilograms.
    pub low: Option<f64>,
    /// Upper payload bound in kilograms.
    pub high: Option<f64>,
}

fn default_site() -> String {
    ALL_SITES.to_string()
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Create the dashboard page and API routes.
pub fn dashboard_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/layout", get(layout_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/charts/pie", get(pie_chart_handler))
        .route("/api/charts/scatter", get(scatter_chart_handler))
        .route("/api/figures/pie", get(pie_figure_handler))
        .route("/api/figures/scatter", get(scatter_figure_handler))
        .with_state(state)
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn index_handler(State(state): State<DashboardState>) -> Html<String> {
    Html(page::render(&state.layout.title))
}

async fn layout_handler(State(state): State<DashboardState>) -> Json<DashboardLayout> {
    Json(state.layout.as_ref().clone())
}

async fn summary_handler(State(state): State<DashboardState>) -> impl IntoResponse {
    Json(state.table.summary())
}

async fn pie_chart_handler(
    State(state): State<DashboardState>,
    Query(query): Query<PieQuery>,
) -> Json<ChartSpec> {
    Json(state.pie(&query))
}

async fn scatter_chart_handler(
    State(state): State<DashboardState>,
    Query(query): Query<ScatterQuery>,
) -> Json<ChartSpec> {
    Json(state.scatter(&query))
}

async fn pie_figure_handler(
    State(state): State<DashboardState>,
    Query(query): Query<PieQuery>,
) -> impl IntoResponse {
    Json(state.pie(&query).to_plotly())
}

async fn scatter_figure_handler(
    State(state): State<DashboardState>,
    Query(query): Query<ScatterQuery>,
) -> impl IntoResponse {
    Json(state.scatter(&query).to_plotly())
}
