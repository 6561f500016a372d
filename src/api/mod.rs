//! REST API for a finished simulation run.
//!
//! Provides two GET endpoints:
//! - `/report`: simulation config and run report
//! - `/telemetry`: per-tick records with optional range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::sim::report::RunReport;
use crate::sim::types::{SimConfig, TickResult};

pub use types::{ErrorResponse, ReportResponse, TelemetryQuery};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the simulation run completes and wrapped in
/// `Arc`; all data is read-only.
pub struct AppState {
    /// Simulation configuration used for this run.
    pub config: SimConfig,
    /// End-of-run report.
    pub report: RunReport,
    /// Per-tick records.
    pub ticks: Vec<TickResult>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report", get(handlers::get_report))
        .route("/telemetry", get(handlers::get_telemetry))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
