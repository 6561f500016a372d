//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::sim::report::RunReport;
use crate::sim::types::SimConfig;

/// Config and end-of-run report.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub config: SimConfig,
    pub report: RunReport,
}

/// Optional range query parameters for the telemetry endpoint.
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// First tick (inclusive).
    pub from: Option<u64>,
    /// Last tick (inclusive).
    pub to: Option<u64>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
