//! Fleet charging simulator for electric trucks at shared charging stations.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
pub mod fleet;
/// Telemetry export.
pub mod io;
pub mod runner;
/// Simulation engine, allocation, scoring, and energy accounting.
pub mod sim;
