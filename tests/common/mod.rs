//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use truck_charge_sim::config::ScenarioConfig;
use truck_charge_sim::sim::group::ChargingGroup;
use truck_charge_sim::sim::truck::{Port, PortSet, Truck};
use truck_charge_sim::sim::types::SimConfig;

/// Collects a port list into a set.
pub fn ports(list: &[Port]) -> PortSet {
    list.iter().copied().collect()
}

/// A truck with an empty battery.
pub fn truck(capacity_kwh: f64, speed_kw: f64, list: &[Port]) -> Truck {
    Truck::new(capacity_kwh, ports(list), speed_kw).expect("fixture truck should be valid")
}

/// An empty charging group.
pub fn group(slots: usize, power_kw: f64, list: &[Port], clean_only: bool) -> ChargingGroup {
    ChargingGroup::new(slots, power_kw, ports(list), clean_only)
        .expect("fixture group should be valid")
}

/// One-hour ticks, the given clean budget, 250 g/kWh grid emissions.
pub fn hourly(clean_kwh: f64) -> SimConfig {
    SimConfig::new(1.0, clean_kwh, 250.0).expect("fixture config should be valid")
}

/// Baseline scenario with ten-minute ticks so generated runs stay short.
pub fn coarse_baseline(trucks: usize) -> ScenarioConfig {
    let mut cfg = ScenarioConfig::baseline();
    cfg.simulation.tick_seconds = 600.0;
    cfg.fleet.trucks = trucks;
    cfg
}
