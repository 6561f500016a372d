//! Validation errors raised when constructing simulation entities.

use thiserror::Error;

/// Rejection of a malformed truck, charging group, or simulation setting.
///
/// Entities are validated once at construction; the engine never runs with
/// an invalid value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("battery capacity must be a positive finite kWh value, got {0}")]
    BatteryCapacity(f64),
    #[error("charging speed must be a positive finite kW value, got {0}")]
    ChargingSpeed(f64),
    #[error("a truck needs at least one charging port")]
    NoTruckPorts,
    #[error("a charging group needs at least one slot")]
    NoSlots,
    #[error("group charge power must be a positive finite kW value, got {0}")]
    ChargePower(f64),
    #[error("a charging group needs at least one charging port")]
    NoGroupPorts,
    #[error("tick duration must be a positive finite number of hours, got {0}")]
    TickHours(f64),
    #[error("max ticks must be > 0")]
    MaxTicks,
    #[error("clean energy budget must be a finite kWh value >= 0, got {0}")]
    CleanBudget(f64),
    #[error("emission factor must be a finite g/kWh value >= 0, got {0}")]
    EmissionFactor(f64),
    #[error("fleet range {field} is invalid: {message}")]
    FleetRange {
        field: &'static str,
        message: String,
    },
}
