//! Random truck fleet generation.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::sim::truck::{Port, PortSet, Truck};

/// Order in which generated trucks enter the waiting pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueOrder {
    /// Generation order.
    Generated,
    /// Ascending battery capacity; equal capacities keep generation order.
    #[default]
    SmallestBatteryFirst,
}

/// Parameters of the random fleet.
///
/// Capacities and speeds are drawn uniformly as whole kWh and kW values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    /// Number of trucks to generate.
    pub trucks: usize,
    /// Smallest battery capacity (kWh, inclusive).
    pub battery_kwh_min: u32,
    /// Largest battery capacity (kWh, inclusive).
    pub battery_kwh_max: u32,
    /// Slowest charging speed (kW, inclusive).
    pub speed_kw_min: u32,
    /// Fastest charging speed (kW, inclusive).
    pub speed_kw_max: u32,
    pub queue_order: QueueOrder,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            trucks: 10,
            battery_kwh_min: 100,
            battery_kwh_max: 500,
            speed_kw_min: 20,
            speed_kw_max: 250,
            queue_order: QueueOrder::SmallestBatteryFirst,
        }
    }
}

impl FleetConfig {
    /// Checks the generator ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FleetRange`] for a zero lower bound or an
    /// inverted range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let range = |field: &'static str, min: u32, max: u32| {
            if min == 0 {
                Err(ValidationError::FleetRange {
                    field,
                    message: "lower bound must be > 0".into(),
                })
            } else if min > max {
                Err(ValidationError::FleetRange {
                    field,
                    message: format!("lower bound {min} exceeds upper bound {max}"),
                })
            } else {
                Ok(())
            }
        };
        range("battery_kwh", self.battery_kwh_min, self.battery_kwh_max)?;
        range("speed_kw", self.speed_kw_min, self.speed_kw_max)
    }
}

/// Generates a reproducible random fleet.
///
/// Each truck gets a random non-empty subset of the four port types.
///
/// # Arguments
///
/// * `config` - Fleet size and attribute ranges
/// * `seed` - Random seed; equal seeds give equal fleets
///
/// # Errors
///
/// Returns a [`ValidationError`] if the configured ranges are invalid.
pub fn generate_fleet(config: &FleetConfig, seed: u64) -> Result<Vec<Truck>, ValidationError> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut fleet = Vec::with_capacity(config.trucks);

    for _ in 0..config.trucks {
        let capacity = rng.random_range(config.battery_kwh_min..=config.battery_kwh_max);
        let port_count = rng.random_range(1..=Port::ALL.len());
        let mut pool = Port::ALL;
        pool.shuffle(&mut rng);
        let ports: PortSet = pool[..port_count].iter().copied().collect();
        let speed = rng.random_range(config.speed_kw_min..=config.speed_kw_max);

        fleet.push(Truck::new(f64::from(capacity), ports, f64::from(speed))?);
    }

    if config.queue_order == QueueOrder::SmallestBatteryFirst {
        fleet.sort_by(|a, b| a.battery_capacity_kwh().total_cmp(&b.battery_capacity_kwh()));
    }
    Ok(fleet)
}
