//! Trucks, charging ports, and the handles that address trucks in the fleet arena.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Physical charging connector type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Port {
    Top,
    Right,
    Left,
    Inductive,
}

impl Port {
    /// Every port type, in a fixed order.
    pub const ALL: [Port; 4] = [Port::Top, Port::Right, Port::Left, Port::Inductive];

    fn bit(self) -> u8 {
        match self {
            Port::Top => 1,
            Port::Right => 1 << 1,
            Port::Left => 1 << 2,
            Port::Inductive => 1 << 3,
        }
    }

    /// Lowercase token used in scenario files.
    pub fn as_str(self) -> &'static str {
        match self {
            Port::Top => "top",
            Port::Right => "right",
            Port::Left => "left",
            Port::Inductive => "inductive",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Port {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Port::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown port \"{s}\", expected top, right, left or inductive"))
    }
}

/// Compact set of [`Port`]s.
///
/// # Examples
///
/// ```
/// use truck_charge_sim::sim::truck::{Port, PortSet};
///
/// let truck: PortSet = [Port::Top, Port::Inductive].into_iter().collect();
/// let group: PortSet = [Port::Inductive, Port::Left].into_iter().collect();
/// assert_eq!(truck.intersection(group).only(), Some(Port::Inductive));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PortSet(u8);

impl PortSet {
    /// The empty set.
    pub const EMPTY: PortSet = PortSet(0);

    pub fn insert(&mut self, port: Port) {
        self.0 |= port.bit();
    }

    pub fn contains(self, port: Port) -> bool {
        self.0 & port.bit() != 0
    }

    pub fn intersection(self, other: PortSet) -> PortSet {
        PortSet(self.0 & other.0)
    }

    pub fn intersects(self, other: PortSet) -> bool {
        !self.intersection(other).is_empty()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns the single member if the set has exactly one element.
    pub fn only(self) -> Option<Port> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Port> {
        Port::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl FromIterator<Port> for PortSet {
    fn from_iter<I: IntoIterator<Item = Port>>(iter: I) -> Self {
        let mut set = PortSet::EMPTY;
        for port in iter {
            set.insert(port);
        }
        set
    }
}

impl fmt::Display for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Port::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Stable handle of a truck inside the engine's fleet arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TruckId(pub usize);

impl TruckId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TruckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "truck#{}", self.0)
    }
}

/// Charge-state record for one electric truck.
///
/// # Invariants
/// `0 <= current_charge_kwh <= battery_capacity_kwh`, and charge never decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct Truck {
    battery_capacity_kwh: f64,
    current_charge_kwh: f64,
    ports: PortSet,
    charging_speed_kw: f64,
}

impl Truck {
    /// Creates an empty truck.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if capacity or speed is not a positive
    /// finite number, or if `ports` is empty.
    pub fn new(
        battery_capacity_kwh: f64,
        ports: PortSet,
        charging_speed_kw: f64,
    ) -> Result<Self, ValidationError> {
        if !(battery_capacity_kwh.is_finite() && battery_capacity_kwh > 0.0) {
            return Err(ValidationError::BatteryCapacity(battery_capacity_kwh));
        }
        if !(charging_speed_kw.is_finite() && charging_speed_kw > 0.0) {
            return Err(ValidationError::ChargingSpeed(charging_speed_kw));
        }
        if ports.is_empty() {
            return Err(ValidationError::NoTruckPorts);
        }
        Ok(Self {
            battery_capacity_kwh,
            current_charge_kwh: 0.0,
            ports,
            charging_speed_kw,
        })
    }

    pub fn battery_capacity_kwh(&self) -> f64 {
        self.battery_capacity_kwh
    }

    pub fn current_charge_kwh(&self) -> f64 {
        self.current_charge_kwh
    }

    pub fn ports(&self) -> PortSet {
        self.ports
    }

    pub fn charging_speed_kw(&self) -> f64 {
        self.charging_speed_kw
    }

    /// Energy still needed to reach a full battery (kWh).
    pub fn remaining_kwh(&self) -> f64 {
        (self.battery_capacity_kwh - self.current_charge_kwh).max(0.0)
    }

    pub fn is_full(&self) -> bool {
        self.current_charge_kwh >= self.battery_capacity_kwh
    }

    /// Adds up to `kwh` of energy and returns the amount the battery accepted.
    ///
    /// # Panics
    ///
    /// Panics if `kwh` is negative.
    pub fn charge(&mut self, kwh: f64) -> f64 {
        assert!(kwh >= 0.0, "cannot charge a negative amount ({kwh} kWh)");
        let accepted = kwh.min(self.remaining_kwh());
        self.current_charge_kwh = (self.current_charge_kwh + accepted).min(self.battery_capacity_kwh);
        accepted
    }
}

impl fmt::Display for Truck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Truck: {:.1}/{:.1} kWh, ports [{}], speed {:.1} kW",
            self.current_charge_kwh, self.battery_capacity_kwh, self.ports, self.charging_speed_kw
        )
    }
}
