//! Truck/group compatibility checks and the assignment desirability heuristic.

use super::group::ChargingGroup;
use super::truck::{Port, Truck};

/// Transfer efficiency applied to a group's rated power for inductive-only pairings.
pub const INDUCTIVE_EFFICIENCY: f64 = 0.7;

/// Multiplier applied when the speed/power ratio falls outside the preferred band.
const RATIO_PENALTY: f64 = 0.8;

/// Below this speed/power ratio a truck under-uses a fast group.
const LOW_RATIO: f64 = 0.4;

/// Ratio substituted for an exact 1.0 to keep `1 - ratio` away from zero.
const UNIT_RATIO_CLAMP: f64 = 0.99;

/// Returns `true` when the truck shares at least one port with the group.
pub fn can_dock(truck: &Truck, group: &ChargingGroup) -> bool {
    truck.ports().intersects(group.ports())
}

/// Returns `true` when the only shared port is [`Port::Inductive`].
pub fn is_inductive_only(truck: &Truck, group: &ChargingGroup) -> bool {
    truck.ports().intersection(group.ports()).only() == Some(Port::Inductive)
}

/// Power the group can push into this truck's pairing (kW), before the
/// truck's own speed limit.
pub fn group_rate_kw(truck: &Truck, group: &ChargingGroup) -> f64 {
    if is_inductive_only(truck, group) {
        group.charge_power_kw() * INDUCTIVE_EFFICIENCY
    } else {
        group.charge_power_kw()
    }
}

/// Charging power actually drawn by the pairing (kW).
pub fn effective_rate_kw(truck: &Truck, group: &ChargingGroup) -> f64 {
    truck.charging_speed_kw().min(group_rate_kw(truck, group))
}

/// Desirability of docking `truck` at `group`; higher is better, 0 means
/// the truck cannot dock there.
///
/// Favors trucks whose speed is close to, but below, the group's rate and
/// that will hold the slot for a long time. The heuristic is approximate.
///
/// # Examples
///
/// ```
/// use truck_charge_sim::sim::group::ChargingGroup;
/// use truck_charge_sim::sim::scoring::score;
/// use truck_charge_sim::sim::truck::{Port, PortSet, Truck};
///
/// let top: PortSet = [Port::Top].into_iter().collect();
/// let group = ChargingGroup::new(1, 100.0, top, false).unwrap();
/// let truck = Truck::new(125.0, top, 50.0).unwrap();
/// // charging time 2.5 h, ratio 0.5
/// assert!((score(&truck, &group) - 5.0).abs() < 1e-9);
/// ```
pub fn score(truck: &Truck, group: &ChargingGroup) -> f64 {
    if !can_dock(truck, group) {
        return 0.0;
    }

    let mut ratio = truck.charging_speed_kw() / group_rate_kw(truck, group);
    let mut penalty = 1.0;
    if ratio > 1.0 {
        penalty *= RATIO_PENALTY;
    }
    if ratio < LOW_RATIO {
        penalty *= RATIO_PENALTY;
    }
    if ratio == 1.0 {
        ratio = UNIT_RATIO_CLAMP;
    }

    let charging_time_h = truck.battery_capacity_kwh() / truck.charging_speed_kw();
    (charging_time_h / (1.0 - ratio)).abs() * penalty
}
