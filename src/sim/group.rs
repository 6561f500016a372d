use std::fmt;

use crate::error::ValidationError;

use super::truck::{PortSet, TruckId};

/// A cluster of identical charging slots sharing a power rating and port set.
///
/// Each occupied slot independently delivers up to `charge_power_kw`; there is
/// no power sharing between slots.
#[derive(Debug, Clone)]
pub struct ChargingGroup {
    slot_count: usize,
    charge_power_kw: f64,
    ports: PortSet,
    clean_only: bool,
    docked: Vec<TruckId>,
}

impl ChargingGroup {
    /// Creates an empty charging group.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a zero slot count, a non-positive or
    /// non-finite power rating, or an empty port set.
    pub fn new(
        slot_count: usize,
        charge_power_kw: f64,
        ports: PortSet,
        clean_only: bool,
    ) -> Result<Self, ValidationError> {
        if slot_count == 0 {
            return Err(ValidationError::NoSlots);
        }
        if !(charge_power_kw.is_finite() && charge_power_kw > 0.0) {
            return Err(ValidationError::ChargePower(charge_power_kw));
        }
        if ports.is_empty() {
            return Err(ValidationError::NoGroupPorts);
        }
        Ok(Self {
            slot_count,
            charge_power_kw,
            ports,
            clean_only,
            docked: Vec::with_capacity(slot_count),
        })
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn charge_power_kw(&self) -> f64 {
        self.charge_power_kw
    }

    pub fn ports(&self) -> PortSet {
        self.ports
    }

    /// Whether the group refuses new trucks once the clean budget is gone.
    pub fn is_clean_only(&self) -> bool {
        self.clean_only
    }

    /// Handles of the trucks currently occupying slots, in docking order.
    pub fn docked(&self) -> &[TruckId] {
        &self.docked
    }

    pub fn free_slots(&self) -> usize {
        self.slot_count - self.docked.len()
    }

    /// Places a truck into a free slot.
    ///
    /// # Panics
    ///
    /// Panics if every slot is already taken.
    pub fn dock(&mut self, id: TruckId) {
        assert!(
            self.docked.len() < self.slot_count,
            "docking {id} would overflow a group with {} slots",
            self.slot_count
        );
        self.docked.push(id);
    }

    /// Replaces the docked set after a charge pass.
    ///
    /// # Panics
    ///
    /// Panics if `docked` holds more trucks than there are slots.
    pub(crate) fn commit_docked(&mut self, docked: Vec<TruckId>) {
        assert!(docked.len() <= self.slot_count, "docked set exceeds slot count");
        self.docked = docked;
    }
}

impl fmt::Display for ChargingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Group: {:.0} kW, ports [{}], {}/{} occupied{}",
            self.charge_power_kw,
            self.ports,
            self.docked.len(),
            self.slot_count,
            if self.clean_only { ", clean only" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::truck::Port;

    fn top() -> PortSet {
        [Port::Top].into_iter().collect()
    }

    #[test]
    fn rejects_invalid_groups() {
        assert_eq!(
            ChargingGroup::new(0, 100.0, top(), false).err(),
            Some(ValidationError::NoSlots)
        );
        assert_eq!(
            ChargingGroup::new(2, 0.0, top(), false).err(),
            Some(ValidationError::ChargePower(0.0))
        );
        assert_eq!(
            ChargingGroup::new(2, 100.0, PortSet::EMPTY, false).err(),
            Some(ValidationError::NoGroupPorts)
        );
    }

    #[test]
    fn dock_tracks_free_slots() {
        let mut group = ChargingGroup::new(2, 100.0, top(), false).unwrap();
        assert_eq!(group.free_slots(), 2);
        group.dock(TruckId(0));
        group.dock(TruckId(3));
        assert_eq!(group.free_slots(), 0);
        assert_eq!(group.docked(), &[TruckId(0), TruckId(3)]);
    }

    #[test]
    #[should_panic]
    fn docking_past_capacity_panics() {
        let mut group = ChargingGroup::new(1, 100.0, top(), false).unwrap();
        group.dock(TruckId(0));
        group.dock(TruckId(1));
    }
}
