//! Core simulation types: configuration, policies, and per-tick records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default upper bound on simulated ticks.
pub const DEFAULT_MAX_TICKS: u64 = 10_000_000;

/// Which trucks leave a clean-only group once the clean budget is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Every truck not yet full is returned to the waiting pool.
    #[default]
    WholeGroup,
    /// Only trucks whose pairing draws clean energy are returned; inductive-only
    /// pairings keep charging from the grid.
    CleanDependent,
}

impl EvictionPolicy {
    /// Whether a truck docked at a clean-only group must leave after exhaustion.
    pub fn evicts(self, inductive_only: bool) -> bool {
        match self {
            EvictionPolicy::WholeGroup => true,
            EvictionPolicy::CleanDependent => !inductive_only,
        }
    }
}

/// Which groups may draw from the clean-energy budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanSourcing {
    /// Only clean-only groups use clean energy.
    #[default]
    CleanOnlyGroups,
    /// Every group uses clean energy while the budget lasts.
    AllGroups,
}

impl CleanSourcing {
    pub fn draws_for(self, clean_only_group: bool) -> bool {
        match self {
            CleanSourcing::CleanOnlyGroups => clean_only_group,
            CleanSourcing::AllGroups => true,
        }
    }
}

/// Centralized simulation configuration shared by the engine and reports.
///
/// # Examples
///
/// ```
/// use truck_charge_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(1.0 / 60.0, 500.0, 250.0).unwrap();
/// assert_eq!(cfg.clean_energy_kwh, 500.0);
/// assert!(SimConfig::new(0.0, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    /// Duration of one tick in hours.
    pub tick_hours: f64,
    /// Hard upper bound on the number of ticks in one run.
    pub max_ticks: u64,
    /// Initial clean-energy budget (kWh).
    pub clean_energy_kwh: f64,
    /// Emissions per kWh of non-clean energy (g CO2/kWh).
    pub emission_factor_g_per_kwh: f64,
    pub eviction: EvictionPolicy,
    pub clean_sourcing: CleanSourcing,
}

impl SimConfig {
    /// Creates a configuration with default policies and tick bound.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `tick_hours` is not positive, or the
    /// budget or emission factor is negative or non-finite.
    pub fn new(
        tick_hours: f64,
        clean_energy_kwh: f64,
        emission_factor_g_per_kwh: f64,
    ) -> Result<Self, ValidationError> {
        if !(tick_hours.is_finite() && tick_hours > 0.0) {
            return Err(ValidationError::TickHours(tick_hours));
        }
        if !(clean_energy_kwh.is_finite() && clean_energy_kwh >= 0.0) {
            return Err(ValidationError::CleanBudget(clean_energy_kwh));
        }
        if !(emission_factor_g_per_kwh.is_finite() && emission_factor_g_per_kwh >= 0.0) {
            return Err(ValidationError::EmissionFactor(emission_factor_g_per_kwh));
        }
        Ok(Self {
            tick_hours,
            max_ticks: DEFAULT_MAX_TICKS,
            clean_energy_kwh,
            emission_factor_g_per_kwh,
            eviction: EvictionPolicy::default(),
            clean_sourcing: CleanSourcing::default(),
        })
    }

    /// Sets the tick bound.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MaxTicks`] for a zero bound.
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Result<Self, ValidationError> {
        if max_ticks == 0 {
            return Err(ValidationError::MaxTicks);
        }
        self.max_ticks = max_ticks;
        Ok(self)
    }

    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }

    pub fn with_clean_sourcing(mut self, clean_sourcing: CleanSourcing) -> Self {
        self.clean_sourcing = clean_sourcing;
        self
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every truck was charged to full.
    Completed,
    /// All slots are free but the remaining trucks fit no eligible group.
    Stalled,
    /// The tick bound was reached first.
    TickLimit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Termination::Completed => "completed",
            Termination::Stalled => "stalled (unreachable trucks)",
            Termination::TickLimit => "tick limit reached",
        })
    }
}

/// Record of one simulated tick, taken after charging and backfill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickResult {
    /// Tick index, starting at 0.
    pub tick: u64,
    /// Simulated time at the end of the tick (hours).
    pub time_hr: f64,
    /// Trucks in the waiting pool after backfill.
    pub waiting: usize,
    /// Trucks occupying slots after backfill.
    pub docked: usize,
    /// Trucks that reached full charge during this tick.
    pub completed: usize,
    /// Trucks returned to the waiting pool by a clean-energy loss.
    pub evicted: usize,
    /// Trucks docked by the backfill pass.
    pub assigned: usize,
    /// Energy metered at the stations during this tick (kWh).
    pub delivered_kwh: f64,
    /// Energy absorbed by batteries during this tick (kWh).
    pub received_kwh: f64,
    /// Clean energy drawn during this tick (kWh).
    pub clean_drawn_kwh: f64,
    /// Clean budget left after this tick (kWh).
    pub clean_remaining_kwh: f64,
    pub clean_exhausted: bool,
}

impl fmt::Display for TickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>6} ({:>8.3}h) | waiting={:>4} docked={:>3} | done={} evicted={} assigned={} | \
             delivered={:.3} kWh received={:.3} kWh | clean={:.3} kWh left{}",
            self.tick,
            self.time_hr,
            self.waiting,
            self.docked,
            self.completed,
            self.evicted,
            self.assigned,
            self.delivered_kwh,
            self.received_kwh,
            self.clean_remaining_kwh,
            if self.clean_exhausted { " (exhausted)" } else { "" },
        )
    }
}
