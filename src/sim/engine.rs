//! Simulation engine that owns the fleet, the charging groups, and the clock.

use super::allocator::fill_groups;
use super::clock::Clock;
use super::energy::{CleanBudget, EnergyLedger};
use super::group::ChargingGroup;
use super::report::RunReport;
use super::scoring::{effective_rate_kw, is_inductive_only};
use super::truck::{Truck, TruckId};
use super::types::{SimConfig, Termination, TickResult};

/// Discrete-time charging simulation.
///
/// Trucks live in an arena owned by the engine and are addressed by
/// [`TruckId`]. Every handle sits in exactly one container at a time: the
/// waiting pool or one group's docked set. Each tick charges every docked
/// truck, retires full ones, evicts trucks that lost their clean power
/// source, and then backfills free slots.
#[derive(Debug, Clone)]
pub struct Engine {
    config: SimConfig,
    fleet: Vec<Truck>,
    groups: Vec<ChargingGroup>,
    waiting: Vec<TruckId>,
    clock: Clock,
    clean: CleanBudget,
    ledger: EnergyLedger,
    completed: usize,
    evicted: usize,
    termination: Option<Termination>,
}

impl Engine {
    /// Creates an engine and performs the initial slot assignment.
    ///
    /// The fleet order is the initial waiting-pool order.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulation configuration
    /// * `fleet` - Trucks to charge, all starting in the waiting pool
    /// * `groups` - Charging groups, visited in this order by the allocator
    ///
    /// # Panics
    ///
    /// Panics if any group already has docked trucks.
    pub fn new(config: SimConfig, fleet: Vec<Truck>, groups: Vec<ChargingGroup>) -> Self {
        assert!(
            groups.iter().all(|g| g.docked().is_empty()),
            "charging groups must start empty"
        );
        let waiting = (0..fleet.len()).map(TruckId).collect();
        let clock = Clock::new(config.max_ticks);
        let clean = CleanBudget::new(config.clean_energy_kwh);

        let mut engine = Self {
            config,
            fleet,
            groups,
            waiting,
            clock,
            clean,
            ledger: EnergyLedger::default(),
            completed: 0,
            evicted: 0,
            termination: None,
        };
        engine.backfill();
        engine.termination = engine.check_termination();
        engine
    }

    /// Executes one tick.
    ///
    /// # Returns
    ///
    /// The tick record, or `None` once the run has terminated.
    pub fn step(&mut self) -> Option<TickResult> {
        if self.termination.is_some() {
            return None;
        }
        let Some(tick) = self.clock.tick() else {
            self.termination = Some(Termination::TickLimit);
            return None;
        };

        let delivered_before = self.ledger.delivered_kwh();
        let received_before = self.ledger.received_kwh();
        let clean_before = self.clean.consumed_kwh();
        let completed_before = self.completed;
        let evicted_before = self.evicted;

        // 1. Charge every docked truck, committing docked sets per group
        for gi in 0..self.groups.len() {
            self.charge_group(gi);
        }

        // 2. Backfill freed slots
        let assigned = self.backfill();

        // 3. Termination
        self.termination = self.check_termination();

        Some(TickResult {
            tick,
            time_hr: self.clock.elapsed_hours(self.config.tick_hours),
            waiting: self.waiting.len(),
            docked: self.docked_count(),
            completed: self.completed - completed_before,
            evicted: self.evicted - evicted_before,
            assigned,
            delivered_kwh: self.ledger.delivered_kwh() - delivered_before,
            received_kwh: self.ledger.received_kwh() - received_before,
            clean_drawn_kwh: self.clean.consumed_kwh() - clean_before,
            clean_remaining_kwh: self.clean.remaining_kwh(),
            clean_exhausted: self.clean.is_exhausted(),
        })
    }

    /// Runs to termination, calling `f` with every tick record.
    pub fn run_with(&mut self, mut f: impl FnMut(&TickResult)) {
        while let Some(result) = self.step() {
            f(&result);
        }
    }

    /// Runs to termination and returns every tick record.
    pub fn run(&mut self) -> Vec<TickResult> {
        let mut results = Vec::new();
        self.run_with(|r| results.push(r.clone()));
        results
    }

    /// Summary of the run so far.
    pub fn report(&self) -> RunReport {
        let requested: f64 = self.fleet.iter().map(Truck::battery_capacity_kwh).sum();
        RunReport::new(
            requested,
            self.fleet.len(),
            self.completed,
            self.clock.elapsed(),
            self.config.tick_hours,
            &self.ledger,
            &self.clean,
            self.config.emission_factor_g_per_kwh,
            self.termination,
        )
    }

    fn charge_group(&mut self, gi: usize) {
        let snapshot = self.groups[gi].docked().to_vec();
        if snapshot.is_empty() {
            return;
        }
        let clean_only = self.groups[gi].is_clean_only();
        let mut survivors = Vec::with_capacity(snapshot.len());

        for id in snapshot {
            let group = &self.groups[gi];
            let truck = &self.fleet[id.index()];
            let inductive = is_inductive_only(truck, group);
            let rate_kw = effective_rate_kw(truck, group);

            if !self.source_lost(clean_only, inductive) {
                let mut delivered = rate_kw * self.config.tick_hours;
                if !inductive
                    && self.config.clean_sourcing.draws_for(clean_only)
                    && !self.clean.is_exhausted()
                {
                    let clean_kwh = self.clean.draw(delivered);
                    // clean is the only permitted source for clean-only groups
                    if clean_only {
                        delivered = clean_kwh;
                    }
                }

                let truck = &mut self.fleet[id.index()];
                let received = truck.charge(delivered);
                self.ledger.record(delivered, received);

                if truck.is_full() {
                    self.completed += 1;
                    continue;
                }
            }

            survivors.push((id, inductive));
        }

        // exhaustion mid-pass also evicts trucks charged earlier in the pass
        let (evicted, keep): (Vec<_>, Vec<_>) = survivors
            .into_iter()
            .partition(|&(_, inductive)| self.source_lost(clean_only, inductive));
        let keep = keep.into_iter().map(|(id, _)| id).collect();
        let evicted: Vec<TruckId> = evicted.into_iter().map(|(id, _)| id).collect();

        self.groups[gi].commit_docked(keep);
        self.evicted += evicted.len();
        self.waiting.extend(evicted);
    }

    /// A clean-only group cannot power this pairing any more.
    fn source_lost(&self, clean_only: bool, inductive: bool) -> bool {
        clean_only && self.clean.is_exhausted() && self.config.eviction.evicts(inductive)
    }

    fn backfill(&mut self) -> usize {
        fill_groups(
            &mut self.groups,
            &self.fleet,
            &mut self.waiting,
            !self.clean.is_exhausted(),
        )
    }

    fn check_termination(&self) -> Option<Termination> {
        let idle = self.groups.iter().all(|g| g.docked().is_empty());
        if idle && self.waiting.is_empty() {
            Some(Termination::Completed)
        } else if idle {
            // every eligible slot is free and nothing else fits
            Some(Termination::Stalled)
        } else if self.clock.is_exhausted() {
            Some(Termination::TickLimit)
        } else {
            None
        }
    }

    fn docked_count(&self) -> usize {
        self.groups.iter().map(|g| g.docked().len()).sum()
    }

    /// Returns the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// All trucks, indexed by [`TruckId`].
    pub fn fleet(&self) -> &[Truck] {
        &self.fleet
    }

    /// # Panics
    ///
    /// Panics if `id` is not a handle from this engine's fleet.
    pub fn truck(&self, id: TruckId) -> &Truck {
        &self.fleet[id.index()]
    }

    pub fn groups(&self) -> &[ChargingGroup] {
        &self.groups
    }

    /// Handles of trucks not docked anywhere, in queue order.
    pub fn waiting(&self) -> &[TruckId] {
        &self.waiting
    }

    pub fn clean_budget(&self) -> &CleanBudget {
        &self.clean
    }

    pub fn ledger(&self) -> &EnergyLedger {
        &self.ledger
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Number of ticks executed.
    pub fn ticks(&self) -> u64 {
        self.clock.elapsed()
    }

    /// `Some` once the run has stopped.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// `true` when no truck remains in the waiting pool.
    pub fn all_assigned(&self) -> bool {
        self.waiting.is_empty()
    }
}
