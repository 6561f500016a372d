//! Scenario-driven runs: engine construction, single runs, and averaged trials.

use crate::config::ScenarioConfig;
use crate::error::ValidationError;
use crate::fleet::generate_fleet;
use crate::sim::engine::Engine;
use crate::sim::report::{RunReport, TrialSummary};
use crate::sim::types::TickResult;

/// Result of one run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    /// Per-tick records; empty unless recording was requested.
    pub ticks: Vec<TickResult>,
}

/// Results of all runs of a scenario.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub reports: Vec<RunReport>,
    pub summary: TrialSummary,
    /// Per-tick records of the first run, if recorded.
    pub first_run_ticks: Vec<TickResult>,
}

/// Builds an engine with a fresh fleet generated from `seed`.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the scenario contains invalid values.
pub fn build_engine(config: &ScenarioConfig, seed: u64) -> Result<Engine, ValidationError> {
    let sim_config = config.sim_config()?;
    let groups = config.build_groups()?;
    let fleet = generate_fleet(&config.fleet, seed)?;
    Ok(Engine::new(sim_config, fleet, groups))
}

/// Runs the scenario once with the given fleet seed.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the scenario contains invalid values.
pub fn run_once(
    config: &ScenarioConfig,
    seed: u64,
    record_ticks: bool,
) -> Result<RunOutcome, ValidationError> {
    let mut engine = build_engine(config, seed)?;
    let ticks = if record_ticks {
        engine.run()
    } else {
        engine.run_with(|_| {});
        Vec::new()
    };
    Ok(RunOutcome {
        report: engine.report(),
        ticks,
    })
}

/// Runs `simulation.runs` independent trials and averages them.
///
/// Run `i` uses fleet seed `simulation.seed + i`; no state is shared
/// between runs.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the scenario contains invalid values.
pub fn run_trials(
    config: &ScenarioConfig,
    record_first_run: bool,
) -> Result<TrialOutcome, ValidationError> {
    let runs = config.simulation.runs.max(1);
    let mut reports = Vec::with_capacity(runs);
    let mut first_run_ticks = Vec::new();

    for i in 0..runs {
        let seed = config.simulation.seed.wrapping_add(i as u64);
        let outcome = run_once(config, seed, record_first_run && i == 0)?;
        if i == 0 {
            first_run_ticks = outcome.ticks;
        }
        reports.push(outcome.report);
    }

    let summary = TrialSummary::from_reports(&reports);
    Ok(TrialOutcome {
        reports,
        summary,
        first_run_ticks,
    })
}
