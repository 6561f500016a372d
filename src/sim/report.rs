//! End-of-run reports and multi-run averages.

use std::fmt;

use serde::Serialize;

use super::energy::{CleanBudget, EnergyLedger};
use super::types::Termination;

/// Aggregate results of a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Sum of battery capacities over the whole fleet (kWh).
    pub total_requested_kwh: f64,
    pub trucks_total: usize,
    pub trucks_completed: usize,
    /// Trucks still waiting or docked when the run stopped.
    pub trucks_unserved: usize,
    pub ticks: u64,
    pub elapsed_hours: f64,
    /// Energy metered at the stations (kWh).
    pub energy_delivered_kwh: f64,
    /// Energy absorbed by batteries (kWh).
    pub energy_received_kwh: f64,
    pub energy_loss_pct: f64,
    pub clean_energy_used_kwh: f64,
    /// Emissions of the non-clean share of delivered energy (g CO2).
    pub co2_grams: f64,
    /// `None` if the report was taken before the run stopped.
    pub termination: Option<Termination>,
}

impl RunReport {
    /// Builds a report from the engine's final accounting state.
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        total_requested_kwh: f64,
        trucks_total: usize,
        trucks_completed: usize,
        ticks: u64,
        tick_hours: f64,
        ledger: &EnergyLedger,
        clean: &CleanBudget,
        emission_factor_g_per_kwh: f64,
        termination: Option<Termination>,
    ) -> Self {
        let clean_used = clean.consumed_kwh();
        let grid_kwh = (ledger.delivered_kwh() - clean_used).max(0.0);
        Self {
            total_requested_kwh,
            trucks_total,
            trucks_completed,
            trucks_unserved: trucks_total - trucks_completed,
            ticks,
            elapsed_hours: ticks as f64 * tick_hours,
            energy_delivered_kwh: ledger.delivered_kwh(),
            energy_received_kwh: ledger.received_kwh(),
            energy_loss_pct: ledger.loss_pct(),
            clean_energy_used_kwh: clean_used,
            co2_grams: grid_kwh * emission_factor_g_per_kwh,
            termination,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Report ---")?;
        writeln!(f, "Requested capacity:    {:.2} kWh", self.total_requested_kwh)?;
        writeln!(
            f,
            "Trucks completed:      {} of {}",
            self.trucks_completed, self.trucks_total
        )?;
        writeln!(f, "Trucks unserved:       {}", self.trucks_unserved)?;
        writeln!(
            f,
            "Elapsed time:          {:.3} h ({} ticks)",
            self.elapsed_hours, self.ticks
        )?;
        writeln!(f, "Energy delivered:      {:.2} kWh", self.energy_delivered_kwh)?;
        writeln!(f, "Energy received:       {:.2} kWh", self.energy_received_kwh)?;
        writeln!(f, "Energy loss:           {:.3}%", self.energy_loss_pct)?;
        writeln!(f, "Clean energy used:     {:.2} kWh", self.clean_energy_used_kwh)?;
        writeln!(f, "CO2 emissions:         {:.0} g", self.co2_grams)?;
        match self.termination {
            Some(t) => write!(f, "Termination:           {t}"),
            None => write!(f, "Termination:           running"),
        }
    }
}

/// Mean results over several independent runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSummary {
    pub runs: usize,
    /// Runs that charged every truck.
    pub runs_completed: usize,
    pub mean_requested_kwh: f64,
    pub mean_trucks_completed: f64,
    pub mean_elapsed_hours: f64,
    pub mean_energy_delivered_kwh: f64,
    pub mean_energy_loss_pct: f64,
    pub mean_clean_energy_used_kwh: f64,
    pub mean_co2_grams: f64,
}

impl TrialSummary {
    /// Averages a set of run reports. An empty slice yields all zeros.
    pub fn from_reports(reports: &[RunReport]) -> Self {
        let runs = reports.len();
        let mean = |f: fn(&RunReport) -> f64| {
            if runs == 0 {
                0.0
            } else {
                reports.iter().map(f).sum::<f64>() / runs as f64
            }
        };

        Self {
            runs,
            runs_completed: reports
                .iter()
                .filter(|r| r.termination == Some(Termination::Completed))
                .count(),
            mean_requested_kwh: mean(|r| r.total_requested_kwh),
            mean_trucks_completed: mean(|r| r.trucks_completed as f64),
            mean_elapsed_hours: mean(|r| r.elapsed_hours),
            mean_energy_delivered_kwh: mean(|r| r.energy_delivered_kwh),
            mean_energy_loss_pct: mean(|r| r.energy_loss_pct),
            mean_clean_energy_used_kwh: mean(|r| r.clean_energy_used_kwh),
            mean_co2_grams: mean(|r| r.co2_grams),
        }
    }
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Average over {} runs ({} completed) ---",
            self.runs, self.runs_completed
        )?;
        writeln!(f, "Requested capacity:    {:.2} kWh", self.mean_requested_kwh)?;
        writeln!(f, "Trucks completed:      {:.2}", self.mean_trucks_completed)?;
        writeln!(f, "Elapsed time:          {:.3} h", self.mean_elapsed_hours)?;
        writeln!(f, "Energy delivered:      {:.2} kWh", self.mean_energy_delivered_kwh)?;
        writeln!(f, "Energy loss:           {:.3}%", self.mean_energy_loss_pct)?;
        writeln!(f, "Clean energy used:     {:.2} kWh", self.mean_clean_energy_used_kwh)?;
        write!(f, "CO2 emissions:         {:.0} g", self.mean_co2_grams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_report(delivered: f64, received: f64, clean_total: f64, clean_spent: f64) -> RunReport {
        let mut ledger = EnergyLedger::default();
        ledger.record(delivered, received);
        let mut clean = CleanBudget::new(clean_total);
        clean.draw(clean_spent);
        RunReport::new(500.0, 4, 3, 10, 0.5, &ledger, &clean, 200.0, Some(Termination::Completed))
    }

    #[test]
    fn emissions_exclude_clean_energy() {
        let r = make_report(100.0, 90.0, 50.0, 30.0);
        assert_eq!(r.clean_energy_used_kwh, 30.0);
        assert_eq!(r.co2_grams, 70.0 * 200.0);
        assert!((r.energy_loss_pct - 10.0).abs() < 1e-9);
        assert_eq!(r.elapsed_hours, 5.0);
        assert_eq!(r.trucks_unserved, 1);
    }

    #[test]
    fn averages_over_runs() {
        let a = make_report(100.0, 100.0, 0.0, 0.0);
        let mut b = make_report(300.0, 270.0, 0.0, 0.0);
        b.termination = Some(Termination::Stalled);

        let summary = TrialSummary::from_reports(&[a, b]);
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.runs_completed, 1);
        assert_eq!(summary.mean_energy_delivered_kwh, 200.0);
        assert!((summary.mean_energy_loss_pct - 5.0).abs() < 1e-9);
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = TrialSummary::from_reports(&[]);
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.mean_co2_grams, 0.0);
    }

    #[test]
    fn report_display_does_not_panic() {
        let s = format!("{}", make_report(10.0, 10.0, 0.0, 0.0));
        assert!(s.contains("Trucks completed:"));
    }
}
