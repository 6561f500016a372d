//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::ValidationError;
use crate::fleet::FleetConfig;
use crate::sim::group::ChargingGroup;
use crate::sim::truck::{Port, PortSet};
use crate::sim::types::{CleanSourcing, EvictionPolicy, SimConfig};

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing, energy, and run parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Random fleet parameters.
    #[serde(default)]
    pub fleet: FleetConfig,
    /// Charging groups, in allocation order.
    #[serde(default = "baseline_groups")]
    pub groups: Vec<GroupConfig>,
}

/// Simulation timing, energy, and run parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Duration of one tick in seconds (must be > 0).
    pub tick_seconds: f64,
    /// Upper bound on ticks per run (must be > 0).
    pub max_ticks: u64,
    /// Master random seed; run `i` uses `seed + i`.
    pub seed: u64,
    /// Number of independent runs to average (must be > 0).
    pub runs: usize,
    /// Clean-energy budget (kWh).
    pub clean_energy_kwh: f64,
    /// Emissions of non-clean energy (g CO2 per kWh).
    pub emission_factor_g_per_kwh: f64,
    pub eviction: EvictionPolicy,
    pub clean_sourcing: CleanSourcing,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 1.0,
            max_ticks: crate::sim::types::DEFAULT_MAX_TICKS,
            seed: 10,
            runs: 1,
            clean_energy_kwh: 0.0,
            emission_factor_g_per_kwh: 250.0,
            eviction: EvictionPolicy::default(),
            clean_sourcing: CleanSourcing::default(),
        }
    }
}

/// One charging group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Number of slots (must be > 0).
    pub slots: usize,
    /// Power per occupied slot (kW, must be > 0).
    pub charge_power_kw: f64,
    /// Supported connector types (non-empty).
    pub ports: Vec<Port>,
    /// Refuse new trucks once the clean budget is exhausted.
    #[serde(default)]
    pub clean_only: bool,
}

impl GroupConfig {
    fn new(slots: usize, charge_power_kw: f64, ports: &[Port], clean_only: bool) -> Self {
        Self {
            slots,
            charge_power_kw,
            ports: ports.to_vec(),
            clean_only,
        }
    }

    /// Builds the runtime charging group.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an invalid slot count, power, or port list.
    pub fn build(&self) -> Result<ChargingGroup, ValidationError> {
        let ports: PortSet = self.ports.iter().copied().collect();
        ChargingGroup::new(self.slots, self.charge_power_kw, ports, self.clean_only)
    }
}

/// The four reference charging groups.
fn baseline_groups() -> Vec<GroupConfig> {
    vec![
        GroupConfig::new(5, 250.0, &[Port::Right, Port::Left, Port::Top], false),
        GroupConfig::new(7, 150.0, &[Port::Right, Port::Top], false),
        GroupConfig::new(3, 110.0, &[Port::Top, Port::Inductive], false),
        GroupConfig::new(5, 60.0, &[Port::Left, Port::Top, Port::Inductive], false),
    ]
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.tick_seconds"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: ten trucks, 1-second ticks, the four
    /// reference groups, and no clean energy.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            fleet: FleetConfig::default(),
            groups: baseline_groups(),
        }
    }

    /// Returns the clean-mix preset: a clean-only group backed by a finite budget.
    pub fn clean_mix() -> Self {
        let mut groups = baseline_groups();
        groups.insert(
            0,
            GroupConfig::new(4, 200.0, &[Port::Top, Port::Right, Port::Inductive], true),
        );
        Self {
            simulation: SimulationConfig {
                tick_seconds: 60.0,
                clean_energy_kwh: 1500.0,
                ..SimulationConfig::default()
            },
            fleet: FleetConfig {
                trucks: 30,
                ..FleetConfig::default()
            },
            groups,
        }
    }

    /// Returns the inductive-heavy preset: mostly inductive hardware, so trucks
    /// without an inductive or top port are never served.
    pub fn inductive_heavy() -> Self {
        Self {
            simulation: SimulationConfig {
                tick_seconds: 60.0,
                ..SimulationConfig::default()
            },
            fleet: FleetConfig {
                trucks: 20,
                ..FleetConfig::default()
            },
            groups: vec![
                GroupConfig::new(4, 150.0, &[Port::Inductive], false),
                GroupConfig::new(2, 250.0, &[Port::Top, Port::Inductive], false),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "clean_mix", "inductive_heavy"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "clean_mix" => Ok(Self::clean_mix()),
            "inductive_heavy" => Ok(Self::inductive_heavy()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if !(s.tick_seconds.is_finite() && s.tick_seconds > 0.0) {
            errors.push(ConfigError::new("simulation.tick_seconds", "must be > 0"));
        }
        if s.max_ticks == 0 {
            errors.push(ConfigError::new("simulation.max_ticks", "must be > 0"));
        }
        if s.runs == 0 {
            errors.push(ConfigError::new("simulation.runs", "must be > 0"));
        }
        if !(s.clean_energy_kwh.is_finite() && s.clean_energy_kwh >= 0.0) {
            errors.push(ConfigError::new("simulation.clean_energy_kwh", "must be >= 0"));
        }
        if !(s.emission_factor_g_per_kwh.is_finite() && s.emission_factor_g_per_kwh >= 0.0) {
            errors.push(ConfigError::new(
                "simulation.emission_factor_g_per_kwh",
                "must be >= 0",
            ));
        }

        if let Err(ValidationError::FleetRange { field, message }) = self.fleet.validate() {
            errors.push(ConfigError::new(format!("fleet.{field}"), message));
        }

        if self.groups.is_empty() {
            errors.push(ConfigError::new("groups", "at least one group is required"));
        }
        for (i, g) in self.groups.iter().enumerate() {
            if g.slots == 0 {
                errors.push(ConfigError::new(format!("groups[{i}].slots"), "must be > 0"));
            }
            if !(g.charge_power_kw.is_finite() && g.charge_power_kw > 0.0) {
                errors.push(ConfigError::new(
                    format!("groups[{i}].charge_power_kw"),
                    "must be > 0",
                ));
            }
            if g.ports.is_empty() {
                errors.push(ConfigError::new(
                    format!("groups[{i}].ports"),
                    "must list at least one port",
                ));
            }
        }

        errors
    }

    /// Builds the engine configuration from the `[simulation]` section.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for out-of-range values.
    pub fn sim_config(&self) -> Result<SimConfig, ValidationError> {
        let s = &self.simulation;
        Ok(
            SimConfig::new(s.tick_seconds / 3600.0, s.clean_energy_kwh, s.emission_factor_g_per_kwh)?
                .with_max_ticks(s.max_ticks)?
                .with_eviction(s.eviction)
                .with_clean_sourcing(s.clean_sourcing),
        )
    }

    /// Builds fresh, empty charging groups.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] among the group definitions.
    pub fn build_groups(&self) -> Result<Vec<ChargingGroup>, ValidationError> {
        self.groups.iter().map(GroupConfig::build).collect()
    }
}
