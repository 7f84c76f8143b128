//! # Settings Module
//!
//! ## Purpose
//! Holds the description of a mixture evaluation task: which species exist, the fuel and
//! oxidizer streams, the thermodynamic conditions and the equivalence ratios to tabulate.
//! Tasks are plain serde structures and are stored as JSON, either as a standalone file
//! (`MixtureTask::load` / `MixtureTask::save`) or as the `MIXTURE` section of a task file
//! (see `Utils::load_from_file`).
//!
//! ## Usage Pattern
//! ```rust
//! use MixFrac::settings::MixtureTask;
//!
//! let mut task = MixtureTask::default();
//! task.equivalence_ratios = vec![0.8, 1.0, 1.2];
//! task.validate().unwrap();
//! ```
//!
//! ## Defaults
//! | Field | Default |
//! |-------|---------|
//! | species | CH4, O2, N2, CO, CO2, H2O, H2 |
//! | fuel | "CH4:1" |
//! | oxidizer | "O2:0.21,N2:0.79" |
//! | temperature | 300 K |
//! | pressure | 1e5 Pa |
//! | equivalence_ratios | [1.0, 1.3] |
//! | burnt | true |
//! | log_level | "info" |

use crate::Mechanism::composition::CompositionSpec;
use crate::Mechanism::species_set::SpeciesSet;
use log::{LevelFilter, error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// One mixture evaluation task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixtureTask {
    /// Species formulae (mechanism style names such as "AR" are accepted)
    pub species: Vec<String>,
    pub fuel: CompositionSpec,
    pub oxidizer: CompositionSpec,
    /// K
    pub temperature: f64,
    /// Pa
    pub pressure: f64,
    pub equivalence_ratios: Vec<f64>,
    /// also evaluate the complete-combustion products of every blend
    pub burnt: bool,
    /// "error", "warn", "info", "debug", "trace" or "off"
    pub log_level: String,
}

impl Default for MixtureTask {
    fn default() -> Self {
        let species = ["CH4", "O2", "N2", "CO", "CO2", "H2O", "H2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self {
            species,
            fuel: CompositionSpec::single("CH4"),
            oxidizer: CompositionSpec::air(),
            temperature: 300.0,
            pressure: 1e5,
            equivalence_ratios: vec![1.0, 1.3],
            burnt: true,
            log_level: "info".to_string(),
        }
    }
}

impl MixtureTask {
    /// Reads a task from a JSON file.
    pub fn load(file_name: &str) -> Result<Self, String> {
        let path = Path::new(file_name);
        if !path.exists() {
            return Err(format!("File '{}' does not exist", file_name));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file '{}': {}", file_name, e))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        let task: MixtureTask = serde_json::from_str(content).map_err(|e| {
            let msg = format!(
                "Error parsing mixture task at line {}, column {}: {}",
                e.line(),
                e.column(),
                e
            );
            error!("{}", msg);
            msg
        })?;
        task.validate()?;
        Ok(task)
    }

    /// Writes the task as pretty-printed JSON.
    pub fn save(&self, file_name: &str) -> Result<(), String> {
        let content = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(file_name, content)
            .map_err(|e| format!("Failed to write file '{}': {}", file_name, e))?;
        info!("mixture task saved to '{}'", file_name);
        Ok(())
    }

    /// Checks everything that can be checked without evaluating the task.
    pub fn validate(&self) -> Result<(), String> {
        if self.species.is_empty() {
            return Err("task has no species".to_string());
        }
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(format!("invalid temperature {}", self.temperature));
        }
        if !(self.pressure.is_finite() && self.pressure > 0.0) {
            return Err(format!("invalid pressure {}", self.pressure));
        }
        if let Some(phi) = self
            .equivalence_ratios
            .iter()
            .find(|phi| !(phi.is_finite() && **phi >= 0.0))
        {
            return Err(format!("invalid equivalence ratio {}", phi));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, String> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| format!("Unknown log level: {}", self.log_level))
    }

    /// Builds the species set named by the task.
    pub fn species_set(&self) -> Result<Arc<SpeciesSet>, String> {
        let formulae: Vec<&str> = self.species.iter().map(String::as_str).collect();
        SpeciesSet::from_formulae(&formulae)
            .map(Arc::new)
            .map_err(|e| e.to_string())
    }
}
