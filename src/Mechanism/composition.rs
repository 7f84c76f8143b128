//! Fuel and oxidizer descriptions: species names with relative (mole) weights.
use crate::Mechanism::mechanism_error::MechanismError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Relative amounts of species, not necessarily normalized.
///
/// Weights are finite and non-negative with a positive total; a species listed twice
/// has its weights summed. Order of first appearance is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompositionSpec {
    items: Vec<(String, f64)>,
}

impl CompositionSpec {
    pub fn new(items: Vec<(String, f64)>) -> Result<Self, MechanismError> {
        if items.is_empty() {
            return Err(MechanismError::InvalidComposition(
                "empty composition".to_string(),
            ));
        }
        let mut merged: Vec<(String, f64)> = Vec::with_capacity(items.len());
        for (name, weight) in items {
            if !weight.is_finite() || weight < 0.0 {
                return Err(MechanismError::InvalidComposition(format!(
                    "weight of '{}' must be finite and non-negative, got {}",
                    name, weight
                )));
            }
            match merged.iter_mut().find(|(n, _)| *n == name) {
                Some((_, w)) => *w += weight,
                None => merged.push((name, weight)),
            }
        }
        let total: f64 = merged.iter().map(|(_, w)| w).sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(MechanismError::InvalidComposition(
                "weights sum to zero".to_string(),
            ));
        }
        Ok(Self { items: merged })
    }

    /// A single pure species
    pub fn single(name: &str) -> Self {
        Self {
            items: vec![(name.to_string(), 1.0)],
        }
    }

    /// "O2:0.21,N2:0.79"
    pub fn air() -> Self {
        Self {
            items: vec![("O2".to_string(), 0.21), ("N2".to_string(), 0.79)],
        }
    }

    /// From a map; species are sorted by name so the result does not depend on hashing
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, MechanismError> {
        let mut items: Vec<(String, f64)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        Self::new(items)
    }

    /// Same composition with every weight multiplied by `factor` (> 0)
    pub fn scaled(&self, factor: f64) -> Result<Self, MechanismError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(MechanismError::InvalidComposition(format!(
                "scaling factor must be positive, got {}",
                factor
            )));
        }
        Self::new(
            self.items
                .iter()
                .map(|(name, w)| (name.clone(), w * factor))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.items.iter().map(|(name, w)| (name.as_str(), *w))
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|(_, w)| w).sum()
    }

    pub fn weight(&self, name: &str) -> f64 {
        self.items
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0.0, |(_, w)| *w)
    }
}

fn item_regex() -> &'static Regex {
    static ITEM: OnceLock<Regex> = OnceLock::new();
    ITEM.get_or_init(|| {
        Regex::new(r"^\s*([^:,\s]+)\s*:\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s*$")
            .expect("composition item regex is valid")
    })
}

/// "CH4:0.2, O2:0.02,N2:0.1"
impl FromStr for CompositionSpec {
    type Err = MechanismError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut items = Vec::new();
        for piece in s.split(',').filter(|p| !p.trim().is_empty()) {
            let caps = item_regex().captures(piece).ok_or_else(|| {
                MechanismError::InvalidComposition(format!(
                    "'{}' is not of the form NAME:VALUE",
                    piece.trim()
                ))
            })?;
            let weight: f64 = caps[2].parse().map_err(|_| {
                MechanismError::InvalidComposition(format!("bad number in '{}'", piece.trim()))
            })?;
            items.push((caps[1].to_string(), weight));
        }
        Self::new(items)
    }
}

impl TryFrom<String> for CompositionSpec {
    type Error = MechanismError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompositionSpec> for String {
    fn from(spec: CompositionSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for CompositionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .items
            .iter()
            .map(|(name, w)| format!("{}:{}", name, w))
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}", joined)
    }
}
