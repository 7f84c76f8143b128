use crate::Mechanism::composition::CompositionSpec;
use crate::Mechanism::mechanism_error::MechanismError;
use crate::Mechanism::species_set::SpeciesSet;
use nalgebra::DVector;
use std::sync::Arc;

/// Immutable composition snapshot of a gas made of the species of one `SpeciesSet`.
///
/// Mole and mass fractions are kept consistent and normalized. Temperature [K] and
/// pressure [Pa] travel with the state but the mixture-fraction machinery never reads
/// them. There are no setters: a different composition is a different `MixtureState`.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureState {
    species: Arc<SpeciesSet>,
    temperature: f64,
    pressure: f64,
    mole_fractions: DVector<f64>,
    mass_fractions: DVector<f64>,
}

fn normalized(
    values: Vec<f64>,
    expected: usize,
    what: &str,
) -> Result<DVector<f64>, MechanismError> {
    if values.len() != expected {
        return Err(MechanismError::DimensionMismatch {
            expected,
            found: values.len(),
        });
    }
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(MechanismError::InvalidComposition(format!(
            "{} must be finite and non-negative",
            what
        )));
    }
    let total: f64 = values.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(MechanismError::InvalidComposition(format!(
            "{} must have a positive finite sum, got {}",
            what, total
        )));
    }
    Ok(DVector::from_vec(values) / total)
}

impl MixtureState {
    /// Mole-basis state: X_k proportional to the given values
    pub fn from_mole_fractions(
        species: &Arc<SpeciesSet>,
        mole_fractions: Vec<f64>,
        temperature: f64,
        pressure: f64,
    ) -> Result<Self, MechanismError> {
        let x = normalized(mole_fractions, species.len(), "mole fractions")?;
        // Y_k = X_k M_k / sum(X M)
        let weighted = x.component_mul(&species.molar_masses());
        let mean_molar_mass = weighted.sum();
        let y = weighted / mean_molar_mass;
        Ok(Self {
            species: Arc::clone(species),
            temperature,
            pressure,
            mole_fractions: x,
            mass_fractions: y,
        })
    }

    /// Mass-basis state: Y_k proportional to the given values
    pub fn from_mass_fractions(
        species: &Arc<SpeciesSet>,
        mass_fractions: Vec<f64>,
        temperature: f64,
        pressure: f64,
    ) -> Result<Self, MechanismError> {
        let y = normalized(mass_fractions, species.len(), "mass fractions")?;
        let moles = y.component_div(&species.molar_masses());
        let total_moles = moles.sum();
        let x = moles / total_moles;
        Ok(Self {
            species: Arc::clone(species),
            temperature,
            pressure,
            mole_fractions: x,
            mass_fractions: y,
        })
    }

    /// Resolves a composition spec (mole weights) against the species set
    pub fn from_spec(
        species: &Arc<SpeciesSet>,
        spec: &CompositionSpec,
        temperature: f64,
        pressure: f64,
    ) -> Result<Self, MechanismError> {
        let mut x = vec![0.0; species.len()];
        for (name, weight) in spec.iter() {
            let k = species
                .species_index(name)
                .ok_or_else(|| MechanismError::UnknownSpecies(name.to_string()))?;
            x[k] += weight;
        }
        Self::from_mole_fractions(species, x, temperature, pressure)
    }

    /// New state with the composition of `spec` at this state's temperature and pressure
    pub fn with_composition(&self, spec: &CompositionSpec) -> Result<Self, MechanismError> {
        Self::from_spec(&self.species, spec, self.temperature, self.pressure)
    }

    pub fn species(&self) -> &Arc<SpeciesSet> {
        &self.species
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn mole_fractions(&self) -> &DVector<f64> {
        &self.mole_fractions
    }

    pub fn mass_fractions(&self) -> &DVector<f64> {
        &self.mass_fractions
    }

    /// g/mol
    pub fn mean_molar_mass(&self) -> f64 {
        self.mole_fractions.dot(&self.species.molar_masses())
    }

    pub fn mole_fraction(&self, name: &str) -> f64 {
        self.species
            .species_index(name)
            .map_or(0.0, |k| self.mole_fractions[k])
    }

    pub fn mass_fraction(&self, name: &str) -> f64 {
        self.species
            .species_index(name)
            .map_or(0.0, |k| self.mass_fractions[k])
    }
}
