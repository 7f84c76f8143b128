use crate::Combustion::element_counts::{ElementCountTable, element_counts};
use crate::Mechanism::composition::CompositionSpec;
use crate::Mechanism::mechanism_error::MechanismError;
use crate::Mechanism::mixture_state::MixtureState;
use log::debug;
use nalgebra::DVector;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MixtureFractionError {
    /// The Bilger denominator is exactly zero: fuel and oxidizer carry the same elements
    /// in the same amounts, so no mixture fraction exists.
    #[error("fuel and oxidizer have the same elemental composition")]
    DegenerateReference,

    #[error(transparent)]
    Mechanism(#[from] MechanismError),
}

/// Moles of each tracked element per gram of mixture: Z_E = sum_k Y_k / M_k * n_E,k
pub fn elemental_specific_moles(table: &ElementCountTable, state: &MixtureState) -> DVector<f64> {
    let specific_moles = state
        .mass_fractions()
        .component_div(&state.species().molar_masses());
    table.element_totals(&specific_moles)
}

// Bilger coupling difference 2(C - C_ox) + 0.5(H - H_ox) + 2(S - S_ox) - (O - O_ox)
fn coupling_difference(table: &ElementCountTable, z: &DVector<f64>, z_ox: &DVector<f64>) -> f64 {
    table
        .elements()
        .iter()
        .enumerate()
        .map(|(i, element)| element.bilger_weight() * (z[i] - z_ox[i]))
        .sum()
}

/// Bilger mixture fraction of `state` with respect to the given fuel and oxidizer streams.
///
/// Fuel and oxidizer are resolved at the temperature and pressure of `state`; the state
/// itself is only read. A denominator that is exactly zero is reported as
/// [`MixtureFractionError::DegenerateReference`]; a tiny non-zero denominator is not
/// guarded and may give results of very large magnitude.
pub fn mixture_fraction(
    state: &MixtureState,
    fuel: &CompositionSpec,
    oxidizer: &CompositionSpec,
) -> Result<f64, MixtureFractionError> {
    let table = element_counts(state.species());
    mixture_fraction_with_table(&table, state, fuel, oxidizer)
}

// `table` must come from the species set of `state`
pub(crate) fn mixture_fraction_with_table(
    table: &ElementCountTable,
    state: &MixtureState,
    fuel: &CompositionSpec,
    oxidizer: &CompositionSpec,
) -> Result<f64, MixtureFractionError> {
    let fuel_state = state.with_composition(fuel)?;
    let oxidizer_state = state.with_composition(oxidizer)?;

    let z = elemental_specific_moles(table, state);
    let z_fuel = elemental_specific_moles(table, &fuel_state);
    let z_oxidizer = elemental_specific_moles(table, &oxidizer_state);

    let denominator = coupling_difference(table, &z_fuel, &z_oxidizer);
    if denominator == 0.0 {
        return Err(MixtureFractionError::DegenerateReference);
    }
    let mixture_fraction = coupling_difference(table, &z, &z_oxidizer) / denominator;
    debug!(
        "Z = {} (Z_E = {:?}, fuel {:?}, oxidizer {:?})",
        mixture_fraction,
        z.as_slice(),
        z_fuel.as_slice(),
        z_oxidizer.as_slice()
    );
    Ok(mixture_fraction)
}
