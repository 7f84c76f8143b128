//! Derived compositions built from a fuel/oxidizer pair: blends at a given equivalence
//! ratio and the idealized complete-combustion products of a state.
use crate::Combustion::element_counts::{ElementCountTable, element_counts};
use crate::Combustion::mixture_fraction::elemental_specific_moles;
use crate::Mechanism::composition::CompositionSpec;
use crate::Mechanism::mechanism_error::MechanismError;
use crate::Mechanism::mixture_state::MixtureState;
use crate::Mechanism::species_set::SpeciesSet;
use log::{debug, info};
use std::collections::HashMap;

/// Net O2 needed to fully oxidize one gram of the mixture [mol/g]; negative for
/// mixtures carrying more oxygen than they need.
pub fn oxygen_demand_per_mass(table: &ElementCountTable, state: &MixtureState) -> f64 {
    let z = elemental_specific_moles(table, state);
    table
        .elements()
        .iter()
        .enumerate()
        .map(|(i, element)| element.oxygen_demand * z[i])
        .sum()
}

/// Blend of fuel and oxidizer at equivalence ratio `phi`, at the temperature and pressure of
/// `template` (whose composition is not used).
///
/// Mass basis: F/O = phi * (-r_ox) / r_fuel with r the net O2 demand per gram, so the fuel
/// must need oxygen and the oxidizer must supply it.
pub fn blend(
    template: &MixtureState,
    phi: f64,
    fuel: &CompositionSpec,
    oxidizer: &CompositionSpec,
) -> Result<MixtureState, MechanismError> {
    let table = element_counts(template.species());
    blend_with_table(&table, template, phi, fuel, oxidizer)
}

pub(crate) fn blend_with_table(
    table: &ElementCountTable,
    template: &MixtureState,
    phi: f64,
    fuel: &CompositionSpec,
    oxidizer: &CompositionSpec,
) -> Result<MixtureState, MechanismError> {
    if !(phi.is_finite() && phi >= 0.0) {
        return Err(MechanismError::InvalidEquivalenceRatio(phi));
    }
    let fuel_state = template.with_composition(fuel)?;
    let oxidizer_state = template.with_composition(oxidizer)?;
    let fuel_demand = oxygen_demand_per_mass(table, &fuel_state);
    let oxidizer_demand = oxygen_demand_per_mass(table, &oxidizer_state);
    if fuel_demand <= 0.0 || oxidizer_demand >= 0.0 {
        return Err(MechanismError::NoStoichiometricBlend {
            fuel_demand,
            oxidizer_demand,
        });
    }
    let fuel_to_oxidizer = phi * (-oxidizer_demand) / fuel_demand;
    debug!("blend at phi = {}: fuel/oxidizer mass ratio {}", phi, fuel_to_oxidizer);
    let y = (fuel_state.mass_fractions() * fuel_to_oxidizer + oxidizer_state.mass_fractions())
        / (1.0 + fuel_to_oxidizer);
    MixtureState::from_mass_fractions(
        template.species(),
        y.iter().copied().collect(),
        template.temperature(),
        template.pressure(),
    )
}

fn add_product(
    species: &SpeciesSet,
    moles: &mut [f64],
    label: &str,
    composition: &[(&str, usize)],
    amount: f64,
) -> Result<(), MechanismError> {
    if amount <= 0.0 {
        return Ok(());
    }
    let k = species
        .find_by_composition(composition)
        .ok_or_else(|| MechanismError::MissingProductSpecies(label.to_string()))?;
    moles[k] += amount;
    Ok(())
}

/// Idealized burnt state of `state`: every atom is kept, C/H/O/S are redistributed over
/// major products, every other element ends up in its pure species (N -> N2, Ar -> Ar).
///
/// Sulfur goes to SO2 first. With O* the remaining oxygen:
/// - lean, O* >= 2C + H/2: CO2, H2O and the excess as O2
/// - rich, C + H/2 <= O* < 2C + H/2: CO2 and CO, H2O
/// - very rich, C <= O* < C + H/2: CO, H2O and H2
/// - O* < C is rejected, solid carbon would form.
pub fn complete_combustion(state: &MixtureState) -> Result<MixtureState, MechanismError> {
    let species = state.species();
    let x = state.mole_fractions();

    // atoms per mole of mixture
    let mut pool: HashMap<&str, f64> = HashMap::new();
    for element in species.element_names() {
        let atoms: f64 = (0..species.len())
            .map(|k| species.n_atoms(k, element) as f64 * x[k])
            .sum();
        pool.insert(element.as_str(), atoms);
    }
    let atoms_of = |e: &str| pool.get(e).copied().unwrap_or(0.0);
    let (c, h, o, s) = (atoms_of("C"), atoms_of("H"), atoms_of("O"), atoms_of("S"));

    let mut moles = vec![0.0; species.len()];
    add_product(species, &mut moles, "SO2", &[("S", 1), ("O", 2)], s)?;
    let oxygen = o - 2.0 * s;
    if oxygen < c {
        return Err(MechanismError::OxygenDeficient { carbon: c, oxygen });
    }
    if oxygen >= 2.0 * c + 0.5 * h {
        add_product(species, &mut moles, "CO2", &[("C", 1), ("O", 2)], c)?;
        add_product(species, &mut moles, "H2O", &[("H", 2), ("O", 1)], 0.5 * h)?;
        add_product(
            species,
            &mut moles,
            "O2",
            &[("O", 2)],
            0.5 * (oxygen - 2.0 * c - 0.5 * h),
        )?;
    } else if oxygen >= c + 0.5 * h {
        let co2 = oxygen - c - 0.5 * h;
        add_product(species, &mut moles, "CO2", &[("C", 1), ("O", 2)], co2)?;
        add_product(species, &mut moles, "CO", &[("C", 1), ("O", 1)], c - co2)?;
        add_product(species, &mut moles, "H2O", &[("H", 2), ("O", 1)], 0.5 * h)?;
    } else {
        let h2o = oxygen - c;
        add_product(species, &mut moles, "CO", &[("C", 1), ("O", 1)], c)?;
        add_product(species, &mut moles, "H2O", &[("H", 2), ("O", 1)], h2o)?;
        add_product(species, &mut moles, "H2", &[("H", 2)], 0.5 * (h - 2.0 * h2o))?;
    }

    for element in species.element_names() {
        if ["C", "H", "O", "S"].contains(&element.as_str()) {
            continue;
        }
        let atoms = atoms_of(element.as_str());
        if atoms <= 0.0 {
            continue;
        }
        // the pure-element species with the fewest atoms per molecule (Ar, N2, ...)
        let carrier = species
            .species()
            .iter()
            .enumerate()
            .filter(|(_, sp)| sp.composition.len() == 1 && sp.n_atoms(element) > 0)
            .min_by_key(|(_, sp)| sp.n_atoms(element))
            .map(|(k, sp)| (k, sp.n_atoms(element)));
        let (k, n) = carrier.ok_or_else(|| MechanismError::MissingProductSpecies(element.clone()))?;
        moles[k] += atoms / n as f64;
    }

    info!(
        "complete combustion: C = {:.4e}, H = {:.4e}, O = {:.4e}, S = {:.4e} per mole of mixture",
        c, h, o, s
    );
    MixtureState::from_mole_fractions(species, moles, state.temperature(), state.pressure())
}
