use crate::Combustion::element_counts::{ElementCountTable, element_counts};
use crate::Combustion::mixture_fraction::{MixtureFractionError, mixture_fraction_with_table};
use crate::Combustion::stoichiometry::blend_with_table;
use crate::Mechanism::composition::CompositionSpec;
use crate::Mechanism::mixture_state::MixtureState;
use log::debug;

/// Fuel and oxidizer streams that define a global equivalence ratio.
#[derive(Debug, Clone, Copy)]
pub struct ReferencePair<'a> {
    pub fuel: &'a CompositionSpec,
    pub oxidizer: &'a CompositionSpec,
}

/// Local equivalence ratio: O2 needed to burn every C, H and S atom of the mixture
/// over the O2 its oxygen atoms could supply.
///
/// Returns `+inf` when the mixture holds no oxygen at all.
pub fn equivalence_ratio_local(state: &MixtureState) -> f64 {
    let table = element_counts(state.species());
    equivalence_ratio_local_with_table(&table, state)
}

pub(crate) fn equivalence_ratio_local_with_table(
    table: &ElementCountTable,
    state: &MixtureState,
) -> f64 {
    let totals = table.element_totals(state.mole_fractions());
    let mut o2_required = 0.0;
    let mut o2_present = 0.0;
    for (i, element) in table.elements().iter().enumerate() {
        let o2 = element.oxygen_demand * totals[i];
        if element.oxygen_demand > 0.0 {
            o2_required += o2;
        } else {
            o2_present -= o2;
        }
    }
    if o2_present == 0.0 {
        return f64::INFINITY;
    }
    o2_required / o2_present
}

/// Global equivalence ratio of `state` with respect to a fuel/oxidizer pair, from the Bilger
/// mixture fraction Z and its stoichiometric value Z_st:
/// phi = Z / (1 - Z) * (1 - Z_st) / Z_st.
///
/// Pure oxidizer (Z = 0) gives 0, pure fuel (Z = 1) gives `+inf`. Errors of the
/// mixture-fraction evaluation are returned unchanged.
pub fn equivalence_ratio(
    state: &MixtureState,
    fuel: &CompositionSpec,
    oxidizer: &CompositionSpec,
) -> Result<f64, MixtureFractionError> {
    let table = element_counts(state.species());
    let z = mixture_fraction_with_table(&table, state, fuel, oxidizer)?;
    let stoichiometric = blend_with_table(&table, state, 1.0, fuel, oxidizer)?;
    let z_st = mixture_fraction_with_table(&table, &stoichiometric, fuel, oxidizer)?;
    debug!("Z = {}, Z_st = {}", z, z_st);

    if z == 0.0 {
        return Ok(0.0);
    }
    if z == 1.0 {
        return Ok(f64::INFINITY);
    }
    Ok(z / (1.0 - z) * (1.0 - z_st) / z_st)
}

/// Local estimate without a reference pair, global estimate with one.
pub fn equivalence_ratio_with(
    state: &MixtureState,
    reference: Option<ReferencePair<'_>>,
) -> Result<f64, MixtureFractionError> {
    match reference {
        None => Ok(equivalence_ratio_local(state)),
        Some(pair) => equivalence_ratio(state, pair.fuel, pair.oxidizer),
    }
}

/// Equivalence ratio counted over oxidizer *species* rather than elements.
///
/// Oxidizers default to every species without C, H or S atoms. Oxygen atoms of oxidizer
/// species are the supply; every other species contributes 2 n_C + n_H / 2 - n_O to the
/// demand. The result is `alpha / mol_O` with IEEE semantics (`inf` or `NaN` when no
/// oxidizer species is present). Unlike the element-based ratios this value changes when
/// the mixture reacts, e.g. burnt stoichiometric gas has no oxidizer species left.
pub fn equivalence_ratio_oxidizer_species(
    state: &MixtureState,
    oxidizers: Option<&[&str]>,
    ignore: &[&str],
) -> f64 {
    let x = state.mole_fractions();
    let mut alpha = 0.0;
    let mut mol_o = 0.0;
    for (k, species) in state.species().species().iter().enumerate() {
        let name = species.name.as_str();
        if ignore.contains(&name) {
            continue;
        }
        let is_oxidizer = match oxidizers {
            Some(list) => list.contains(&name),
            None => ["C", "H", "S"].iter().all(|e| species.n_atoms(e) == 0),
        };
        let n_o = species.n_atoms("O") as f64;
        if is_oxidizer {
            mol_o += n_o * x[k];
        } else {
            let n_c = species.n_atoms("C") as f64;
            let n_h = species.n_atoms("H") as f64;
            alpha += (2.0 * n_c + 0.5 * n_h - n_o) * x[k];
        }
    }
    alpha / mol_o
}
