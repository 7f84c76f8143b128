/// Element-conservation based measures of a gas mixture relative to a fuel/oxidizer pair:
/// the Bilger mixture fraction and the local and global equivalence ratios.
///
/// All functions read an immutable [`MixtureState`](crate::Mechanism::mixture_state::MixtureState);
/// compositions needed along the way (the pure streams, the stoichiometric blend) are built as
/// new states, so the caller's state is never touched.
///
/// # Examples
/// ```
/// use MixFrac::Combustion::equivalence_ratio::{equivalence_ratio, equivalence_ratio_local};
/// use MixFrac::Combustion::mixture_fraction::mixture_fraction;
/// use MixFrac::Combustion::stoichiometry::blend;
/// use MixFrac::Mechanism::composition::CompositionSpec;
/// use MixFrac::Mechanism::mixture_state::MixtureState;
/// use MixFrac::Mechanism::species_set::SpeciesSet;
/// use std::sync::Arc;
///
/// let species = Arc::new(SpeciesSet::from_formulae(&["CH4", "O2", "N2", "CO", "CO2"]).unwrap());
/// let fuel: CompositionSpec = "CH4:1".parse().unwrap();
/// let air: CompositionSpec = "O2:0.21,N2:0.79".parse().unwrap();
/// let ambient = MixtureState::from_spec(&species, &air, 300.0, 1e5).unwrap();
/// let rich = blend(&ambient, 1.3, &fuel, &air).unwrap();
///
/// let z = mixture_fraction(&rich, &fuel, &air).unwrap();
/// assert!(z > 0.0 && z < 1.0);
/// assert!((equivalence_ratio_local(&rich) - 1.3).abs() < 1e-9);
/// assert!((equivalence_ratio(&rich, &fuel, &air).unwrap() - 1.3).abs() < 1e-9);
/// ```
pub mod element_counts;
pub mod equivalence_ratio;
pub mod mixture_fraction;
/// blends at a given equivalence ratio and idealized combustion products
pub mod stoichiometry;
mod combustion_tests;
