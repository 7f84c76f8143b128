/// Chemistry data used by the mixture-fraction calculations: species sets built from
/// chemical formulae, composition specifications and immutable mixture states.
///
/// # Examples
/// ```
/// use MixFrac::Mechanism::composition::CompositionSpec;
/// use MixFrac::Mechanism::mixture_state::MixtureState;
/// use MixFrac::Mechanism::species_set::SpeciesSet;
/// use std::sync::Arc;
///
/// let species = Arc::new(SpeciesSet::from_formulae(&["CH4", "O2", "N2"]).unwrap());
/// let air: CompositionSpec = "O2:0.21,N2:0.79".parse().unwrap();
/// let state = MixtureState::from_spec(&species, &air, 300.0, 1e5).unwrap();
/// assert!((state.mole_fraction("O2") - 0.21).abs() < 1e-12);
/// assert!(state.mass_fraction("O2") > 0.21);
/// ```
pub mod composition;
pub mod mechanism_error;
/// Module to calculate the atomic composition and molar mass of a chemical formula
///
///  # Examples
/// ```
/// use MixFrac::Mechanism::molmass::calculate_molar_mass;
/// let (molar_mass, element_composition) = calculate_molar_mass("C6H8O6", None).unwrap();
/// assert_eq!(element_composition["C"], 6);
/// assert!((molar_mass - 176.12).abs() < 1e-2);
/// ```
pub mod molmass;
pub mod mixture_state;
pub mod species_set;
