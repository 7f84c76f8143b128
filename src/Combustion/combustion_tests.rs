#[cfg(test)]
mod tests {
    use crate::Combustion::element_counts::{TRACKED_ELEMENTS, element_counts};
    use crate::Combustion::equivalence_ratio::{
        ReferencePair, equivalence_ratio, equivalence_ratio_local,
        equivalence_ratio_oxidizer_species, equivalence_ratio_with,
    };
    use crate::Combustion::mixture_fraction::{
        MixtureFractionError, elemental_specific_moles, mixture_fraction,
    };
    use crate::Combustion::stoichiometry::{blend, complete_combustion};
    use crate::Mechanism::composition::CompositionSpec;
    use crate::Mechanism::mechanism_error::MechanismError;
    use crate::Mechanism::mixture_state::MixtureState;
    use crate::Mechanism::species_set::SpeciesSet;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    const T: f64 = 300.0;
    const P: f64 = 1e5;

    fn spec(s: &str) -> CompositionSpec {
        s.parse().unwrap()
    }

    fn species(formulae: &[&str]) -> Arc<SpeciesSet> {
        Arc::new(SpeciesSet::from_formulae(formulae).unwrap())
    }

    fn methane_air() -> (Arc<SpeciesSet>, CompositionSpec, CompositionSpec) {
        (
            species(&["CH4", "O2", "N2", "CO", "CO2"]),
            spec("CH4:1"),
            spec("O2:0.21,N2:0.79"),
        )
    }

    // fuel and oxidizer both carry fuel species, O2 and products
    fn general_mixture() -> (Arc<SpeciesSet>, CompositionSpec, CompositionSpec) {
        (
            species(&["CH4", "O2", "N2", "CO", "CO2", "H2O", "H2"]),
            spec("CH4:0.2,O2:0.02,N2:0.1,CO:0.05,CO2:0.02"),
            spec("O2:0.21,N2:0.79,CO:0.04,CH4:0.01,CO2:0.03"),
        )
    }

    fn state_of(species: &Arc<SpeciesSet>, composition: &CompositionSpec) -> MixtureState {
        MixtureState::from_spec(species, composition, T, P).unwrap()
    }

    //////////////////////////////// element counts ////////////////////////////////

    #[test]
    fn test_element_counts_idempotent() {
        let (species, _, _) = general_mixture();
        let first = element_counts(&species);
        let second = element_counts(&species);
        assert_eq!(first, second);
        for (a, b) in first.counts().iter().zip(second.counts().iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        assert_eq!(first.n_species(), species.len());
        assert_eq!(first.elements().len(), TRACKED_ELEMENTS.len());
    }

    #[test]
    fn test_element_counts_values() {
        let (species, _, _) = methane_air();
        let table = element_counts(&species);
        // CH4, O2, N2, CO, CO2
        assert_eq!(table.row("C").unwrap().as_slice(), &[1.0, 0.0, 0.0, 1.0, 1.0]);
        assert_eq!(table.row("H").unwrap().as_slice(), &[4.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(table.row("O").unwrap().as_slice(), &[0.0, 2.0, 0.0, 1.0, 2.0]);
        assert!(table.row("N").is_none());
    }

    #[test]
    fn test_missing_elements_give_zero_rows() {
        let (species, _, _) = methane_air();
        let table = element_counts(&species);
        assert!(table.row("S").unwrap().iter().all(|&n| n == 0.0));

        let hydrogen = species_with_no_carbon();
        let table = element_counts(&hydrogen);
        assert!(table.row("C").unwrap().iter().all(|&n| n == 0.0));
        assert!(table.row("S").unwrap().iter().all(|&n| n == 0.0));
        assert_eq!(table.row("H").unwrap().as_slice(), &[2.0, 0.0, 0.0, 2.0]);
    }

    fn species_with_no_carbon() -> Arc<SpeciesSet> {
        species(&["H2", "O2", "N2", "H2O"])
    }

    #[test]
    fn test_bilger_weights() {
        let (species, _, _) = methane_air();
        let weights = element_counts(&species).bilger_weights();
        // O, C, H, S
        assert_eq!(weights.as_slice(), &[-1.0, 2.0, 0.5, 2.0]);
    }

    //////////////////////////////// mixture fraction ////////////////////////////////

    #[test]
    fn test_elemental_specific_moles() {
        let (species, fuel, _) = methane_air();
        let table = element_counts(&species);
        let z = elemental_specific_moles(&table, &state_of(&species, &fuel));
        let m_ch4 = species.molar_masses()[0];
        assert_relative_eq!(z[1], 1.0 / m_ch4, epsilon = 1e-15);
        assert_relative_eq!(z[2], 4.0 / m_ch4, epsilon = 1e-15);
        assert_eq!(z[0], 0.0);
        assert_eq!(z[3], 0.0);
    }

    #[test]
    fn test_mixture_fraction_pure_streams() {
        for (species, fuel, oxidizer) in [methane_air(), general_mixture()] {
            let pure_fuel = state_of(&species, &fuel);
            let pure_oxidizer = state_of(&species, &oxidizer);
            assert_eq!(mixture_fraction(&pure_fuel, &fuel, &oxidizer).unwrap(), 1.0);
            assert_eq!(mixture_fraction(&pure_oxidizer, &fuel, &oxidizer).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_mixture_fraction_is_fuel_stream_mass_fraction() {
        let (species, fuel, oxidizer) = methane_air();
        let ambient = state_of(&species, &oxidizer);
        let m = species.molar_masses();
        let (m_ch4, m_o2, m_n2) = (m[0], m[1], m[2]);
        let fuel_to_air_st = m_ch4 / (2.0 * (m_o2 + 0.79 / 0.21 * m_n2));
        for phi in [0.5, 1.0, 1.3, 2.0] {
            let mixture = blend(&ambient, phi, &fuel, &oxidizer).unwrap();
            let fuel_to_air = phi * fuel_to_air_st;
            let z = mixture_fraction(&mixture, &fuel, &oxidizer).unwrap();
            assert_relative_eq!(z, fuel_to_air / (1.0 + fuel_to_air), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_mixture_fraction_scaling_invariance() {
        for (species, fuel, oxidizer) in [methane_air(), general_mixture()] {
            let ambient = state_of(&species, &oxidizer);
            let mixture = blend(&ambient, 0.7, &fuel, &oxidizer).unwrap();
            let z = mixture_fraction(&mixture, &fuel, &oxidizer).unwrap();
            let fuel_scaled = fuel.scaled(7.5).unwrap();
            let oxidizer_scaled = oxidizer.scaled(0.01).unwrap();
            assert_relative_eq!(
                mixture_fraction(&mixture, &fuel_scaled, &oxidizer).unwrap(),
                z,
                epsilon = 1e-12
            );
            assert_relative_eq!(
                mixture_fraction(&mixture, &fuel, &oxidizer_scaled).unwrap(),
                z,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_mixture_fraction_degenerate_reference() {
        let (species, fuel, oxidizer) = methane_air();
        let mixture = blend(&state_of(&species, &oxidizer), 1.0, &fuel, &oxidizer).unwrap();
        let nitrogen = spec("N2:1");
        assert_eq!(
            mixture_fraction(&mixture, &nitrogen, &nitrogen),
            Err(MixtureFractionError::DegenerateReference)
        );
        assert_eq!(
            mixture_fraction(&mixture, &spec("O2:2"), &spec("O2:1")),
            Err(MixtureFractionError::DegenerateReference)
        );
        assert_eq!(
            mixture_fraction(&mixture, &oxidizer, &oxidizer),
            Err(MixtureFractionError::DegenerateReference)
        );
    }

    #[test]
    fn test_mixture_fraction_near_degenerate_reference_is_not_guarded() {
        let (species, _, oxidizer) = methane_air();
        let almost_air = spec("O2:0.21,N2:0.79,CH4:1e-12");
        let mixture = state_of(&species, &spec("CH4:1,O2:2,N2:7.52"));
        let z = mixture_fraction(&mixture, &almost_air, &oxidizer).unwrap();
        assert!(z.is_finite());
        assert!(z.abs() > 1e6);
    }

    #[test]
    fn test_mixture_fraction_unknown_species() {
        let (species, fuel, oxidizer) = methane_air();
        let mixture = state_of(&species, &oxidizer);
        assert_eq!(
            mixture_fraction(&mixture, &spec("C3H8:1"), &oxidizer),
            Err(MixtureFractionError::Mechanism(
                MechanismError::UnknownSpecies("C3H8".to_string())
            ))
        );
        assert!(mixture_fraction(&mixture, &fuel, &oxidizer).is_ok());
    }

    #[test]
    fn test_state_is_not_modified() {
        let (species, fuel, oxidizer) = general_mixture();
        let mixture = blend(&state_of(&species, &oxidizer), 1.3, &fuel, &oxidizer).unwrap();
        let before = mixture.clone();
        mixture_fraction(&mixture, &fuel, &oxidizer).unwrap();
        equivalence_ratio(&mixture, &fuel, &oxidizer).unwrap();
        equivalence_ratio_local(&mixture);
        assert_eq!(mixture, before);
        // the failing path leaves it alone as well
        let _ = mixture_fraction(&mixture, &oxidizer, &oxidizer);
        assert_eq!(mixture, before);
    }

    //////////////////////////////// equivalence ratio ////////////////////////////////

    #[test]
    fn test_stoichiometric_blend_gives_unity() {
        for (species, fuel, oxidizer) in [methane_air(), general_mixture()] {
            let stoichiometric =
                blend(&state_of(&species, &oxidizer), 1.0, &fuel, &oxidizer).unwrap();
            assert_relative_eq!(equivalence_ratio_local(&stoichiometric), 1.0, epsilon = 1e-6);
            assert_relative_eq!(
                equivalence_ratio(&stoichiometric, &fuel, &oxidizer).unwrap(),
                1.0,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_methane_air_at_phi_1_3() {
        let (species, fuel, oxidizer) = methane_air();
        let mixture = blend(&state_of(&species, &oxidizer), 1.3, &fuel, &oxidizer).unwrap();
        assert_relative_eq!(equivalence_ratio_local(&mixture), 1.3, epsilon = 1e-3);
        assert_relative_eq!(
            equivalence_ratio(&mixture, &fuel, &oxidizer).unwrap(),
            1.3,
            epsilon = 1e-3
        );
        let z = mixture_fraction(&mixture, &fuel, &oxidizer).unwrap();
        assert!(z > 0.0 && z < 1.0);
        // CH4 + 2 (O2 + 3.76 N2) scaled by 1.3 on the fuel side
        let m = species.molar_masses();
        let fuel_to_air = 1.3 * m[0] / (2.0 * (m[1] + 0.79 / 0.21 * m[2]));
        assert_relative_eq!(z, fuel_to_air / (1.0 + fuel_to_air), epsilon = 1e-9);
    }

    #[test]
    fn test_general_mixture_reference_phi_follows_blend() {
        let (species, fuel, oxidizer) = general_mixture();
        let ambient = state_of(&species, &oxidizer);
        for phi in [0.3, 1.3, 3.0] {
            let mixture = blend(&ambient, phi, &fuel, &oxidizer).unwrap();
            assert_relative_eq!(
                equivalence_ratio(&mixture, &fuel, &oxidizer).unwrap(),
                phi,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_pure_streams_equivalence_ratio() {
        for (species, fuel, oxidizer) in [methane_air(), general_mixture()] {
            let pure_fuel = state_of(&species, &fuel);
            let pure_oxidizer = state_of(&species, &oxidizer);
            assert_eq!(
                equivalence_ratio(&pure_fuel, &fuel, &oxidizer).unwrap(),
                f64::INFINITY
            );
            assert_eq!(equivalence_ratio(&pure_oxidizer, &fuel, &oxidizer).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_local_equivalence_ratio_limits() {
        let (species, fuel, oxidizer) = methane_air();
        assert_eq!(equivalence_ratio_local(&state_of(&species, &fuel)), f64::INFINITY);
        assert_eq!(equivalence_ratio_local(&state_of(&species, &oxidizer)), 0.0);
        // inert only: no oxygen at all is the +inf limit as well
        assert_eq!(
            equivalence_ratio_local(&state_of(&species, &spec("N2:1"))),
            f64::INFINITY
        );
        // CO alone needs half of the oxygen it carries
        assert_relative_eq!(
            equivalence_ratio_local(&state_of(&species, &spec("CO:1"))),
            2.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_degenerate_reference_propagates() {
        let (species, _, oxidizer) = methane_air();
        let mixture = state_of(&species, &oxidizer);
        let nitrogen = spec("N2:1");
        assert_eq!(
            equivalence_ratio(&mixture, &nitrogen, &nitrogen),
            Err(MixtureFractionError::DegenerateReference)
        );
    }

    #[test]
    fn test_fuel_without_oxygen_demand_cannot_be_blended() {
        let (species, _, oxidizer) = methane_air();
        let mixture = state_of(&species, &oxidizer);
        let result = equivalence_ratio(&mixture, &spec("N2:1"), &oxidizer);
        assert!(matches!(
            result,
            Err(MixtureFractionError::Mechanism(
                MechanismError::NoStoichiometricBlend { .. }
            ))
        ));
        assert_eq!(
            blend(&mixture, -1.0, &spec("CH4:1"), &oxidizer),
            Err(MechanismError::InvalidEquivalenceRatio(-1.0))
        );
    }

    #[test]
    fn test_equivalence_ratio_with_dispatch() {
        let (species, fuel, oxidizer) = general_mixture();
        let mixture = blend(&state_of(&species, &oxidizer), 1.3, &fuel, &oxidizer).unwrap();
        assert_eq!(
            equivalence_ratio_with(&mixture, None).unwrap(),
            equivalence_ratio_local(&mixture)
        );
        let pair = ReferencePair {
            fuel: &fuel,
            oxidizer: &oxidizer,
        };
        assert_eq!(
            equivalence_ratio_with(&mixture, Some(pair)).unwrap(),
            equivalence_ratio(&mixture, &fuel, &oxidizer).unwrap()
        );
    }

    #[test]
    fn test_oxidizer_species_ratio_of_fresh_mixture() {
        let (species, fuel, oxidizer) = methane_air();
        let mixture = blend(&state_of(&species, &oxidizer), 1.3, &fuel, &oxidizer).unwrap();
        assert_relative_eq!(
            equivalence_ratio_oxidizer_species(&mixture, None, &[]),
            1.3,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            equivalence_ratio_oxidizer_species(&mixture, Some(&["O2"]), &["N2"]),
            1.3,
            epsilon = 1e-9
        );
        // ignoring the fuel leaves nothing to burn
        assert_eq!(
            equivalence_ratio_oxidizer_species(&mixture, None, &["CH4"]),
            0.0
        );
    }

    //////////////////////////////// reaction step ////////////////////////////////

    fn burnable() -> (Arc<SpeciesSet>, CompositionSpec, CompositionSpec) {
        (
            species(&["CH4", "O2", "N2", "CO", "CO2", "H2O", "H2"]),
            spec("CH4:1"),
            spec("O2:0.21,N2:0.79"),
        )
    }

    #[test]
    fn test_before_reaction() {
        let (species, fuel, oxidizer) = burnable();
        let ambient = state_of(&species, &oxidizer);
        for phi in [0.8, 1.0, 1.3] {
            let fresh = blend(&ambient, phi, &fuel, &oxidizer).unwrap();
            assert_relative_eq!(equivalence_ratio_local(&fresh), phi, epsilon = 1e-9);
            assert_relative_eq!(
                equivalence_ratio(&fresh, &fuel, &oxidizer).unwrap(),
                phi,
                epsilon = 1e-9
            );
            assert_relative_eq!(
                equivalence_ratio_oxidizer_species(&fresh, None, &[]),
                phi,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_after_reaction() {
        let (species, fuel, oxidizer) = burnable();
        let ambient = state_of(&species, &oxidizer);
        for phi in [0.8, 1.0, 1.3] {
            let fresh = blend(&ambient, phi, &fuel, &oxidizer).unwrap();
            let burnt = complete_combustion(&fresh).unwrap();
            assert_eq!(burnt.mole_fraction("CH4"), 0.0);
            assert!(burnt.mole_fraction("CO2") > 0.0);

            // element totals are conserved, so are the element based measures
            assert_relative_eq!(
                mixture_fraction(&burnt, &fuel, &oxidizer).unwrap(),
                mixture_fraction(&fresh, &fuel, &oxidizer).unwrap(),
                epsilon = 1e-12
            );
            assert_relative_eq!(
                equivalence_ratio(&burnt, &fuel, &oxidizer).unwrap(),
                phi,
                epsilon = 1e-9
            );
            // the local ratio is recomputed from the products; complete combustion keeps
            // the element totals it is built from
            assert_relative_eq!(equivalence_ratio_local(&burnt), phi, epsilon = 1e-9);
        }

        // the species based ratio sees that the oxidizer species were consumed
        let lean = complete_combustion(&blend(&ambient, 0.8, &fuel, &oxidizer).unwrap()).unwrap();
        assert_eq!(equivalence_ratio_oxidizer_species(&lean, None, &[]), 0.0);
        let stoichiometric =
            complete_combustion(&blend(&ambient, 1.0, &fuel, &oxidizer).unwrap()).unwrap();
        // 0 / 0 up to rounding in the product split
        let legacy = equivalence_ratio_oxidizer_species(&stoichiometric, None, &[]);
        assert!(!(legacy > 0.5 && legacy < 1.5));
        let rich = complete_combustion(&blend(&ambient, 1.3, &fuel, &oxidizer).unwrap()).unwrap();
        assert_eq!(
            equivalence_ratio_oxidizer_species(&rich, None, &[]),
            f64::INFINITY
        );
    }

    #[test]
    fn test_complete_combustion_products() {
        let (species, fuel, oxidizer) = burnable();
        let ambient = state_of(&species, &oxidizer);

        // CH4 + 2 O2 + 7.52 N2 -> CO2 + 2 H2O + 7.52 N2
        let burnt = complete_combustion(&blend(&ambient, 1.0, &fuel, &oxidizer).unwrap()).unwrap();
        assert_relative_eq!(
            burnt.mole_fraction("H2O") / burnt.mole_fraction("CO2"),
            2.0,
            epsilon = 1e-9
        );
        assert!(burnt.mole_fraction("O2") < 1e-12);
        assert!(burnt.mole_fraction("CO") < 1e-12);

        // far too rich for CO2: CO, H2O and H2
        let very_rich = complete_combustion(&state_of(&species, &spec("CH4:1,O2:1"))).unwrap();
        assert_relative_eq!(very_rich.mole_fraction("CO"), 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(very_rich.mole_fraction("H2O"), 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(very_rich.mole_fraction("H2"), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_complete_combustion_errors() {
        let (species, fuel, _) = burnable();
        assert!(matches!(
            complete_combustion(&state_of(&species, &fuel)),
            Err(MechanismError::OxygenDeficient { .. })
        ));

        let (no_products, fuel, oxidizer) = (
            species_no_co2(),
            spec("CH4:1"),
            spec("O2:0.21,N2:0.79"),
        );
        let fresh = blend(&state_of(&no_products, &oxidizer), 0.8, &fuel, &oxidizer).unwrap();
        assert_eq!(
            complete_combustion(&fresh),
            Err(MechanismError::MissingProductSpecies("CO2".to_string()))
        );
    }

    fn species_no_co2() -> Arc<SpeciesSet> {
        species(&["CH4", "O2", "N2"])
    }

    #[test]
    fn test_sulfur_is_tracked() {
        let species = species(&["H2S", "O2", "N2", "AR", "SO2", "H2O", "H2"]);
        let fuel = spec("H2S:1");
        let oxidizer = spec("O2:0.21,N2:0.78,AR:0.01");
        let ambient = state_of(&species, &oxidizer);
        let table = element_counts(&species);
        assert_eq!(table.row("S").unwrap().as_slice(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

        // H2S + 1.5 O2 -> SO2 + H2O
        let stoichiometric = blend(&ambient, 1.0, &fuel, &oxidizer).unwrap();
        assert_relative_eq!(
            stoichiometric.mole_fraction("O2") / stoichiometric.mole_fraction("H2S"),
            1.5,
            epsilon = 1e-9
        );
        assert_relative_eq!(equivalence_ratio_local(&stoichiometric), 1.0, epsilon = 1e-9);
        assert_relative_eq!(
            equivalence_ratio(&stoichiometric, &fuel, &oxidizer).unwrap(),
            1.0,
            epsilon = 1e-9
        );

        let burnt = complete_combustion(&stoichiometric).unwrap();
        assert_relative_eq!(
            burnt.mole_fraction("SO2"),
            burnt.mole_fraction("H2O"),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            burnt.mole_fraction("AR"),
            stoichiometric.mole_fraction("AR") * stoichiometric_moles_ratio(&stoichiometric),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            mixture_fraction(&burnt, &fuel, &oxidizer).unwrap(),
            mixture_fraction(&stoichiometric, &fuel, &oxidizer).unwrap(),
            epsilon = 1e-12
        );
    }

    // H2S + 1.5 O2 -> SO2 + H2O changes 2.5 moles into 2
    fn stoichiometric_moles_ratio(fresh: &MixtureState) -> f64 {
        let x_h2s = fresh.mole_fraction("H2S");
        1.0 / (1.0 - 0.5 * x_h2s)
    }
}
