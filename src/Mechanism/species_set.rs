use crate::Mechanism::mechanism_error::MechanismError;
use crate::Mechanism::molmass::{Groups, calculate_molar_mass, molar_mass_of_composition};
use log::info;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

/// One chemical species: name, formula, molar mass [g/mol] and atoms per molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    pub formula: String,
    pub molar_mass: f64,
    pub composition: HashMap<String, usize>,
}

impl Species {
    /// Species whose name is its formula ("CH4", "O2", "AR")
    pub fn from_formula(formula: &str) -> Result<Self, MechanismError> {
        Self::named(formula, formula, None)
    }

    /// Species with a name different from its formula, e.g. ("MeOH", "CH3OH")
    pub fn named(
        name: &str,
        formula: &str,
        groups: Option<&Groups>,
    ) -> Result<Self, MechanismError> {
        let (molar_mass, composition) = calculate_molar_mass(formula, groups)?;
        Ok(Self {
            name: name.to_string(),
            formula: formula.to_string(),
            molar_mass,
            composition,
        })
    }

    /// Species from an explicit atomic composition; molar mass follows from the periodic table.
    pub fn from_composition(
        name: &str,
        composition: HashMap<String, usize>,
    ) -> Result<Self, MechanismError> {
        let molar_mass = molar_mass_of_composition(name, &composition)?;
        Ok(Self {
            name: name.to_string(),
            formula: name.to_string(),
            molar_mass,
            composition,
        })
    }

    pub fn n_atoms(&self, element: &str) -> usize {
        self.composition.get(element).copied().unwrap_or(0)
    }
}

/// Ordered, immutable set of species together with the elements it declares.
///
/// The declared elements are the union of the elements of all species (in order of first
/// appearance) plus any extra elements the caller declares explicitly; a mechanism may
/// declare an element no species carries.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesSet {
    species: Vec<Species>,
    elements: Vec<String>,
    index: HashMap<String, usize>,
}

impl SpeciesSet {
    pub fn new(species: Vec<Species>, extra_elements: &[&str]) -> Result<Self, MechanismError> {
        if species.is_empty() {
            return Err(MechanismError::InvalidComposition(
                "species set is empty".to_string(),
            ));
        }
        let mut index = HashMap::new();
        for (k, s) in species.iter().enumerate() {
            if index.insert(s.name.clone(), k).is_some() {
                return Err(MechanismError::InvalidComposition(format!(
                    "species '{}' is listed twice",
                    s.name
                )));
            }
        }
        let mut elements: Vec<String> = Vec::new();
        for s in &species {
            let mut own: Vec<&String> = s.composition.keys().collect();
            own.sort();
            for element in own {
                if !elements.contains(element) {
                    elements.push(element.clone());
                }
            }
        }
        for element in extra_elements {
            if !elements.iter().any(|e| e == element) {
                elements.push(element.to_string());
            }
        }
        info!(
            "species set created: {} species, elements {:?}",
            species.len(),
            elements
        );
        Ok(Self {
            species,
            elements,
            index,
        })
    }

    pub fn from_formulae(formulae: &[&str]) -> Result<Self, MechanismError> {
        let species = formulae
            .iter()
            .map(|formula| Species::from_formula(formula))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(species, &[])
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn species_names(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn element_names(&self) -> &[String] {
        &self.elements
    }

    pub fn has_element(&self, element: &str) -> bool {
        self.elements.iter().any(|e| e == element)
    }

    /// exact name first, then a case-insensitive match ("ch4" finds "CH4")
    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied().or_else(|| {
            self.species
                .iter()
                .position(|s| s.name.eq_ignore_ascii_case(name))
        })
    }

    /// First species with exactly this atomic composition, e.g. [("C", 1), ("O", 2)] finds CO2
    pub fn find_by_composition(&self, composition: &[(&str, usize)]) -> Option<usize> {
        self.species.iter().position(|s| {
            let non_zero = s.composition.values().filter(|&&n| n > 0).count();
            non_zero == composition.iter().filter(|(_, n)| *n > 0).count()
                && composition.iter().all(|(e, n)| s.n_atoms(e) == *n)
        })
    }

    pub fn n_atoms(&self, k: usize, element: &str) -> usize {
        self.species.get(k).map_or(0, |s| s.n_atoms(element))
    }

    pub fn molar_masses(&self) -> DVector<f64> {
        DVector::from_iterator(self.len(), self.species.iter().map(|s| s.molar_mass))
    }

    /// species x declared elements matrix of atom counts
    pub fn composition_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.len(), self.elements.len(), |k, j| {
            self.species[k].n_atoms(&self.elements[j]) as f64
        })
    }
}
