use crate::Mechanism::species_set::SpeciesSet;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

/// An element whose atoms are counted for mixture-fraction purposes.
///
/// `oxygen_demand` is the number of O2 molecules one atom consumes when fully oxidized
/// (C -> CO2, H -> H2O, S -> SO2); oxygen itself supplies O2 and has a negative demand.
/// The Bilger coupling weight of the element is twice its oxygen demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedElement {
    pub symbol: &'static str,
    pub oxygen_demand: f64,
}

impl TrackedElement {
    pub fn bilger_weight(&self) -> f64 {
        2.0 * self.oxygen_demand
    }
}

pub const TRACKED_ELEMENTS: [TrackedElement; 4] = [
    TrackedElement {
        symbol: "O",
        oxygen_demand: -0.5,
    },
    TrackedElement {
        symbol: "C",
        oxygen_demand: 1.0,
    },
    TrackedElement {
        symbol: "H",
        oxygen_demand: 0.25,
    },
    TrackedElement {
        symbol: "S",
        oxygen_demand: 1.0,
    },
];

/// Atoms of every tracked element per molecule of every species.
///
/// Rows follow `TRACKED_ELEMENTS`, columns follow the species order of the species set.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementCountTable {
    elements: Vec<TrackedElement>,
    row_of: HashMap<&'static str, usize>,
    counts: DMatrix<f64>,
}

impl ElementCountTable {
    pub fn elements(&self) -> &[TrackedElement] {
        &self.elements
    }

    pub fn n_species(&self) -> usize {
        self.counts.ncols()
    }

    /// elements x species
    pub fn counts(&self) -> &DMatrix<f64> {
        &self.counts
    }

    /// atoms of `symbol` per molecule of each species; None for an untracked element
    pub fn row(&self, symbol: &str) -> Option<DVector<f64>> {
        self.row_of
            .get(symbol)
            .map(|&i| self.counts.row(i).transpose())
    }

    pub fn bilger_weights(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.elements.len(),
            self.elements.iter().map(|e| e.bilger_weight()),
        )
    }

    /// Element totals for per-species amounts (moles per unit mass or per mole of mixture)
    pub fn element_totals(&self, species_amounts: &DVector<f64>) -> DVector<f64> {
        &self.counts * species_amounts
    }
}

/// Builds the element count table of a species set.
///
/// A tracked element the species set does not declare gets a row of zeros,
/// so mechanisms without sulfur (or without carbon) need no special treatment.
pub fn element_counts(species: &SpeciesSet) -> ElementCountTable {
    let elements: Vec<TrackedElement> = TRACKED_ELEMENTS.to_vec();
    let counts = DMatrix::from_fn(elements.len(), species.len(), |i, k| {
        let symbol = elements[i].symbol;
        if species.has_element(symbol) {
            species.n_atoms(k, symbol) as f64
        } else {
            0.0
        }
    });
    let row_of = elements
        .iter()
        .enumerate()
        .map(|(i, e)| (e.symbol, i))
        .collect();
    ElementCountTable {
        elements,
        row_of,
        counts,
    }
}
