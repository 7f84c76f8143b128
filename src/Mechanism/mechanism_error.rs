use thiserror::Error;

/// Errors of the chemistry data layer: formula parsing, species lookup,
/// composition validation and building derived compositions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MechanismError {
    #[error("cannot parse formula '{formula}': {reason}")]
    FormulaParse { formula: String, reason: String },

    #[error("unknown element '{element}' in formula '{formula}'")]
    UnknownElement { element: String, formula: String },

    #[error("species '{0}' is not part of the species set")]
    UnknownSpecies(String),

    #[error("invalid composition: {0}")]
    InvalidComposition(String),

    #[error("expected {expected} values (one per species), got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("equivalence ratio must be finite and non-negative, got {0}")]
    InvalidEquivalenceRatio(f64),

    /// fuel needs no oxygen or oxidizer supplies none
    #[error(
        "fuel and oxidizer cannot be blended stoichiometrically (fuel O2 demand {fuel_demand:e}, oxidizer O2 demand {oxidizer_demand:e})"
    )]
    NoStoichiometricBlend {
        fuel_demand: f64,
        oxidizer_demand: f64,
    },

    #[error("product species {0} is required but missing from the species set")]
    MissingProductSpecies(String),

    #[error("not enough oxygen to turn carbon into CO (C = {carbon:e}, available O = {oxygen:e})")]
    OxygenDeficient { carbon: f64, oxygen: f64 },
}
