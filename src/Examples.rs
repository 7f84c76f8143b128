/// comparison of the oxidizer-species, local and reference equivalence ratios and the
/// mixture fraction for fresh and burnt mixtures
pub mod mixture_examples;
