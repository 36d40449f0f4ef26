//! Genotype-phenotype storage and its persistence.
//!
//! [`containers::GenotypePhenotypeMap`] keeps the genotypes of a sequence space next to one
//! phenotype value each. [`json::JsonRecord`] writes such records as plain JSON (strings,
//! numbers, lists and booleans) and validates them again on the way back in.

pub mod containers;
pub mod json;
