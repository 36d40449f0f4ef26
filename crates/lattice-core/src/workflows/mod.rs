//! # Workflows Module
//!
//! End-to-end procedures built on the core models and the thermodynamics engine.
//!
//! - **Map Workflow** ([`map`]) - Folds every genotype between a wildtype and a mutant and
//!   stores the chosen phenotype in a [`map::LatticeGenotypePhenotypeMap`]
//! - **Search Workflow** ([`search`]) - Randomly searches sequence space for two sequences
//!   that both fold below a stability threshold

pub mod map;
pub mod search;
