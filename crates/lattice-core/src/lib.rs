//! # latticegpm
//!
//! Genotype-phenotype maps for the two-dimensional lattice protein model.
//!
//! Given a wildtype and a mutant sequence, the library enumerates the sequence space between
//! them, folds every sequence onto an ensemble of self-avoiding lattice walks and derives its
//! thermodynamic phenotypes: native energy, partition function, stability and fraction folded.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Immutable models (`Sequence`, `Conformation`), the pairwise
//!   contact energy table, contact extraction and fold scoring, conformation enumeration,
//!   sequence-space utilities, the genotype-phenotype container and fold diagrams.
//!
//! - **[`engine`]: The Thermodynamics Core.** Reduces a sequence and an ensemble of
//!   conformations to a `ThermodynamicState`, and holds configuration, progress reporting
//!   and the engine error type.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures: building a lattice
//!   genotype-phenotype map and searching a landscape for pairs of folding sequences.

pub mod core;
pub mod engine;
pub mod workflows;
