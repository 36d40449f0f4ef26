//! # Core Module
//!
//! Stateless building blocks of the lattice protein model.
//!
//! - **Models** ([`models`]) - Amino acids, sequences, lattice moves and conformations
//! - **Energies** ([`energy`]) - Contact energy table, contact extraction and fold scoring
//! - **Conformations** ([`conformations`]) - Enumeration of self-avoiding walks
//! - **Sequence Space** ([`space`]) - Mutations between two sequences and the genotypes they span
//! - **I/O** ([`io`]) - The genotype-phenotype container and its JSON persistence
//! - **Drawing** ([`drawing`]) - Text and SVG diagrams of a folded chain

pub mod conformations;
pub mod drawing;
pub mod energy;
pub mod io;
pub mod models;
pub mod space;
