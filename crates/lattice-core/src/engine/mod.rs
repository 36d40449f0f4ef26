//! # Engine Module
//!
//! Turns contact energies into the statistical mechanics of a lattice protein.
//!
//! ## Overview
//!
//! For one sequence and an ensemble of candidate conformations, the engine scores every
//! member, sums the Boltzmann weights into a partition function and identifies the native
//! state. Stability is the free energy of the native state against the rest of the ensemble;
//! the fraction folded follows from it. A degenerate ground state is not an error: it yields
//! `folded = false` and zero stability so downstream phenotypes stay defined.
//!
//! ## Architecture
//!
//! - **Thermodynamics** ([`thermo`]) - The aggregator, its helpers and the immutable
//!   [`thermo::LatticeThermodynamics`] facade
//! - **Configuration** ([`config`]) - Builders for map and search workflows
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Domain errors and the aggregating engine error
//!
//! With the `parallel` feature, ensemble scoring is spread over a `rayon` thread pool.

pub mod config;
pub mod error;
pub mod progress;
pub mod thermo;
