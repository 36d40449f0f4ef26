//! # Energy Module
//!
//! Contact energies of a sequence folded onto a lattice conformation.
//!
//! - [`table`] - The symmetric pairwise [`table::InteractionTable`], defaulting to the
//!   Miyazawa-Jernigan matrix
//! - [`contacts`] - Lays a chain on the lattice and lists its non-covalent contacts
//! - [`scoring`] - Sums the table over the contacts of one fold
//!
//! ```ignore
//! use latticegpm::core::energy::{scoring::FoldScorer, table::InteractionTable};
//!
//! let table = InteractionTable::miyazawa_jernigan();
//! let energy = FoldScorer::new(&table).fold_energy(&sequence, Some(&conformation))?;
//! ```

pub mod contacts;
pub mod scoring;
pub mod table;
