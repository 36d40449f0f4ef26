//! # Core Models Module
//!
//! Data structures describing a lattice protein.
//!
//! - [`residue`] - The amino acid alphabet and the immutable [`residue::Sequence`]
//! - [`conformation`] - Lattice moves and the immutable [`conformation::Conformation`]
//!
//! Both types parse from and print as their compact one-letter string forms:
//!
//! ```ignore
//! use latticegpm::core::models::{conformation::Conformation, residue::Sequence};
//!
//! let sequence: Sequence = "HPHP".parse()?;
//! let conformation: Conformation = "RDL".parse()?;
//! assert_eq!(conformation.len() + 1, sequence.len());
//! ```

pub mod conformation;
pub mod residue;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown amino acid code '{0}'")]
    UnknownAminoAcid(char),
    #[error("Unknown lattice move '{0}'. Expected one of 'U', 'D', 'L', 'R'")]
    UnknownMove(char),
    #[error("Sequence must contain at least one residue")]
    EmptySequence,
}
