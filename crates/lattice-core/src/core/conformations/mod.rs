//! # Conformations Module
//!
//! Supplies the ensemble of candidate conformations a sequence is folded against.
//!
//! - [`enumerate`] - Exhaustive enumeration of self-avoiding walks, unique up to rotation and
//!   reflection
//!
//! Thermodynamic calculations only depend on the [`ConformationSource`] trait, so any other
//! provider of conformations can be plugged in.

pub mod enumerate;

use crate::core::models::conformation::Conformation;

/// A provider of the candidate conformations for chains of one length.
pub trait ConformationSource {
    /// Number of residues of the chains this source folds.
    fn length(&self) -> usize;

    /// The candidate conformations, each with `length() - 1` moves.
    fn conformations(&self) -> &[Conformation];
}

impl ConformationSource for Vec<Conformation> {
    fn length(&self) -> usize {
        self.first().map_or(0, |c| c.len() + 1)
    }

    fn conformations(&self) -> &[Conformation] {
        self
    }
}
