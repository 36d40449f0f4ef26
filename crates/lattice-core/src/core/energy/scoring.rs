use super::contacts::{Contact, lattice_contacts};
use super::table::InteractionTable;
use crate::core::models::conformation::Conformation;
use crate::core::models::residue::{AminoAcid, Sequence};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Protein conformation is absent; is there a native state?")]
    Conformation,
    #[error("Conformation has {moves} moves but the sequence has {residues} residues")]
    LengthMismatch { residues: usize, moves: usize },
    #[error("No contact energy for residue pair {0}{1}")]
    UnscoredPair(AminoAcid, AminoAcid),
}

pub struct FoldScorer<'a> {
    table: &'a InteractionTable,
}

impl<'a> FoldScorer<'a> {
    pub fn new(table: &'a InteractionTable) -> Self {
        Self { table }
    }

    pub fn contacts(
        &self,
        sequence: &Sequence,
        conformation: Option<&Conformation>,
    ) -> Result<Vec<Contact>, ScoringError> {
        lattice_contacts(sequence, conformation, self.table)
    }

    /// Total contact energy of `sequence` folded onto `conformation`.
    pub fn fold_energy(
        &self,
        sequence: &Sequence,
        conformation: Option<&Conformation>,
    ) -> Result<f64, ScoringError> {
        self.contacts(sequence, conformation)?
            .iter()
            .map(|contact| {
                let (a, b) = contact.residues;
                self.table
                    .energy(a, b)
                    .ok_or(ScoringError::UnscoredPair(a, b))
            })
            .sum()
    }
}

/// Shorthand for [`FoldScorer::fold_energy`].
pub fn fold_energy(
    sequence: &Sequence,
    conformation: Option<&Conformation>,
    table: &InteractionTable,
) -> Result<f64, ScoringError> {
    FoldScorer::new(table).fold_energy(sequence, conformation)
}
