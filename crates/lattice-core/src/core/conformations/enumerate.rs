use super::ConformationSource;
use crate::core::models::conformation::{Conformation, Move};
use nalgebra::Vector2;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnumerationError {
    #[error("Chains need at least two residues to have a conformation, got {0}")]
    TooShort(usize),
    #[error("More than {limit} conformations exist for chains of length {length}")]
    TooManyConformations { length: usize, limit: usize },
}

/// Every self-avoiding walk of a chain, up to rotation and reflection.
///
/// Canonical walks start with `R` and their first turn, if any, is `U`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfAvoidingWalks {
    length: usize,
    conformations: Vec<Conformation>,
}

impl SelfAvoidingWalks {
    #[instrument(skip_all, fields(length, max_conformations))]
    pub fn enumerate(length: usize, max_conformations: usize) -> Result<Self, EnumerationError> {
        if length < 2 {
            return Err(EnumerationError::TooShort(length));
        }

        let mut walker = Walker {
            moves: Vec::with_capacity(length - 1),
            visited: HashSet::from([Vector2::new(0, 0)]),
            position: Vector2::new(0, 0),
            target_moves: length - 1,
            limit: max_conformations,
            found: Vec::new(),
        };
        walker.extend(Move::Right)?;

        debug!(
            count = walker.found.len(),
            "Enumerated canonical self-avoiding walks."
        );
        Ok(Self {
            length,
            conformations: walker.found,
        })
    }

    pub fn len(&self) -> usize {
        self.conformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conformations.is_empty()
    }
}

impl ConformationSource for SelfAvoidingWalks {
    fn length(&self) -> usize {
        self.length
    }

    fn conformations(&self) -> &[Conformation] {
        &self.conformations
    }
}

struct Walker {
    moves: Vec<Move>,
    visited: HashSet<Vector2<i32>>,
    position: Vector2<i32>,
    target_moves: usize,
    limit: usize,
    found: Vec<Conformation>,
}

impl Walker {
    fn extend(&mut self, mv: Move) -> Result<(), EnumerationError> {
        let next = self.position + mv.step();
        if !self.visited.insert(next) {
            return Ok(());
        }
        let previous = self.position;
        self.position = next;
        self.moves.push(mv);

        let result = if self.moves.len() == self.target_moves {
            self.record()
        } else {
            self.branch()
        };

        self.moves.pop();
        self.position = previous;
        self.visited.remove(&next);
        result
    }

    fn branch(&mut self) -> Result<(), EnumerationError> {
        let turned = self.moves.iter().any(|&m| m != Move::Right);
        for mv in Move::ALL {
            // Reflection symmetry: the first turn away from the initial direction goes up.
            if !turned && mv == Move::Down {
                continue;
            }
            self.extend(mv)?;
        }
        Ok(())
    }

    fn record(&mut self) -> Result<(), EnumerationError> {
        if self.found.len() >= self.limit {
            return Err(EnumerationError::TooManyConformations {
                length: self.target_moves + 1,
                limit: self.limit,
            });
        }
        self.found.push(Conformation::new(self.moves.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(walks: &SelfAvoidingWalks) -> Vec<String> {
        walks.conformations().iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn two_residues_have_one_conformation() {
        let walks = SelfAvoidingWalks::enumerate(2, 100).unwrap();
        assert_eq!(codes(&walks), vec!["R"]);
        assert_eq!(walks.length(), 2);
    }

    #[test]
    fn three_residues_have_straight_and_bent() {
        let walks = SelfAvoidingWalks::enumerate(3, 100).unwrap();
        let mut found = codes(&walks);
        found.sort();
        assert_eq!(found, vec!["RR", "RU"]);
    }

    #[test]
    fn counts_match_known_self_avoiding_walk_numbers() {
        // Total 2-D self-avoiding walks of n steps: 4, 12, 36, 100, 284, 780, 2172.
        // Removing the 8-fold symmetry (4 for straight walks) gives (c_n + 4) / 8.
        let expected = [(2, 1), (3, 2), (4, 5), (5, 13), (6, 36), (7, 98), (8, 272)];
        for (length, count) in expected {
            let walks = SelfAvoidingWalks::enumerate(length, 10_000).unwrap();
            assert_eq!(walks.len(), count, "length {}", length);
        }
    }

    #[test]
    fn every_walk_is_self_avoiding_and_has_the_right_length() {
        let walks = SelfAvoidingWalks::enumerate(7, 10_000).unwrap();
        for conformation in walks.conformations() {
            assert_eq!(conformation.len(), 6);
            let coordinates = conformation.coordinates();
            let unique: HashSet<_> = coordinates.iter().collect();
            assert_eq!(unique.len(), coordinates.len());
        }
    }

    #[test]
    fn too_short_chain_is_rejected() {
        assert_eq!(
            SelfAvoidingWalks::enumerate(1, 10),
            Err(EnumerationError::TooShort(1))
        );
    }

    #[test]
    fn limit_is_enforced() {
        assert_eq!(
            SelfAvoidingWalks::enumerate(6, 10),
            Err(EnumerationError::TooManyConformations {
                length: 6,
                limit: 10
            })
        );
    }
}
