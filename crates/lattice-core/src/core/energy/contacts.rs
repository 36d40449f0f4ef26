use super::scoring::ScoringError;
use super::table::{InteractionTable, ResiduePair};
use crate::core::models::conformation::{Conformation, Move};
use crate::core::models::residue::Sequence;
use nalgebra::Vector2;
use tracing::trace;

/// Two residues that sit on neighbouring lattice sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Chain position of the residue placed first (`i < j`).
    pub i: usize,
    /// Chain position of the residue placed second.
    pub j: usize,
    /// Residues at `(i, j)`.
    pub residues: ResiduePair,
}

impl Contact {
    #[inline]
    pub fn is_covalent(&self) -> bool {
        self.j == self.i + 1
    }
}

/// Square occupancy grid wide enough for any walk of `length` residues started at its center.
struct LatticeGrid {
    side: usize,
    cells: Vec<Option<usize>>,
}

impl LatticeGrid {
    fn new(length: usize) -> Self {
        let side = 2 * length + 1;
        Self {
            side,
            cells: vec![None; side * side],
        }
    }

    #[inline]
    fn center(&self) -> Vector2<i32> {
        let c = (self.side / 2) as i32;
        Vector2::new(c, c)
    }

    #[inline]
    fn offset(&self, position: Vector2<i32>) -> usize {
        position.x as usize * self.side + position.y as usize
    }

    #[inline]
    fn get(&self, position: Vector2<i32>) -> Option<usize> {
        self.cells[self.offset(position)]
    }

    #[inline]
    fn place(&mut self, position: Vector2<i32>, residue_index: usize) {
        let offset = self.offset(position);
        self.cells[offset] = Some(residue_index);
    }
}

fn validate<'a>(
    sequence: &Sequence,
    conformation: Option<&'a Conformation>,
) -> Result<&'a Conformation, ScoringError> {
    let conformation = conformation.ok_or(ScoringError::Conformation)?;
    if conformation.len() + 1 != sequence.len() {
        return Err(ScoringError::LengthMismatch {
            residues: sequence.len(),
            moves: conformation.len(),
        });
    }
    Ok(conformation)
}

/// Every neighbouring pair seen while laying the chain on the lattice, covalent bonds included.
///
/// After each residue is placed its four neighbours are inspected; occupied cells whose residue
/// pair appears in `table` become candidates. Because only already-placed residues are visible,
/// each pair is reported once.
///
/// A self-intersecting walk overwrites the revisited cell and silently loses the contacts of the
/// overwritten residue.
pub fn candidate_contacts(
    sequence: &Sequence,
    conformation: Option<&Conformation>,
    table: &InteractionTable,
) -> Result<Vec<Contact>, ScoringError> {
    let conformation = validate(sequence, conformation)?;
    let residues = sequence.residues();

    let mut grid = LatticeGrid::new(sequence.len());
    let mut position = grid.center();
    grid.place(position, 0);

    let mut candidates = Vec::new();
    for (step, mv) in conformation.moves().iter().enumerate() {
        let current = step + 1;
        position += mv.step();
        grid.place(position, current);

        for neighbor in Move::ALL.iter().map(|m| position + m.step()) {
            let Some(other) = grid.get(neighbor) else {
                continue;
            };
            if other == current {
                continue;
            }
            let (i, j) = if other < current {
                (other, current)
            } else {
                (current, other)
            };
            if table.contains(residues[i], residues[j]) {
                candidates.push(Contact {
                    i,
                    j,
                    residues: (residues[i], residues[j]),
                });
            }
        }
    }
    Ok(candidates)
}

/// The non-covalent contacts of `sequence` folded onto `conformation`.
///
/// Residue `k` is placed next to `k - 1`, and that cell cannot have been overwritten yet, so
/// every chain bond whose residue pair is scored by `table` shows up exactly once among the
/// candidates as the positional entry `(k - 1, k)`. Dropping those entries removes one
/// candidate per scored bond and leaves genuine contacts between the same residue pair alone.
pub fn lattice_contacts(
    sequence: &Sequence,
    conformation: Option<&Conformation>,
    table: &InteractionTable,
) -> Result<Vec<Contact>, ScoringError> {
    let mut contacts = candidate_contacts(sequence, conformation, table)?;
    let before = contacts.len();
    contacts.retain(|contact| !contact.is_covalent());
    trace!(
        bonds = before - contacts.len(),
        contacts = contacts.len(),
        "Filtered covalent bonds from candidate contacts."
    );
    Ok(contacts)
}
