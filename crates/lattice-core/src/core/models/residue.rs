use super::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // A
    Glycine,    // G
    Isoleucine, // I
    Leucine,    // L
    Proline,    // P
    Valine,     // V

    // --- Aromatic ---
    Phenylalanine, // F
    Tryptophan,    // W
    Tyrosine,      // Y

    // --- Polar, Uncharged ---
    Asparagine, // N
    Cysteine,   // C
    Glutamine,  // Q
    Serine,     // S
    Threonine,  // T
    Methionine, // M

    // --- Positively Charged (Basic) ---
    Arginine,  // R
    Histidine, // H
    Lysine,    // K

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // D
    GlutamicAcid, // E
}

impl AminoAcid {
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::Alanine,
        AminoAcid::Glycine,
        AminoAcid::Isoleucine,
        AminoAcid::Leucine,
        AminoAcid::Proline,
        AminoAcid::Valine,
        AminoAcid::Phenylalanine,
        AminoAcid::Tryptophan,
        AminoAcid::Tyrosine,
        AminoAcid::Asparagine,
        AminoAcid::Cysteine,
        AminoAcid::Glutamine,
        AminoAcid::Serine,
        AminoAcid::Threonine,
        AminoAcid::Methionine,
        AminoAcid::Arginine,
        AminoAcid::Histidine,
        AminoAcid::Lysine,
        AminoAcid::AsparticAcid,
        AminoAcid::GlutamicAcid,
    ];

    pub fn from_code(code: char) -> Result<Self, ParseError> {
        match code.to_ascii_uppercase() {
            'A' => Ok(Self::Alanine),
            'G' => Ok(Self::Glycine),
            'I' => Ok(Self::Isoleucine),
            'L' => Ok(Self::Leucine),
            'P' => Ok(Self::Proline),
            'V' => Ok(Self::Valine),
            'F' => Ok(Self::Phenylalanine),
            'W' => Ok(Self::Tryptophan),
            'Y' => Ok(Self::Tyrosine),
            'N' => Ok(Self::Asparagine),
            'C' => Ok(Self::Cysteine),
            'Q' => Ok(Self::Glutamine),
            'S' => Ok(Self::Serine),
            'T' => Ok(Self::Threonine),
            'M' => Ok(Self::Methionine),
            'R' => Ok(Self::Arginine),
            'H' => Ok(Self::Histidine),
            'K' => Ok(Self::Lysine),
            'D' => Ok(Self::AsparticAcid),
            'E' => Ok(Self::GlutamicAcid),
            _ => Err(ParseError::UnknownAminoAcid(code)),
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Glycine => 'G',
            Self::Isoleucine => 'I',
            Self::Leucine => 'L',
            Self::Proline => 'P',
            Self::Valine => 'V',
            Self::Phenylalanine => 'F',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
            Self::Asparagine => 'N',
            Self::Cysteine => 'C',
            Self::Glutamine => 'Q',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Methionine => 'M',
            Self::Arginine => 'R',
            Self::Histidine => 'H',
            Self::Lysine => 'K',
            Self::AsparticAcid => 'D',
            Self::GlutamicAcid => 'E',
        }
    }
}

impl TryFrom<char> for AminoAcid {
    type Error = ParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_code(value)
    }
}

impl From<AminoAcid> for char {
    fn from(residue: AminoAcid) -> Self {
        residue.code()
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An immutable chain of residues, written N- to C-terminus.
///
/// Any non-empty chain is accepted. A single residue folds only onto the
/// empty conformation and scores zero; enumerating an ensemble still needs
/// at least two residues.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sequence(Vec<AminoAcid>);

impl Sequence {
    pub fn new(residues: Vec<AminoAcid>) -> Result<Self, ParseError> {
        if residues.is_empty() {
            return Err(ParseError::EmptySequence);
        }
        Ok(Self(residues))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn residues(&self) -> &[AminoAcid] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &AminoAcid> {
        self.0.iter()
    }

    /// Returns a copy of this sequence with `residue` at `site`.
    pub fn with_residue(&self, site: usize, residue: AminoAcid) -> Self {
        let mut residues = self.0.clone();
        residues[site] = residue;
        Self(residues)
    }
}

impl Index<usize> for Sequence {
    type Output = AminoAcid;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromStr for Sequence {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let residues = s
            .trim()
            .chars()
            .map(AminoAcid::from_code)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(residues)
    }
}

impl TryFrom<String> for Sequence {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sequence> for String {
    fn from(sequence: Sequence) -> Self {
        sequence.to_string()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for residue in &self.0 {
            write!(f, "{}", residue)?;
        }
        Ok(())
    }
}
