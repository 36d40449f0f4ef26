use super::ParseError;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One backbone step on the square lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn from_code(code: char) -> Result<Self, ParseError> {
        match code.to_ascii_uppercase() {
            'U' => Ok(Self::Up),
            'D' => Ok(Self::Down),
            'L' => Ok(Self::Left),
            'R' => Ok(Self::Right),
            _ => Err(ParseError::UnknownMove(code)),
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Unit step in `(row, column)` grid terms. Rows grow downwards.
    #[inline]
    pub fn step(self) -> Vector2<i32> {
        match self {
            Self::Up => Vector2::new(-1, 0),
            Self::Down => Vector2::new(1, 0),
            Self::Left => Vector2::new(0, -1),
            Self::Right => Vector2::new(0, 1),
        }
    }

    #[inline]
    pub fn rotated_clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The path of a chain on the lattice: one move per backbone bond, so a chain of `L`
/// residues has `L - 1` moves.
///
/// Self-avoidance is a precondition of every consumer, not something this type checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Conformation(Vec<Move>);

impl Conformation {
    pub fn new(moves: Vec<Move>) -> Self {
        Self(moves)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    /// Lattice coordinates of every residue, starting at the origin.
    pub fn coordinates(&self) -> Vec<Vector2<i32>> {
        let mut position = Vector2::new(0, 0);
        let mut coordinates = Vec::with_capacity(self.0.len() + 1);
        coordinates.push(position);
        for mv in &self.0 {
            position += mv.step();
            coordinates.push(position);
        }
        coordinates
    }

    /// Rotates the whole path clockwise by `quarter_turns * 90` degrees.
    pub fn rotated(&self, quarter_turns: usize) -> Self {
        let turns = quarter_turns % 4;
        Self(
            self.0
                .iter()
                .map(|&mv| (0..turns).fold(mv, |m, _| m.rotated_clockwise()))
                .collect(),
        )
    }
}

impl FromStr for Conformation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .chars()
            .map(Move::from_code)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<String> for Conformation {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Conformation> for String {
    fn from(conformation: Conformation) -> Self {
        conformation.to_string()
    }
}

impl fmt::Display for Conformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.0 {
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}
