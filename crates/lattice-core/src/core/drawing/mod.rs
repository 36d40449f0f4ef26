//! # Drawing Module
//!
//! Renders a folded chain as a two-dimensional diagram for visual inspection.
//!
//! The fold is laid out on a doubled grid: residues sit on even cells, bonds on the cells
//! between them, and empty even cells show a dot. One ring of padding surrounds the fold.
//! The same grid backs both the plain text and the SVG rendering.

use crate::core::models::conformation::{Conformation, Move};
use crate::core::models::residue::{AminoAcid, Sequence};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawingError {
    #[error("Conformation has {moves} moves but the sequence has {residues} residues")]
    LengthMismatch { residues: usize, moves: usize },
    #[error("Rotation must be a multiple of 90 degrees, got {0}")]
    Rotation(u32),
    #[error("{colors} colors given for {residues} residues")]
    ColorCount { residues: usize, colors: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Dot,
    Bond(Move),
    Residue(usize, AminoAcid),
}

/// A fold laid out on a character grid, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldDiagram {
    cells: Vec<Vec<Cell>>,
    colors: Option<Vec<String>>,
}

const PADDING: i32 = 2;

impl FoldDiagram {
    /// Lays out `sequence` along `conformation` after rotating it clockwise by `rotation`
    /// degrees.
    pub fn build(
        sequence: &Sequence,
        conformation: &Conformation,
        rotation: u32,
    ) -> Result<Self, DrawingError> {
        if conformation.len() + 1 != sequence.len() {
            return Err(DrawingError::LengthMismatch {
                residues: sequence.len(),
                moves: conformation.len(),
            });
        }
        if rotation % 90 != 0 {
            return Err(DrawingError::Rotation(rotation));
        }

        let conformation = conformation.rotated((rotation / 90) as usize);
        let coordinates = conformation.coordinates();

        let min_row = coordinates.iter().map(|p| p.x).min().unwrap_or(0);
        let max_row = coordinates.iter().map(|p| p.x).max().unwrap_or(0);
        let min_col = coordinates.iter().map(|p| p.y).min().unwrap_or(0);
        let max_col = coordinates.iter().map(|p| p.y).max().unwrap_or(0);

        let height = (2 * (max_row - min_row) + 2 * PADDING + 1) as usize;
        let width = (2 * (max_col - min_col) + 2 * PADDING + 1) as usize;

        let mut cells: Vec<Vec<Cell>> = (0..height)
            .map(|r| {
                (0..width)
                    .map(|c| {
                        if r % 2 == 0 && c % 2 == 0 {
                            Cell::Dot
                        } else {
                            Cell::Empty
                        }
                    })
                    .collect()
            })
            .collect();

        let to_grid = |row: i32, col: i32| {
            (
                (2 * (row - min_row) + PADDING) as usize,
                (2 * (col - min_col) + PADDING) as usize,
            )
        };

        for (index, (position, &residue)) in coordinates.iter().zip(sequence.iter()).enumerate() {
            let (r, c) = to_grid(position.x, position.y);
            cells[r][c] = Cell::Residue(index, residue);
        }
        for (position, &mv) in coordinates.iter().zip(conformation.moves()) {
            let (r, c) = to_grid(position.x, position.y);
            let step = mv.step();
            let (r, c) = ((r as i32 + step.x) as usize, (c as i32 + step.y) as usize);
            cells[r][c] = Cell::Bond(mv);
        }

        Ok(Self {
            cells,
            colors: None,
        })
    }

    /// Assigns one SVG fill color per residue.
    pub fn with_colors(mut self, colors: Vec<String>) -> Result<Self, DrawingError> {
        let residues = self
            .cells
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, Cell::Residue(..)))
            .count();
        if colors.len() != residues {
            return Err(DrawingError::ColorCount {
                residues,
                colors: colors.len(),
            });
        }
        self.colors = Some(colors);
        Ok(self)
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn to_text(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                let line: String = row
                    .iter()
                    .map(|cell| match cell {
                        Cell::Empty => ' ',
                        Cell::Dot => '.',
                        Cell::Bond(Move::Up | Move::Down) => '|',
                        Cell::Bond(Move::Left | Move::Right) => '-',
                        Cell::Residue(_, residue) => residue.code(),
                    })
                    .collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// SVG document whose element size scales with `font_size` pixels.
    pub fn to_svg(&self, font_size: f64) -> String {
        let step = 0.25 * font_size;
        let line_width = 0.1 * font_size;
        let origin = 2.0 * step;
        let width = font_size * self.width() as f64;
        let height = font_size * self.height() as f64;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\n"
        );
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let x = origin + font_size * c as f64;
                let y = origin + font_size * r as f64;
                let element = match cell {
                    Cell::Empty => continue,
                    Cell::Dot => text_element(x - step, y, '.', font_size, "black"),
                    Cell::Bond(mv) => {
                        let (dx, dy) = match mv {
                            Move::Up | Move::Down => (0.0, step),
                            Move::Left | Move::Right => (step, 0.0),
                        };
                        format!(
                            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"rgb(10%,10%,16%)\" style=\"stroke-width:{line_width}\" />\n",
                            x - dx,
                            y - dy,
                            x + dx,
                            y + dy
                        )
                    }
                    Cell::Residue(index, residue) => {
                        let color = self
                            .colors
                            .as_ref()
                            .and_then(|colors| colors.get(*index))
                            .map_or("black", String::as_str);
                        text_element(x - 1.1 * step, y + step, residue.code(), font_size, color)
                    }
                };
                svg.push_str(&element);
            }
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub fn save_svg(&self, path: &Path, font_size: f64) -> io::Result<()> {
        fs::write(path, self.to_svg(font_size))
    }
}

fn text_element(x: f64, y: f64, text: char, font_size: f64, color: &str) -> String {
    format!(
        "  <text x=\"{x}\" y=\"{y}\" style=\"font-size:{font_size}px;font-family:Courier;fill:{color}\">{text}</text>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram(sequence: &str, conformation: &str, rotation: u32) -> FoldDiagram {
        FoldDiagram::build(
            &sequence.parse().unwrap(),
            &conformation.parse().unwrap(),
            rotation,
        )
        .unwrap()
    }

    #[test]
    fn square_fold_renders_as_text() {
        let text = diagram("HPPH", "RDL", 0).to_text();
        let expected = [
            ". . . .",
            "",
            ". H-P .",
            "    |",
            ". H-P .",
            "",
            ". . . .",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn residues_sit_on_even_cells_inside_the_padding() {
        let d = diagram("HPPH", "RDL", 0);
        assert_eq!((d.height(), d.width()), (7, 7));
        assert_eq!(d.cell(2, 2), Some(Cell::Residue(0, AminoAcid::Histidine)));
        assert_eq!(d.cell(2, 3), Some(Cell::Bond(Move::Right)));
        assert_eq!(d.cell(4, 2), Some(Cell::Residue(3, AminoAcid::Histidine)));
        assert_eq!(d.cell(0, 0), Some(Cell::Dot));
        assert_eq!(d.cell(1, 1), Some(Cell::Empty));
    }

    #[test]
    fn rotation_turns_the_layout_clockwise() {
        let d = diagram("HPPH", "RDL", 90);
        assert_eq!(d.cell(2, 4), Some(Cell::Residue(0, AminoAcid::Histidine)));
        assert_eq!(d.cell(3, 4), Some(Cell::Bond(Move::Down)));
        assert_eq!(d.cell(4, 4), Some(Cell::Residue(1, AminoAcid::Proline)));
        assert_eq!(diagram("HPPH", "RDL", 360), diagram("HPPH", "RDL", 0));
    }

    #[test]
    fn straight_chain_has_a_single_row_of_residues() {
        let d = diagram("AAA", "RR", 0);
        assert_eq!((d.height(), d.width()), (5, 9));
        assert_eq!(d.to_text().lines().nth(2), Some(". A-A-A ."));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let sequence: Sequence = "HPPH".parse().unwrap();
        let conformation: Conformation = "RDL".parse().unwrap();
        assert_eq!(
            FoldDiagram::build(&sequence, &"RD".parse().unwrap(), 0),
            Err(DrawingError::LengthMismatch {
                residues: 4,
                moves: 2
            })
        );
        assert_eq!(
            FoldDiagram::build(&sequence, &conformation, 45),
            Err(DrawingError::Rotation(45))
        );
    }

    #[test]
    fn svg_contains_every_residue_and_bond() {
        let svg = diagram("HPPH", "RDL", 0).to_svg(20.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line").count(), 3);
        assert_eq!(svg.matches(">H</text>").count(), 2);
        assert_eq!(svg.matches(">P</text>").count(), 2);
        assert!(svg.contains("width=\"140\""));
    }

    #[test]
    fn colors_apply_per_residue() {
        let colored = diagram("HPPH", "RDL", 0)
            .with_colors(vec!["red".into(), "blue".into(), "blue".into(), "red".into()])
            .unwrap();
        let svg = colored.to_svg(10.0);
        assert_eq!(svg.matches("fill:red").count(), 2);

        let result = diagram("HPPH", "RDL", 0).with_colors(vec!["red".into()]);
        assert_eq!(
            result,
            Err(DrawingError::ColorCount {
                residues: 4,
                colors: 1
            })
        );
    }

    #[test]
    fn svg_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fold.svg");
        diagram("HPPH", "RDL", 0).save_svg(&path, 20.0).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
    }
}
