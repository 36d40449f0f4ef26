use crate::error::{CliError, Result};
use latticegpm::core::models::conformation::Conformation;
use latticegpm::core::models::residue::Sequence;
use std::path::Path;

/// Literal marking an absent conformation in an ensemble file.
pub const ABSENT_CONFORMATION: &str = "none";

pub fn parse_sequence(input: &str) -> Result<Sequence> {
    input
        .parse()
        .map_err(|e| CliError::Argument(format!("Invalid sequence '{}': {}", input, e)))
}

pub fn parse_conformation(input: &str) -> Result<Conformation> {
    input
        .parse()
        .map_err(|e| CliError::Argument(format!("Invalid conformation '{}': {}", input, e)))
}

/// Splits a comma-separated color list, trimming whitespace around each entry.
pub fn parse_colors(input: &str) -> Result<Vec<String>> {
    let colors: Vec<String> = input.split(',').map(|c| c.trim().to_string()).collect();
    if colors.iter().any(String::is_empty) {
        return Err(CliError::Argument(format!(
            "Invalid color list '{}': entries cannot be empty.",
            input
        )));
    }
    Ok(colors)
}

/// Parses an ensemble listing, one conformation per line.
///
/// Blank lines and lines starting with `#` are skipped; a line reading `none` is an absent
/// conformation.
pub fn parse_conformations(content: &str) -> Result<Vec<Option<Conformation>>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            if line.eq_ignore_ascii_case(ABSENT_CONFORMATION) {
                Ok(None)
            } else {
                parse_conformation(line).map(Some)
            }
        })
        .collect()
}

pub fn read_conformations(path: &Path) -> Result<Vec<Option<Conformation>>> {
    let content = std::fs::read_to_string(path)?;
    parse_conformations(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}
