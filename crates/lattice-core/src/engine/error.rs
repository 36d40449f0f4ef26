use thiserror::Error;

use super::config::ConfigError;
use crate::core::conformations::enumerate::EnumerationError;
use crate::core::energy::scoring::ScoringError;
use crate::core::energy::table::TableLoadError;
use crate::core::io::containers::MapError;
use crate::core::models::ParseError;
use crate::core::space::SpaceError;

/// Inputs outside the domain of the thermodynamic model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Temperature must be positive, got {0}")]
    NonPositiveTemperature(f64),

    #[error("Conformation ensemble is empty")]
    EmptyEnsemble,

    #[error("Every conformation in the ensemble was excluded from scoring")]
    NoScoredConformations,

    #[error("Cannot differ at {differ_by} sites of a {length}-residue sequence")]
    DifferBy { differ_by: usize, length: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Energy scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },

    #[error("Conformation enumeration failed: {0}")]
    Enumeration(#[from] EnumerationError),

    #[error("Sequence space error: {0}")]
    Space(#[from] SpaceError),

    #[error("Genotype-phenotype map error: {0}")]
    Map(#[from] MapError),

    #[error("Interaction table error: {0}")]
    Table(#[from] TableLoadError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Search failed to converge after {iterations} iterations")]
    Convergence { iterations: usize },
}
