use crate::core::energy::table::InteractionTable;
use crate::core::models::conformation::Conformation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Unknown phenotype '{0}'. Expected one of energy, stability, fracfolded, fitness")]
    UnknownPhenotype(String),
}

/// The quantity stored as the phenotype of every genotype in a lattice map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhenotypeKind {
    /// Energy of the native (or target) conformation.
    Energy,
    #[default]
    Stability,
    FracFolded,
    /// Fraction folded relative to the wildtype.
    Fitness,
}

impl PhenotypeKind {
    pub const ALL: [PhenotypeKind; 4] = [
        PhenotypeKind::Energy,
        PhenotypeKind::Stability,
        PhenotypeKind::FracFolded,
        PhenotypeKind::Fitness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Stability => "stability",
            Self::FracFolded => "fracfolded",
            Self::Fitness => "fitness",
        }
    }
}

impl fmt::Display for PhenotypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PhenotypeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "energy" => Ok(Self::Energy),
            "stability" => Ok(Self::Stability),
            "fracfolded" => Ok(Self::FracFolded),
            "fitness" => Ok(Self::Fitness),
            _ => Err(ConfigError::UnknownPhenotype(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThermoConfig {
    pub temperature: f64,
    pub interaction_table: InteractionTable,
    /// Fold every sequence to this conformation instead of its own ground state.
    pub target: Option<Conformation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub thermo: ThermoConfig,
    pub phenotype: PhenotypeKind,
    /// Upper bound on the size of the enumerated conformation ensemble.
    pub max_conformations: usize,
}

#[derive(Default)]
pub struct MapConfigBuilder {
    temperature: Option<f64>,
    interaction_table: Option<InteractionTable>,
    target: Option<Conformation>,
    phenotype: Option<PhenotypeKind>,
    max_conformations: Option<usize>,
}

impl MapConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn interaction_table(mut self, table: InteractionTable) -> Self {
        self.interaction_table = Some(table);
        self
    }
    pub fn target(mut self, target: Option<Conformation>) -> Self {
        self.target = target;
        self
    }
    pub fn phenotype(mut self, phenotype: PhenotypeKind) -> Self {
        self.phenotype = Some(phenotype);
        self
    }
    pub fn max_conformations(mut self, max: usize) -> Self {
        self.max_conformations = Some(max);
        self
    }

    /// Builds the config. The interaction table defaults to Miyazawa-Jernigan and the
    /// phenotype to stability.
    pub fn build(self) -> Result<MapConfig, ConfigError> {
        Ok(MapConfig {
            thermo: ThermoConfig {
                temperature: self
                    .temperature
                    .ok_or(ConfigError::MissingParameter("temperature"))?,
                interaction_table: self
                    .interaction_table
                    .unwrap_or_else(InteractionTable::miyazawa_jernigan),
                target: self.target,
            },
            phenotype: self.phenotype.unwrap_or_default(),
            max_conformations: self
                .max_conformations
                .ok_or(ConfigError::MissingParameter("max_conformations"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub thermo: ThermoConfig,
    /// Stabilities must fall strictly below this value.
    pub threshold: f64,
    /// Sites at which the second sequence differs from the first; `None` means every site.
    pub differ_by: Option<usize>,
    pub max_iterations: usize,
}

#[derive(Default)]
pub struct SearchConfigBuilder {
    temperature: Option<f64>,
    interaction_table: Option<InteractionTable>,
    target: Option<Conformation>,
    threshold: Option<f64>,
    differ_by: Option<usize>,
    max_iterations: Option<usize>,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn interaction_table(mut self, table: InteractionTable) -> Self {
        self.interaction_table = Some(table);
        self
    }
    pub fn target(mut self, target: Option<Conformation>) -> Self {
        self.target = target;
        self
    }
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
    pub fn differ_by(mut self, sites: Option<usize>) -> Self {
        self.differ_by = sites;
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        Ok(SearchConfig {
            thermo: ThermoConfig {
                temperature: self
                    .temperature
                    .ok_or(ConfigError::MissingParameter("temperature"))?,
                interaction_table: self
                    .interaction_table
                    .unwrap_or_else(InteractionTable::miyazawa_jernigan),
                target: self.target,
            },
            threshold: self
                .threshold
                .ok_or(ConfigError::MissingParameter("threshold"))?,
            differ_by: self.differ_by,
            max_iterations: self
                .max_iterations
                .ok_or(ConfigError::MissingParameter("max_iterations"))?,
        })
    }
}
