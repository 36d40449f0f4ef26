use super::map::fold_one;
use crate::core::conformations::ConformationSource;
use crate::core::models::ParseError;
use crate::core::models::residue::{AminoAcid, Sequence};
use crate::engine::config::{SearchConfig, ThermoConfig};
use crate::engine::error::{DomainError, EngineError};
use crate::engine::thermo::ThermodynamicState;
use rand::Rng;
use rand::seq::index;
use tracing::{debug, info, instrument};

/// Two folding sequences that differ at the requested number of sites.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub first: Sequence,
    pub first_state: ThermodynamicState,
    pub second: Sequence,
    pub second_state: ThermodynamicState,
    /// Candidates evaluated over both stages.
    pub iterations: usize,
}

/// Searches sequence space for a pair of sequences that both fold with stability below
/// `config.threshold`.
///
/// The first sequence is drawn uniformly at random; the second is a random mutant of it at
/// `config.differ_by` sites (every site by default) and is folded to the target conformation
/// when one is configured. Each stage gives up after `config.max_iterations` candidates.
#[instrument(skip_all, name = "search_workflow", fields(threshold = config.threshold))]
pub fn run(
    source: &impl ConformationSource,
    config: &SearchConfig,
    rng: &mut impl Rng,
) -> Result<SearchResult, EngineError> {
    if source.conformations().is_empty() {
        return Err(DomainError::EmptyEnsemble.into());
    }
    let length = source.length();
    let differ_by = config.differ_by.unwrap_or(length);
    if differ_by > length {
        return Err(DomainError::DifferBy { differ_by, length }.into());
    }

    let free = ThermoConfig {
        target: None,
        ..config.thermo.clone()
    };

    let (first, first_state, first_tries) = find(
        config,
        |rng| Ok(random_sequence(length, rng)?),
        &free,
        source,
        rng,
    )?;
    info!(
        sequence = %first,
        stability = first_state.stability,
        "Found first folding sequence."
    );

    let (second, second_state, second_tries) = find(
        config,
        |rng| Ok(random_mutant(&first, differ_by, rng)),
        &config.thermo,
        source,
        rng,
    )?;
    info!(
        sequence = %second,
        stability = second_state.stability,
        "Found second folding sequence."
    );

    Ok(SearchResult {
        first,
        first_state,
        second,
        second_state,
        iterations: first_tries + second_tries,
    })
}

fn find<R: Rng>(
    config: &SearchConfig,
    mut propose: impl FnMut(&mut R) -> Result<Sequence, EngineError>,
    thermo: &ThermoConfig,
    source: &impl ConformationSource,
    rng: &mut R,
) -> Result<(Sequence, ThermodynamicState, usize), EngineError> {
    for attempt in 1..=config.max_iterations {
        let candidate = propose(rng)?;
        let state = fold_one(&candidate, source, thermo)?;
        if state.folded && state.stability < config.threshold {
            debug!(attempt, "Candidate accepted.");
            return Ok((candidate, state, attempt));
        }
    }
    Err(EngineError::Convergence {
        iterations: config.max_iterations,
    })
}

fn random_residue(rng: &mut impl Rng) -> AminoAcid {
    AminoAcid::ALL[rng.gen_range(0..AminoAcid::ALL.len())]
}

/// A uniformly random sequence of `length` residues.
pub fn random_sequence(length: usize, rng: &mut impl Rng) -> Result<Sequence, ParseError> {
    Sequence::new((0..length).map(|_| random_residue(rng)).collect())
}

/// A copy of `sequence` with `sites` randomly chosen positions changed to a different residue.
pub fn random_mutant(sequence: &Sequence, sites: usize, rng: &mut impl Rng) -> Sequence {
    let mut mutant = sequence.clone();
    for site in index::sample(rng, sequence.len(), sites.min(sequence.len())) {
        let current = sequence[site];
        let mut residue = random_residue(rng);
        while residue == current {
            residue = random_residue(rng);
        }
        mutant = mutant.with_residue(site, residue);
    }
    mutant
}
