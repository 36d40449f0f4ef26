use super::error::{DomainError, EngineError};
use crate::core::conformations::ConformationSource;
use crate::core::energy::scoring::{FoldScorer, ScoringError};
use crate::core::energy::table::InteractionTable;
use crate::core::models::conformation::Conformation;
use crate::core::models::residue::Sequence;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Energies closer than this to the minimum count as tied ground states.
pub const DEGENERACY_TOLERANCE: f64 = 1e-9;

/// One entry of a conformation ensemble. The external folder may hand out absent
/// conformations, so both `Conformation` and `Option<Conformation>` qualify.
pub trait EnsembleMember: Sync {
    fn conformation(&self) -> Option<&Conformation>;
}

impl EnsembleMember for Conformation {
    fn conformation(&self) -> Option<&Conformation> {
        Some(self)
    }
}

impl EnsembleMember for Option<Conformation> {
    fn conformation(&self) -> Option<&Conformation> {
        self.as_ref()
    }
}

/// Everything derived from one sequence, ensemble and temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermodynamicState {
    /// Energy per ensemble member; `None` where the member was excluded from scoring.
    pub energies: Vec<Option<f64>>,
    pub partition_sum: f64,
    /// Energy of the native conformation, or of the ground state when there is none.
    pub native_energy: f64,
    pub native_conformation: Option<Conformation>,
    pub stability: f64,
    pub folded: bool,
    pub fracfolded: f64,
}

fn check_temperature(temperature: f64) -> Result<(), DomainError> {
    // Also rejects NaN.
    if !(temperature > 0.0) {
        return Err(DomainError::NonPositiveTemperature(temperature));
    }
    Ok(())
}

/// Scores every member of `ensemble`. Members without a conformation are excluded
/// (`None`); structural errors such as a length mismatch abort the whole scan.
pub fn energy_list<M: EnsembleMember>(
    sequence: &Sequence,
    ensemble: &[M],
    table: &InteractionTable,
) -> Result<Vec<Option<f64>>, ScoringError> {
    let scorer = FoldScorer::new(table);

    #[cfg(not(feature = "parallel"))]
    let iterator = ensemble.iter();

    #[cfg(feature = "parallel")]
    let iterator = ensemble.par_iter();

    iterator
        .map(
            |member| match scorer.fold_energy(sequence, member.conformation()) {
                Ok(energy) => Ok(Some(energy)),
                Err(ScoringError::Conformation) => Ok(None),
                Err(e) => Err(e),
            },
        )
        .collect()
}

/// Boltzmann sum `sum(exp(-E / T))` over `energies`.
pub fn partition_function_from_energies(
    energies: &[f64],
    temperature: f64,
) -> Result<f64, DomainError> {
    check_temperature(temperature)?;
    Ok(energies.iter().map(|e| (-e / temperature).exp()).sum())
}

/// `reference + T * ln(Z - exp(-reference / T))`, the free energy of the reference state
/// against the rest of the ensemble. Zero when nothing is left outside the reference state.
///
/// Weights are taken relative to the lowest remaining energy, so `exp(-E / T)` never
/// overflows at low temperature. When the reference energy is one of `energies` that member
/// is dropped outright instead of being subtracted from `Z`.
fn stability_against(reference: f64, energies: &[f64], temperature: f64) -> f64 {
    let matching = energies
        .iter()
        .position(|e| (e - reference).abs() <= DEGENERACY_TOLERANCE);
    let (floor, remainder) = match matching {
        Some(index) => {
            let others: Vec<f64> = energies
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, &e)| e)
                .collect();
            let Some(floor) = minimum(&others) else {
                trace!(reference, "Ensemble has no weight outside the reference state.");
                return 0.0;
            };
            (floor, relative_weight(&others, floor, temperature))
        }
        None => {
            let floor = minimum(energies).map_or(reference, |m| m.min(reference));
            let reference_weight = (-(reference - floor) / temperature).exp();
            (
                floor,
                relative_weight(energies, floor, temperature) - reference_weight,
            )
        }
    };
    if !(remainder.is_finite() && remainder > 0.0) {
        trace!(reference, remainder, "Ensemble has no weight outside the reference state.");
        return 0.0;
    }
    reference - floor + temperature * remainder.ln()
}

/// `sum(exp(-(E - floor) / T))`, every term at most 1 when `floor` is the minimum.
fn relative_weight(energies: &[f64], floor: f64, temperature: f64) -> f64 {
    energies
        .iter()
        .map(|e| (-(e - floor) / temperature).exp())
        .sum()
}

fn minimum(energies: &[f64]) -> Option<f64> {
    energies.iter().copied().reduce(f64::min)
}

fn is_unique_minimum(energies: &[f64], min_energy: f64) -> bool {
    energies
        .iter()
        .filter(|&&e| (e - min_energy).abs() <= DEGENERACY_TOLERANCE)
        .count()
        == 1
}

/// Stability of the ground state and whether it is unique.
///
/// A degenerate ground state gives `(0.0, false)`.
pub fn stability_from_energies(
    energies: &[f64],
    temperature: f64,
) -> Result<(f64, bool), DomainError> {
    check_temperature(temperature)?;
    let min_energy = minimum(energies).ok_or(DomainError::EmptyEnsemble)?;
    if !is_unique_minimum(energies, min_energy) {
        return Ok((0.0, false));
    }
    Ok((stability_against(min_energy, energies, temperature), true))
}

/// `1 / (1 + exp(stability / T))`.
pub fn fracfolded_from_stability(stability: f64, temperature: f64) -> Result<f64, DomainError> {
    check_temperature(temperature)?;
    Ok(1.0 / (1.0 + (stability / temperature).exp()))
}

fn scored_energies<M: EnsembleMember>(
    sequence: &Sequence,
    ensemble: &[M],
    temperature: f64,
    table: &InteractionTable,
) -> Result<(Vec<Option<f64>>, Vec<f64>), EngineError> {
    check_temperature(temperature)?;
    if ensemble.is_empty() {
        return Err(DomainError::EmptyEnsemble.into());
    }
    let energies = energy_list(sequence, ensemble, table)?;
    let scored: Vec<f64> = energies.iter().flatten().copied().collect();
    if scored.is_empty() {
        return Err(DomainError::NoScoredConformations.into());
    }
    if scored.len() < energies.len() {
        debug!(
            excluded = energies.len() - scored.len(),
            "Excluded absent conformations from the ensemble."
        );
    }
    Ok((energies, scored))
}

/// Reduces `sequence` folded onto every member of `ensemble` to its thermodynamic state.
///
/// The native conformation is the unique lowest-energy member. When several members tie
/// for the minimum the protein has no native state: `folded` is false and stability is 0.
#[instrument(skip_all, name = "thermodynamics", fields(sequence = %sequence))]
pub fn thermodynamics<M: EnsembleMember>(
    sequence: &Sequence,
    ensemble: &[M],
    temperature: f64,
    table: &InteractionTable,
) -> Result<ThermodynamicState, EngineError> {
    let (energies, scored) = scored_energies(sequence, ensemble, temperature, table)?;

    let partition_sum = partition_function_from_energies(&scored, temperature)?;
    let (stability, folded) = stability_from_energies(&scored, temperature)?;
    let native_energy = minimum(&scored).ok_or(DomainError::NoScoredConformations)?;

    let native_conformation = if folded {
        energies
            .iter()
            .position(|e| *e == Some(native_energy))
            .and_then(|i| ensemble[i].conformation().cloned())
    } else {
        None
    };

    Ok(ThermodynamicState {
        partition_sum,
        native_energy,
        native_conformation,
        stability,
        folded,
        fracfolded: fracfolded_from_stability(stability, temperature)?,
        energies,
    })
}

impl ThermodynamicState {
    /// Thermodynamics of `sequence` held in the `target` conformation.
    ///
    /// Stability is measured for the target against the rest of the ensemble, so it is
    /// positive when the target is disfavoured. `folded` is true only when the target is the
    /// unique ground state.
    #[instrument(skip_all, name = "thermodynamics_against_target", fields(sequence = %sequence))]
    pub fn against_target<M: EnsembleMember>(
        sequence: &Sequence,
        ensemble: &[M],
        target: &Conformation,
        temperature: f64,
        table: &InteractionTable,
    ) -> Result<Self, EngineError> {
        let (energies, scored) = scored_energies(sequence, ensemble, temperature, table)?;
        let target_energy = FoldScorer::new(table).fold_energy(sequence, Some(target))?;

        let partition_sum = partition_function_from_energies(&scored, temperature)?;
        let min_energy = minimum(&scored).ok_or(DomainError::NoScoredConformations)?;
        let folded = (target_energy - min_energy).abs() <= DEGENERACY_TOLERANCE
            && is_unique_minimum(&scored, min_energy);
        let stability = stability_against(target_energy, &scored, temperature);

        Ok(Self {
            energies,
            partition_sum,
            native_energy: target_energy,
            native_conformation: Some(target.clone()),
            stability,
            folded,
            fracfolded: fracfolded_from_stability(stability, temperature)?,
        })
    }
}

/// Thermodynamics of one sequence over one conformation ensemble at one temperature.
///
/// Everything is computed once, in [`LatticeThermodynamics::new`]; the accessors only read the
/// stored state. A different ensemble or temperature needs a new instance.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeThermodynamics {
    sequence: Sequence,
    temperature: f64,
    state: ThermodynamicState,
}

impl LatticeThermodynamics {
    /// Uses `table` when given, the Miyazawa-Jernigan energies otherwise.
    pub fn new<M: EnsembleMember>(
        sequence: Sequence,
        ensemble: &[M],
        temperature: f64,
        table: Option<&InteractionTable>,
    ) -> Result<Self, EngineError> {
        let state = match table {
            Some(table) => thermodynamics(&sequence, ensemble, temperature, table)?,
            None => thermodynamics(
                &sequence,
                ensemble,
                temperature,
                &InteractionTable::miyazawa_jernigan(),
            )?,
        };
        Ok(Self {
            sequence,
            temperature,
            state,
        })
    }

    /// Folds `sequence` against every conformation of `source`.
    pub fn from_source(
        sequence: Sequence,
        source: &impl ConformationSource,
        temperature: f64,
        table: Option<&InteractionTable>,
    ) -> Result<Self, EngineError> {
        Self::new(sequence, source.conformations(), temperature, table)
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
    pub fn energies(&self) -> &[Option<f64>] {
        &self.state.energies
    }
    pub fn partition_sum(&self) -> f64 {
        self.state.partition_sum
    }
    pub fn native_energy(&self) -> f64 {
        self.state.native_energy
    }
    pub fn native_conformation(&self) -> Option<&Conformation> {
        self.state.native_conformation.as_ref()
    }
    pub fn stability(&self) -> f64 {
        self.state.stability
    }
    pub fn folded(&self) -> bool {
        self.state.folded
    }
    pub fn fracfolded(&self) -> f64 {
        self.state.fracfolded
    }
    pub fn state(&self) -> &ThermodynamicState {
        &self.state
    }
    pub fn into_state(self) -> ThermodynamicState {
        self.state
    }
}
