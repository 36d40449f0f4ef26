use crate::core::conformations::ConformationSource;
use crate::core::conformations::enumerate::SelfAvoidingWalks;
use crate::core::io::containers::{GenotypePhenotypeMap, MapError};
use crate::core::io::json::JsonRecord;
use crate::core::models::conformation::Conformation;
use crate::core::models::residue::Sequence;
use crate::core::space::{Mutations, mutations_map, mutations_to_genotypes};
use crate::engine::config::{MapConfig, PhenotypeKind, ThermoConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::thermo::{ThermodynamicState, thermodynamics};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument};

/// A genotype-phenotype map whose phenotypes come from lattice protein thermodynamics.
///
/// Alongside the selected phenotype it keeps every per-genotype quantity, so the phenotype
/// can be switched without folding again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeGenotypePhenotypeMap {
    temperature: f64,
    target: Option<Conformation>,
    phenotype_kind: PhenotypeKind,
    map: GenotypePhenotypeMap,
    energies: Vec<f64>,
    /// Overflows to infinity at low temperature; JSON writes that as `null`.
    #[serde(deserialize_with = "overflowed_sums")]
    partition_sums: Vec<f64>,
    stabilities: Vec<f64>,
    fracfolded: Vec<f64>,
    folded: Vec<bool>,
    conformations: Vec<Option<Conformation>>,
}

fn overflowed_sums<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let sums: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(sums
        .into_iter()
        .map(|z| z.unwrap_or(f64::INFINITY))
        .collect())
}

impl LatticeGenotypePhenotypeMap {
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
    pub fn target(&self) -> Option<&Conformation> {
        self.target.as_ref()
    }
    pub fn phenotype_kind(&self) -> PhenotypeKind {
        self.phenotype_kind
    }
    pub fn map(&self) -> &GenotypePhenotypeMap {
        &self.map
    }
    pub fn wildtype(&self) -> &Sequence {
        self.map.wildtype()
    }
    pub fn genotypes(&self) -> &[Sequence] {
        self.map.genotypes()
    }
    pub fn phenotypes(&self) -> &[f64] {
        self.map.phenotypes()
    }
    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }
    pub fn partition_sums(&self) -> &[f64] {
        &self.partition_sums
    }
    pub fn stabilities(&self) -> &[f64] {
        &self.stabilities
    }
    pub fn fracfolded(&self) -> &[f64] {
        &self.fracfolded
    }
    pub fn folded(&self) -> &[bool] {
        &self.folded
    }
    /// Native (or target) conformation per genotype; `None` where no native state exists.
    pub fn conformations(&self) -> &[Option<Conformation>] {
        &self.conformations
    }

    /// The values `kind` selects, one per genotype.
    pub fn values(&self, kind: PhenotypeKind) -> Result<Vec<f64>, MapError> {
        Ok(match kind {
            PhenotypeKind::Energy => self.energies.clone(),
            PhenotypeKind::Stability => self.stabilities.clone(),
            PhenotypeKind::FracFolded => self.fracfolded.clone(),
            PhenotypeKind::Fitness => self
                .map
                .with_phenotypes(self.fracfolded.clone())?
                .normalized_to_wildtype()?
                .phenotypes()
                .to_vec(),
        })
    }

    /// A copy of this map with `kind` as its phenotype.
    pub fn with_phenotype(&self, kind: PhenotypeKind) -> Result<Self, MapError> {
        let map = self.map.with_phenotypes(self.values(kind)?)?;
        Ok(Self {
            phenotype_kind: kind,
            map,
            ..self.clone()
        })
    }
}

impl JsonRecord for LatticeGenotypePhenotypeMap {
    fn validate(&self) -> Result<(), MapError> {
        self.map.check()?;
        let genotypes = self.map.len();
        let lengths = [
            self.energies.len(),
            self.partition_sums.len(),
            self.stabilities.len(),
            self.fracfolded.len(),
            self.folded.len(),
            self.conformations.len(),
        ];
        match lengths.into_iter().find(|&len| len != genotypes) {
            Some(phenotypes) => Err(MapError::LengthMismatch {
                genotypes,
                phenotypes,
            }),
            None => Ok(()),
        }
    }
}

/// Builds the lattice map of every genotype between `wildtype` and `mutant`.
pub fn build(
    wildtype: &Sequence,
    mutant: &Sequence,
    config: &MapConfig,
    reporter: &ProgressReporter,
) -> Result<LatticeGenotypePhenotypeMap, EngineError> {
    let mutations = mutations_map(wildtype, mutant)?;
    build_from_mutations(wildtype, mutations, config, reporter)
}

/// Builds the lattice map of every genotype `mutations` spans around `wildtype`.
///
/// The ensemble is every self-avoiding walk of the wildtype's length, enumerated once and
/// shared by all genotypes.
#[instrument(skip_all, name = "map_workflow", fields(wildtype = %wildtype))]
pub fn build_from_mutations(
    wildtype: &Sequence,
    mutations: Mutations,
    config: &MapConfig,
    reporter: &ProgressReporter,
) -> Result<LatticeGenotypePhenotypeMap, EngineError> {
    let genotypes = mutations_to_genotypes(wildtype, &mutations)?;
    info!(
        genotypes = genotypes.len(),
        "Building lattice genotype-phenotype map."
    );

    let walks = reporter.phase("Enumerating Conformations", || {
        SelfAvoidingWalks::enumerate(wildtype.len(), config.max_conformations)
    })?;
    info!(conformations = walks.len(), "Conformation ensemble ready.");

    let states = reporter.phase("Folding Genotypes", || {
        fold_all(&genotypes, &walks, &config.thermo, reporter)
    })?;

    let energies: Vec<f64> = states.iter().map(|s| s.native_energy).collect();
    let map = GenotypePhenotypeMap::from_ordered_values(
        wildtype.clone(),
        mutations,
        genotypes,
        energies.clone(),
    )?;
    let lattice = LatticeGenotypePhenotypeMap {
        temperature: config.thermo.temperature,
        target: config.thermo.target.clone(),
        phenotype_kind: PhenotypeKind::Energy,
        map,
        energies,
        partition_sums: states.iter().map(|s| s.partition_sum).collect(),
        stabilities: states.iter().map(|s| s.stability).collect(),
        fracfolded: states.iter().map(|s| s.fracfolded).collect(),
        folded: states.iter().map(|s| s.folded).collect(),
        conformations: states.into_iter().map(|s| s.native_conformation).collect(),
    }
    .with_phenotype(config.phenotype)?;

    let folded = lattice.folded.iter().filter(|&&f| f).count();
    info!(
        folded,
        total = lattice.len(),
        phenotype = %config.phenotype,
        "Map complete."
    );
    Ok(lattice)
}

fn fold_all(
    genotypes: &[Sequence],
    source: &impl ConformationSource,
    thermo: &ThermoConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ThermodynamicState>, EngineError> {
    reporter.report(Progress::TaskStart {
        total_steps: genotypes.len() as u64,
    });
    let states = genotypes
        .iter()
        .map(|genotype| {
            let state = fold_one(genotype, source, thermo);
            reporter.report(Progress::TaskIncrement);
            state
        })
        .collect::<Result<Vec<_>, _>>();
    reporter.report(Progress::TaskFinish);
    states
}

pub(crate) fn fold_one(
    sequence: &Sequence,
    source: &impl ConformationSource,
    thermo: &ThermoConfig,
) -> Result<ThermodynamicState, EngineError> {
    let state = match &thermo.target {
        Some(target) => ThermodynamicState::against_target(
            sequence,
            source.conformations(),
            target,
            thermo.temperature,
            &thermo.interaction_table,
        )?,
        None => thermodynamics(
            sequence,
            source.conformations(),
            thermo.temperature,
            &thermo.interaction_table,
        )?,
    };
    debug!(
        sequence = %sequence,
        stability = state.stability,
        folded = state.folded,
        "Folded sequence."
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::table::InteractionTable;
    use crate::core::models::residue::AminoAcid::{Histidine as H, Proline as P};
    use crate::engine::config::MapConfigBuilder;
    use std::sync::Mutex;
    use tempfile::tempdir;

    const EPS: f64 = 1e-12;

    fn hp_table() -> InteractionTable {
        InteractionTable::from_mapping([((H, H), -1.0), ((H, P), 0.0), ((P, P), 0.0)])
    }

    fn seq(s: &str) -> Sequence {
        s.parse().unwrap()
    }

    fn config(phenotype: PhenotypeKind, target: Option<&str>) -> MapConfig {
        MapConfigBuilder::new()
            .temperature(1.0)
            .interaction_table(hp_table())
            .target(target.map(|t| t.parse().unwrap()))
            .phenotype(phenotype)
            .max_conformations(100)
            .build()
            .unwrap()
    }

    fn build_hp(phenotype: PhenotypeKind) -> LatticeGenotypePhenotypeMap {
        build(
            &seq("HPPH"),
            &seq("PPPH"),
            &config(phenotype, None),
            &ProgressReporter::new(),
        )
        .unwrap()
    }

    #[test]
    fn stability_map_folds_every_genotype() {
        let lattice = build_hp(PhenotypeKind::Stability);
        assert_eq!(lattice.genotypes(), &[seq("HPPH"), seq("PPPH")]);
        assert_eq!(lattice.folded(), &[true, false]);
        assert_eq!(
            lattice.conformations(),
            &[Some("RUL".parse().unwrap()), None]
        );

        // Five canonical walks; only RUL has the H-H contact.
        let expected = -1.0 + 4f64.ln();
        assert!((lattice.phenotypes()[0] - expected).abs() < EPS);
        assert_eq!(lattice.phenotypes()[1], 0.0);
        assert!((lattice.partition_sums()[0] - (1f64.exp() + 4.0)).abs() < EPS);
    }

    #[test]
    fn fitness_is_fraction_folded_relative_to_wildtype() {
        let lattice = build_hp(PhenotypeKind::Fitness);
        let fracfolded = lattice.fracfolded();
        assert_eq!(lattice.phenotypes()[0], 1.0);
        assert!((lattice.phenotypes()[1] - fracfolded[1] / fracfolded[0]).abs() < EPS);
        assert_eq!(fracfolded[1], 0.5);
    }

    #[test]
    fn phenotype_can_be_switched_without_refolding() {
        let lattice = build_hp(PhenotypeKind::Stability);
        let energies = lattice.with_phenotype(PhenotypeKind::Energy).unwrap();
        assert_eq!(energies.phenotype_kind(), PhenotypeKind::Energy);
        assert_eq!(energies.phenotypes()[0], -1.0);
        assert_eq!(energies.phenotypes()[1], 0.0);
        assert_eq!(energies.stabilities(), lattice.stabilities());
    }

    #[test]
    fn target_conformation_replaces_the_ground_state() {
        let lattice = build(
            &seq("HPPH"),
            &seq("PPPH"),
            &config(PhenotypeKind::Stability, Some("RRR")),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(lattice.folded(), &[false, false]);
        assert_eq!(lattice.target(), Some(&"RRR".parse().unwrap()));
        assert!(lattice.stabilities()[0] > 0.0);
        assert_eq!(
            lattice.conformations()[0],
            Some("RRR".parse().unwrap())
        );
    }

    #[test]
    fn progress_counts_one_step_per_genotype() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        build(
            &seq("HPPH"),
            &seq("PHHP"),
            &config(PhenotypeKind::Stability, None),
            &reporter,
        )
        .unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        let steps = events
            .iter()
            .filter(|e| matches!(e, Progress::TaskIncrement))
            .count();
        assert_eq!(steps, 16);
        assert!(events.contains(&Progress::PhaseStart {
            name: "Folding Genotypes"
        }));
        assert!(events.contains(&Progress::TaskStart { total_steps: 16 }));
    }

    #[test]
    fn mismatched_sequences_fail_before_folding() {
        let result = build(
            &seq("HPPH"),
            &seq("HPP"),
            &config(PhenotypeKind::Stability, None),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::Space(_))));
    }

    #[test]
    fn lattice_map_round_trips_through_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lattice.json");
        let lattice = build_hp(PhenotypeKind::FracFolded);

        lattice.write_to_path(&path).unwrap();
        let loaded = LatticeGenotypePhenotypeMap::read_from_path(&path).unwrap();
        assert_eq!(loaded, lattice);
    }

    #[test]
    fn overflowed_partition_sums_survive_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cold.json");
        let config = MapConfigBuilder::new()
            .temperature(0.01)
            .interaction_table(InteractionTable::from_mapping([
                ((H, H), -10.0),
                ((H, P), 0.0),
                ((P, P), 0.0),
            ]))
            .phenotype(PhenotypeKind::Fitness)
            .max_conformations(100)
            .build()
            .unwrap();
        let lattice = build(&seq("HPPH"), &seq("PPPH"), &config, &ProgressReporter::new()).unwrap();
        assert!(lattice.partition_sums()[0].is_infinite());
        assert!(lattice.stabilities().iter().all(|s| s.is_finite()));
        assert!(lattice.phenotypes().iter().all(|p| p.is_finite()));

        lattice.write_to_path(&path).unwrap();
        let loaded = LatticeGenotypePhenotypeMap::read_from_path(&path).unwrap();
        assert!(loaded.partition_sums()[0].is_infinite());
        assert!((loaded.partition_sums()[1] - 5.0).abs() < 1e-12);
        assert_eq!(loaded.folded(), lattice.folded());
    }

    #[test]
    fn truncated_lattice_document_is_rejected() {
        let lattice = build_hp(PhenotypeKind::Stability);
        let mut value = serde_json::to_value(&lattice).unwrap();
        value["folded"] = serde_json::json!([true]);
        let document = serde_json::to_vec(&value).unwrap();
        let result = LatticeGenotypePhenotypeMap::read_from(&mut document.as_slice());
        assert!(matches!(
            result,
            Err(crate::core::io::json::JsonError::Invalid(
                MapError::LengthMismatch { .. }
            ))
        ));
    }
}
