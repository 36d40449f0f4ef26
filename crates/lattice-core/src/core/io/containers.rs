use crate::core::models::residue::Sequence;
use crate::core::space::{Mutations, SpaceError, binary_encoding, mutations_to_genotypes};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    #[error("{genotypes} genotypes but {phenotypes} phenotypes")]
    LengthMismatch { genotypes: usize, phenotypes: usize },
    #[error("No phenotype given for genotype '{0}'")]
    MissingGenotype(String),
    #[error("Wildtype '{0}' is not one of the genotypes")]
    WildtypeMissing(String),
    #[error("Wildtype phenotype is zero; cannot normalize")]
    ZeroWildtypePhenotype,
    #[error(transparent)]
    Space(#[from] SpaceError),
}

/// Genotypes of a sequence space paired with one phenotype each.
///
/// Both arrays are kept in the same order; the wildtype must be one of the genotypes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenotypePhenotypeMap {
    wildtype: Sequence,
    mutations: Mutations,
    genotypes: Vec<Sequence>,
    phenotypes: Vec<f64>,
}

impl GenotypePhenotypeMap {
    /// Builds a map from phenotypes listed in the same order as `genotypes`.
    pub fn from_ordered_values(
        wildtype: Sequence,
        mutations: Mutations,
        genotypes: Vec<Sequence>,
        phenotypes: Vec<f64>,
    ) -> Result<Self, MapError> {
        let map = Self {
            wildtype,
            mutations,
            genotypes,
            phenotypes,
        };
        map.check()?;
        Ok(map)
    }

    /// Builds a map over every genotype spanned by `mutations`, looking each phenotype up in
    /// `mapping`. Entries of `mapping` outside the space are ignored.
    pub fn from_mapping(
        wildtype: Sequence,
        mutations: Mutations,
        mapping: &HashMap<Sequence, f64>,
    ) -> Result<Self, MapError> {
        let genotypes = mutations_to_genotypes(&wildtype, &mutations)?;
        let phenotypes = genotypes
            .iter()
            .map(|g| {
                mapping
                    .get(g)
                    .copied()
                    .ok_or_else(|| MapError::MissingGenotype(g.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_ordered_values(wildtype, mutations, genotypes, phenotypes)
    }

    pub(crate) fn check(&self) -> Result<(), MapError> {
        if self.genotypes.len() != self.phenotypes.len() {
            return Err(MapError::LengthMismatch {
                genotypes: self.genotypes.len(),
                phenotypes: self.phenotypes.len(),
            });
        }
        if !self.genotypes.contains(&self.wildtype) {
            return Err(MapError::WildtypeMissing(self.wildtype.to_string()));
        }
        Ok(())
    }

    pub fn wildtype(&self) -> &Sequence {
        &self.wildtype
    }

    pub fn mutations(&self) -> &Mutations {
        &self.mutations
    }

    pub fn genotypes(&self) -> &[Sequence] {
        &self.genotypes
    }

    pub fn phenotypes(&self) -> &[f64] {
        &self.phenotypes
    }

    pub fn len(&self) -> usize {
        self.genotypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genotypes.is_empty()
    }

    pub fn index_of(&self, genotype: &Sequence) -> Option<usize> {
        self.genotypes.iter().position(|g| g == genotype)
    }

    pub fn phenotype(&self, genotype: &Sequence) -> Option<f64> {
        self.index_of(genotype).map(|i| self.phenotypes[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Sequence, f64)> {
        self.genotypes.iter().zip(self.phenotypes.iter().copied())
    }

    /// Binary encoding of every genotype over the mutable sites.
    pub fn binary(&self) -> Result<Vec<String>, MapError> {
        self.genotypes
            .iter()
            .map(|g| binary_encoding(&self.wildtype, &self.mutations, g).map_err(MapError::from))
            .collect()
    }

    /// Replaces the phenotypes, keeping genotype order.
    pub fn with_phenotypes(&self, phenotypes: Vec<f64>) -> Result<Self, MapError> {
        Self::from_ordered_values(
            self.wildtype.clone(),
            self.mutations.clone(),
            self.genotypes.clone(),
            phenotypes,
        )
    }

    /// Divides every phenotype by the wildtype's.
    pub fn normalized_to_wildtype(&self) -> Result<Self, MapError> {
        let reference = self
            .phenotype(&self.wildtype)
            .ok_or_else(|| MapError::WildtypeMissing(self.wildtype.to_string()))?;
        if reference == 0.0 {
            return Err(MapError::ZeroWildtypePhenotype);
        }
        self.with_phenotypes(self.phenotypes.iter().map(|p| p / reference).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::space::mutations_map;

    fn seq(s: &str) -> Sequence {
        s.parse().unwrap()
    }

    fn small_map() -> GenotypePhenotypeMap {
        let wildtype = seq("AA");
        let mutations = mutations_map(&wildtype, &seq("HH")).unwrap();
        let genotypes = mutations_to_genotypes(&wildtype, &mutations).unwrap();
        GenotypePhenotypeMap::from_ordered_values(wildtype, mutations, genotypes, vec![2.0, 1.0, 4.0, 0.5])
            .unwrap()
    }

    #[test]
    fn ordered_values_keep_genotype_order() {
        let map = small_map();
        assert_eq!(map.len(), 4);
        assert_eq!(map.phenotype(&seq("AA")), Some(2.0));
        assert_eq!(map.phenotype(&seq("HH")), Some(0.5));
        assert_eq!(map.index_of(&seq("HA")), Some(2));
    }

    #[test]
    fn ordered_values_reject_length_mismatch() {
        let wildtype = seq("AA");
        let mutations = mutations_map(&wildtype, &seq("HA")).unwrap();
        let result = GenotypePhenotypeMap::from_ordered_values(
            wildtype,
            mutations,
            vec![seq("AA"), seq("HA")],
            vec![1.0],
        );
        assert_eq!(
            result,
            Err(MapError::LengthMismatch {
                genotypes: 2,
                phenotypes: 1
            })
        );
    }

    #[test]
    fn ordered_values_require_the_wildtype() {
        let result = GenotypePhenotypeMap::from_ordered_values(
            seq("AA"),
            vec![None, None],
            vec![seq("HH")],
            vec![1.0],
        );
        assert!(matches!(result, Err(MapError::WildtypeMissing(_))));
    }

    #[test]
    fn mapping_is_ordered_by_the_enumerated_space() {
        let wildtype = seq("AA");
        let mutations = mutations_map(&wildtype, &seq("HH")).unwrap();
        let mapping: HashMap<Sequence, f64> = [
            (seq("HH"), 0.5),
            (seq("AA"), 2.0),
            (seq("HA"), 4.0),
            (seq("AH"), 1.0),
            (seq("PP"), 9.0),
        ]
        .into_iter()
        .collect();

        let map = GenotypePhenotypeMap::from_mapping(wildtype, mutations, &mapping).unwrap();
        assert_eq!(map, small_map());
    }

    #[test]
    fn mapping_missing_a_genotype_is_rejected() {
        let wildtype = seq("AA");
        let mutations = mutations_map(&wildtype, &seq("HA")).unwrap();
        let mapping: HashMap<Sequence, f64> = [(seq("AA"), 1.0)].into_iter().collect();
        let result = GenotypePhenotypeMap::from_mapping(wildtype, mutations, &mapping);
        assert_eq!(result, Err(MapError::MissingGenotype("HA".to_string())));
    }

    #[test]
    fn binary_encodes_mutable_sites() {
        let map = small_map();
        assert_eq!(map.binary().unwrap(), vec!["00", "01", "10", "11"]);
    }

    #[test]
    fn normalization_divides_by_wildtype() {
        let normalized = small_map().normalized_to_wildtype().unwrap();
        assert_eq!(normalized.phenotypes(), &[1.0, 0.5, 2.0, 0.25]);
    }

    #[test]
    fn normalization_by_zero_is_rejected() {
        let map = small_map().with_phenotypes(vec![0.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(
            map.normalized_to_wildtype(),
            Err(MapError::ZeroWildtypePhenotype)
        );
    }
}
