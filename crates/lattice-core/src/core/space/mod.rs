//! # Sequence Space Module
//!
//! The combinatorial space of genotypes between a wildtype and a mutant sequence: every site
//! where the two differ may carry either residue, every other site is fixed.

use crate::core::models::residue::{AminoAcid, Sequence};
use itertools::Itertools;
use thiserror::Error;

/// Residues allowed at each site; `None` for sites that cannot mutate.
pub type Mutations = Vec<Option<Vec<AminoAcid>>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpaceError {
    #[error("Sequences have different lengths: {0} and {1}")]
    LengthMismatch(usize, usize),
    #[error("Mutations cover {sites} sites but the wildtype has {length} residues")]
    MutationsMismatch { sites: usize, length: usize },
}

fn check_lengths(s1: &Sequence, s2: &Sequence) -> Result<(), SpaceError> {
    if s1.len() != s2.len() {
        return Err(SpaceError::LengthMismatch(s1.len(), s2.len()));
    }
    Ok(())
}

/// Indices of the sites where `s1` and `s2` differ.
pub fn compare_sequences(s1: &Sequence, s2: &Sequence) -> Result<Vec<usize>, SpaceError> {
    check_lengths(s1, s2)?;
    Ok(s1
        .iter()
        .zip(s2.iter())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect())
}

pub fn hamming_distance(s1: &Sequence, s2: &Sequence) -> Result<usize, SpaceError> {
    compare_sequences(s1, s2).map(|sites| sites.len())
}

/// Per-site mutations between two sequences: `[wildtype, mutant]` where they differ.
pub fn mutations_map(wildtype: &Sequence, mutant: &Sequence) -> Result<Mutations, SpaceError> {
    check_lengths(wildtype, mutant)?;
    Ok(wildtype
        .iter()
        .zip(mutant.iter())
        .map(|(&a, &b)| if a == b { None } else { Some(vec![a, b]) })
        .collect())
}

/// Every genotype reachable from `wildtype` through `mutations`.
///
/// Genotypes come out in binary counting order over the mutable sites, so the wildtype is first
/// and, for a two-residue space, the full mutant is last.
pub fn mutations_to_genotypes(
    wildtype: &Sequence,
    mutations: &Mutations,
) -> Result<Vec<Sequence>, SpaceError> {
    if mutations.len() != wildtype.len() {
        return Err(SpaceError::MutationsMismatch {
            sites: mutations.len(),
            length: wildtype.len(),
        });
    }

    let genotypes = mutations
        .iter()
        .zip(wildtype.iter())
        .map(|(site, &wt)| {
            let mut options = vec![wt];
            if let Some(alphabet) = site {
                options.extend(alphabet.iter().copied().filter(|&aa| aa != wt));
            }
            options
        })
        .multi_cartesian_product()
        .filter_map(|residues| Sequence::new(residues).ok())
        .collect();
    Ok(genotypes)
}

/// All `2^k` genotypes between `wildtype` and `mutant`, where `k` is their Hamming distance.
pub fn enumerate_space(wildtype: &Sequence, mutant: &Sequence) -> Result<Vec<Sequence>, SpaceError> {
    let mutations = mutations_map(wildtype, mutant)?;
    mutations_to_genotypes(wildtype, &mutations)
}

/// Binary representation of `genotype` over the mutable sites of `mutations`.
///
/// Each mutable site contributes `'0'` when it carries the wildtype residue and `'1'` otherwise.
pub fn binary_encoding(
    wildtype: &Sequence,
    mutations: &Mutations,
    genotype: &Sequence,
) -> Result<String, SpaceError> {
    check_lengths(wildtype, genotype)?;
    if mutations.len() != wildtype.len() {
        return Err(SpaceError::MutationsMismatch {
            sites: mutations.len(),
            length: wildtype.len(),
        });
    }
    Ok(mutations
        .iter()
        .enumerate()
        .filter(|(_, site)| site.is_some())
        .map(|(i, _)| if genotype[i] == wildtype[i] { '0' } else { '1' })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::AminoAcid::{Alanine, Histidine, Proline};

    fn seq(s: &str) -> Sequence {
        s.parse().unwrap()
    }

    #[test]
    fn compare_sequences_lists_differing_sites() {
        assert_eq!(compare_sequences(&seq("HPHP"), &seq("HHHH")), Ok(vec![1, 3]));
        assert_eq!(hamming_distance(&seq("HPHP"), &seq("PHPH")), Ok(4));
        assert_eq!(hamming_distance(&seq("HPHP"), &seq("HPHP")), Ok(0));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert_eq!(
            hamming_distance(&seq("HP"), &seq("HPH")),
            Err(SpaceError::LengthMismatch(2, 3))
        );
    }

    #[test]
    fn mutations_map_marks_fixed_sites_as_none() {
        let mutations = mutations_map(&seq("HPA"), &seq("HHA")).unwrap();
        assert_eq!(mutations, vec![None, Some(vec![Proline, Histidine]), None]);
    }

    #[test]
    fn enumerate_space_spans_all_combinations_in_binary_order() {
        let genotypes = enumerate_space(&seq("AAA"), &seq("HAP")).unwrap();
        let codes: Vec<String> = genotypes.iter().map(|g| g.to_string()).collect();
        assert_eq!(codes, vec!["AAA", "AAP", "HAA", "HAP"]);
    }

    #[test]
    fn identical_sequences_span_a_single_genotype() {
        let genotypes = enumerate_space(&seq("HPHP"), &seq("HPHP")).unwrap();
        assert_eq!(genotypes, vec![seq("HPHP")]);
    }

    #[test]
    fn space_size_is_two_to_the_hamming_distance() {
        let genotypes = enumerate_space(&seq("AAAAA"), &seq("HHHHH")).unwrap();
        assert_eq!(genotypes.len(), 32);
        assert_eq!(genotypes.first(), Some(&seq("AAAAA")));
        assert_eq!(genotypes.last(), Some(&seq("HHHHH")));
    }

    #[test]
    fn multi_residue_sites_expand_every_option() {
        let mutations = vec![Some(vec![Alanine, Histidine, Proline]), None];
        let genotypes = mutations_to_genotypes(&seq("AA"), &mutations).unwrap();
        assert_eq!(genotypes, vec![seq("AA"), seq("HA"), seq("PA")]);
    }

    #[test]
    fn binary_encoding_covers_only_mutable_sites() {
        let wildtype = seq("AAA");
        let mutations = mutations_map(&wildtype, &seq("HAP")).unwrap();
        assert_eq!(
            binary_encoding(&wildtype, &mutations, &seq("AAP")),
            Ok("01".to_string())
        );
        assert_eq!(
            binary_encoding(&wildtype, &mutations, &seq("HAP")),
            Ok("11".to_string())
        );
    }
}
