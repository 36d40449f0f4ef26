use crate::core::models::residue::AminoAcid;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Miyazawa-Jernigan (1996) residue-residue contact energies in units of RT.
/// One entry per unordered pair; lookups go through [`InteractionTable`].
static MIYAZAWA_JERNIGAN: Map<&'static str, f64> = phf_map! {
    "CC" => -5.44, "CM" => -4.99, "CF" => -5.80, "CI" => -5.50, "CL" => -5.83,
    "CV" => -4.96, "CW" => -4.95, "CY" => -4.16, "CA" => -3.57, "CG" => -3.16,
    "CT" => -3.11, "CS" => -2.86, "CN" => -2.59, "CQ" => -2.85, "CD" => -2.41,
    "CE" => -2.27, "CH" => -3.60, "CR" => -2.57, "CK" => -1.95, "CP" => -3.07,
    "MM" => -5.46, "MF" => -6.56, "MI" => -6.02, "ML" => -6.41, "MV" => -5.32,
    "MW" => -5.55, "MY" => -4.91, "MA" => -3.94, "MG" => -3.39, "MT" => -3.51,
    "MS" => -3.03, "MN" => -2.95, "MQ" => -3.30, "MD" => -2.57, "ME" => -2.89,
    "MH" => -3.98, "MR" => -3.12, "MK" => -2.48, "MP" => -3.45,
    "FF" => -7.26, "FI" => -6.84, "FL" => -7.28, "FV" => -6.29, "FW" => -6.16,
    "FY" => -5.66, "FA" => -4.81, "FG" => -4.13, "FT" => -4.28, "FS" => -4.02,
    "FN" => -3.75, "FQ" => -4.10, "FD" => -3.48, "FE" => -3.56, "FH" => -4.77,
    "FR" => -3.98, "FK" => -3.36, "FP" => -4.25,
    "II" => -6.54, "IL" => -7.04, "IV" => -6.05, "IW" => -5.78, "IY" => -5.25,
    "IA" => -4.58, "IG" => -3.78, "IT" => -4.03, "IS" => -3.52, "IN" => -3.24,
    "IQ" => -3.67, "ID" => -3.17, "IE" => -3.27, "IH" => -4.14, "IR" => -3.63,
    "IK" => -3.01, "IP" => -3.76,
    "LL" => -7.37, "LV" => -6.48, "LW" => -6.14, "LY" => -5.67, "LA" => -4.91,
    "LG" => -4.16, "LT" => -4.34, "LS" => -3.92, "LN" => -3.74, "LQ" => -4.04,
    "LD" => -3.40, "LE" => -3.59, "LH" => -4.54, "LR" => -4.03, "LK" => -3.37,
    "LP" => -4.20,
    "VV" => -5.52, "VW" => -5.18, "VY" => -4.62, "VA" => -4.04, "VG" => -3.38,
    "VT" => -3.46, "VS" => -3.05, "VN" => -2.83, "VQ" => -3.07, "VD" => -2.48,
    "VE" => -2.67, "VH" => -3.58, "VR" => -3.07, "VK" => -2.49, "VP" => -3.32,
    "WW" => -5.06, "WY" => -4.66, "WA" => -3.82, "WG" => -3.42, "WT" => -3.22,
    "WS" => -2.99, "WN" => -3.07, "WQ" => -3.11, "WD" => -2.84, "WE" => -2.99,
    "WH" => -3.98, "WR" => -3.41, "WK" => -2.69, "WP" => -3.73,
    "YY" => -4.17, "YA" => -3.36, "YG" => -3.01, "YT" => -3.01, "YS" => -2.78,
    "YN" => -2.76, "YQ" => -2.97, "YD" => -2.76, "YE" => -2.79, "YH" => -3.52,
    "YR" => -3.16, "YK" => -2.60, "YP" => -3.19,
    "AA" => -2.72, "AG" => -2.31, "AT" => -2.32, "AS" => -2.01, "AN" => -1.84,
    "AQ" => -1.89, "AD" => -1.70, "AE" => -1.51, "AH" => -2.41, "AR" => -1.83,
    "AK" => -1.31, "AP" => -2.03,
    "GG" => -2.24, "GT" => -2.08, "GS" => -1.82, "GN" => -1.74, "GQ" => -1.66,
    "GD" => -1.59, "GE" => -1.22, "GH" => -2.15, "GR" => -1.72, "GK" => -1.15,
    "GP" => -1.87,
    "TT" => -2.12, "TS" => -1.96, "TN" => -1.88, "TQ" => -1.90, "TD" => -1.80,
    "TE" => -1.74, "TH" => -2.42, "TR" => -1.90, "TK" => -1.31, "TP" => -1.90,
    "SS" => -1.67, "SN" => -1.58, "SQ" => -1.49, "SD" => -1.63, "SE" => -1.48,
    "SH" => -2.11, "SR" => -1.62, "SK" => -1.05, "SP" => -1.57,
    "NN" => -1.68, "NQ" => -1.71, "ND" => -1.68, "NE" => -1.51, "NH" => -2.08,
    "NR" => -1.64, "NK" => -1.21, "NP" => -1.53,
    "QQ" => -1.54, "QD" => -1.46, "QE" => -1.42, "QH" => -1.98, "QR" => -1.80,
    "QK" => -1.29, "QP" => -1.73,
    "DD" => -1.21, "DE" => -1.02, "DH" => -2.32, "DR" => -2.29, "DK" => -1.68,
    "DP" => -1.33,
    "EE" => -0.91, "EH" => -2.15, "ER" => -2.27, "EK" => -1.80, "EP" => -1.26,
    "HH" => -3.05, "HR" => -2.16, "HK" => -1.35, "HP" => -2.25,
    "RR" => -1.55, "RK" => -0.59, "RP" => -1.70,
    "KK" => -0.12, "KP" => -0.97,
    "PP" => -1.75,
};

pub type ResiduePair = (AminoAcid, AminoAcid);

#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid residue pair '{pair}' in '{path}'")]
    InvalidPair { path: String, pair: String },
}

/// Symmetric contact energies between pairs of amino acids.
///
/// Pairs are stored under their sorted form so `energy(a, b) == energy(b, a)`.
/// A table is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionTable {
    energies: HashMap<ResiduePair, f64>,
}

#[derive(Debug, Deserialize)]
struct PairRecord {
    residue_a: char,
    residue_b: char,
    energy: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTable {
    energies: HashMap<String, f64>,
}

impl InteractionTable {
    /// The default table: Miyazawa-Jernigan contact energies for all 210 pairs.
    pub fn miyazawa_jernigan() -> Self {
        let energies = MIYAZAWA_JERNIGAN
            .entries()
            .filter_map(|(pair, &energy)| parse_pair(pair).map(|p| (Self::normalize(p), energy)))
            .collect();
        Self { energies }
    }

    /// Builds a table from explicit pairs. A later entry for the same unordered pair wins.
    pub fn from_mapping(pairs: impl IntoIterator<Item = (ResiduePair, f64)>) -> Self {
        let energies = pairs
            .into_iter()
            .map(|(pair, energy)| (Self::normalize(pair), energy))
            .collect();
        Self { energies }
    }

    /// Loads a `residue_a,residue_b,energy` CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, TableLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let mut reader = csv::Reader::from_path(path).map_err(|e| TableLoadError::Csv {
            path: path_str.clone(),
            source: e,
        })?;

        let mut energies = HashMap::new();
        for result in reader.deserialize::<PairRecord>() {
            let record = result.map_err(|e| TableLoadError::Csv {
                path: path_str.clone(),
                source: e,
            })?;
            let pair = match (
                AminoAcid::from_code(record.residue_a),
                AminoAcid::from_code(record.residue_b),
            ) {
                (Ok(a), Ok(b)) => (a, b),
                _ => {
                    return Err(TableLoadError::InvalidPair {
                        path: path_str,
                        pair: format!("{}{}", record.residue_a, record.residue_b),
                    });
                }
            };
            energies.insert(Self::normalize(pair), record.energy);
        }
        Ok(Self { energies })
    }

    /// Loads a TOML file with an `[energies]` table keyed by two-letter pairs, e.g. `HP = -1.0`.
    pub fn from_toml_path(path: &Path) -> Result<Self, TableLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| TableLoadError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        let table: TomlTable = toml::from_str(&content).map_err(|e| TableLoadError::Toml {
            path: path_str.clone(),
            source: e,
        })?;

        let mut energies = HashMap::new();
        for (key, energy) in table.energies {
            let pair = parse_pair(&key).ok_or_else(|| TableLoadError::InvalidPair {
                path: path_str.clone(),
                pair: key.clone(),
            })?;
            energies.insert(Self::normalize(pair), energy);
        }
        Ok(Self { energies })
    }

    /// Loads a table, choosing the format from the file extension (`.toml`, otherwise CSV).
    pub fn load(path: &Path) -> Result<Self, TableLoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_path(path),
            _ => Self::from_csv_path(path),
        }
    }

    #[inline]
    fn normalize((a, b): ResiduePair) -> ResiduePair {
        if a <= b { (a, b) } else { (b, a) }
    }

    #[inline]
    pub fn energy(&self, a: AminoAcid, b: AminoAcid) -> Option<f64> {
        self.energies.get(&Self::normalize((a, b))).copied()
    }

    #[inline]
    pub fn contains(&self, a: AminoAcid, b: AminoAcid) -> bool {
        self.energies.contains_key(&Self::normalize((a, b)))
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

fn parse_pair(key: &str) -> Option<ResiduePair> {
    let mut chars = key.trim().chars();
    let a = AminoAcid::from_code(chars.next()?).ok()?;
    let b = AminoAcid::from_code(chars.next()?).ok()?;
    if chars.next().is_some() {
        return None;
    }
    Some((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use crate::core::models::residue::AminoAcid::{
        Histidine as H, Leucine as L, Lysine as K, Proline as P,
    };

    #[test]
    fn miyazawa_jernigan_covers_every_unordered_pair() {
        let table = InteractionTable::miyazawa_jernigan();
        assert_eq!(table.len(), 210);
        for a in AminoAcid::ALL {
            for b in AminoAcid::ALL {
                assert!(table.contains(a, b), "missing pair {}{}", a, b);
            }
        }
    }

    #[test]
    fn miyazawa_jernigan_known_values() {
        let table = InteractionTable::miyazawa_jernigan();
        assert_eq!(table.energy(L, L), Some(-7.37));
        assert_eq!(table.energy(K, K), Some(-0.12));
        assert_eq!(table.energy(H, P), Some(-2.25));
    }

    #[test]
    fn lookup_is_commutative() {
        let table = InteractionTable::miyazawa_jernigan();
        for a in AminoAcid::ALL {
            for b in AminoAcid::ALL {
                assert_eq!(table.energy(a, b), table.energy(b, a));
            }
        }
    }

    #[test]
    fn missing_pair_is_unscored() {
        let table = InteractionTable::from_mapping([((H, H), -1.0)]);
        assert_eq!(table.energy(H, P), None);
        assert!(!table.contains(P, H));
    }

    #[test]
    fn from_mapping_merges_both_orders_of_a_pair() {
        let table = InteractionTable::from_mapping([((H, P), -1.0), ((P, H), -2.0)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.energy(H, P), Some(-2.0));
    }

    #[test]
    fn loads_csv_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hp.csv");
        fs::write(
            &path,
            "residue_a,residue_b,energy\nH,H,-1.0\nH,P,0.0\nP,P,0.0\n",
        )
        .unwrap();

        let table = InteractionTable::load(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.energy(P, H), Some(0.0));
        assert_eq!(table.energy(H, H), Some(-1.0));
    }

    #[test]
    fn csv_with_unknown_residue_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "residue_a,residue_b,energy\nH,X,-1.0\n").unwrap();

        let result = InteractionTable::from_csv_path(&path);
        assert!(matches!(result, Err(TableLoadError::InvalidPair { .. })));
    }

    #[test]
    fn malformed_csv_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("malformed.csv");
        fs::write(&path, "residue_a,residue_b,energy\nH,H\n").unwrap();

        let result = InteractionTable::from_csv_path(&path);
        assert!(matches!(result, Err(TableLoadError::Csv { .. })));
    }

    #[test]
    fn loads_toml_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hp.toml");
        fs::write(
            &path,
            r#"
            [energies]
            HH = -1.0
            HP = 0.0
            PP = 0.0
            "#,
        )
        .unwrap();

        let table = InteractionTable::load(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.energy(H, H), Some(-1.0));
    }

    #[test]
    fn toml_with_bad_key_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[energies]\nHPP = 1.0\n").unwrap();

        let result = InteractionTable::from_toml_path(&path);
        assert!(matches!(result, Err(TableLoadError::InvalidPair { .. })));
    }

    #[test]
    fn missing_toml_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = InteractionTable::from_toml_path(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(TableLoadError::Io { .. })));
    }
}
