use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileThermoConfig};
use super::models::{MapAppConfig, SearchAppConfig, ThermoAppConfig};
use crate::cli::{FoldingOptions, MapArgs, SearchArgs, ThermoArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use latticegpm::core::energy::table::InteractionTable;
use latticegpm::engine::config::{self as core_config, PhenotypeKind, ThermoConfig};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub fn build_thermo_config(args: &ThermoArgs) -> Result<ThermoAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.folding)?;
    let thermo_file = file_config.thermo.take().unwrap_or_default();

    let (core_config, max_conformations) = merge_thermo(&args.folding, thermo_file, &defaults)?;

    Ok(ThermoAppConfig {
        sequence: parser::parse_sequence(&args.sequence)?,
        max_conformations,
        core_config,
    })
}

pub fn build_map_config(args: &MapArgs) -> Result<MapAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.folding)?;
    let thermo_file = file_config.thermo.take().unwrap_or_default();
    let map_file = file_config.map.take().unwrap_or_default();

    let (thermo, max_conformations) = merge_thermo(&args.folding, thermo_file, &defaults)?;

    let phenotype_name = args
        .phenotype
        .as_deref()
        .or(map_file.phenotype.as_deref())
        .unwrap_or(defaults.phenotype);
    let phenotype =
        PhenotypeKind::from_str(phenotype_name).map_err(|e| CliError::Config(e.to_string()))?;

    let core_config = core_config::MapConfigBuilder::new()
        .temperature(thermo.temperature)
        .interaction_table(thermo.interaction_table)
        .target(thermo.target)
        .phenotype(phenotype)
        .max_conformations(max_conformations)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(MapAppConfig {
        wildtype: parser::parse_sequence(&args.wildtype)?,
        mutant: parser::parse_sequence(&args.mutant)?,
        core_config,
    })
}

pub fn build_search_config(args: &SearchArgs) -> Result<SearchAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.folding)?;
    let thermo_file = file_config.thermo.take().unwrap_or_default();
    let search_file = file_config.search.take().unwrap_or_default();

    let (thermo, max_conformations) = merge_thermo(&args.folding, thermo_file, &defaults)?;

    let threshold = args
        .threshold
        .or(search_file.threshold)
        .unwrap_or(defaults.threshold);
    let max_iterations = args
        .max_iterations
        .or(search_file.max_iterations)
        .unwrap_or(defaults.max_iterations);
    let differ_by = args.differ_by.or(search_file.differ_by);

    let core_config = core_config::SearchConfigBuilder::new()
        .temperature(thermo.temperature)
        .interaction_table(thermo.interaction_table)
        .target(thermo.target)
        .threshold(threshold)
        .differ_by(differ_by)
        .max_iterations(max_iterations)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(SearchAppConfig {
        length: args.length,
        max_conformations,
        seed: args.seed.or(search_file.seed),
        core_config,
    })
}

fn load_file_config(folding: &FoldingOptions) -> Result<FileConfig> {
    let file_config = if let Some(config_path) = &folding.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    apply_set_values(file_config, &folding.set_values)
}

fn merge_thermo(
    folding: &FoldingOptions,
    file_val: FileThermoConfig,
    defaults: &DefaultsConfig,
) -> Result<(ThermoConfig, usize)> {
    let temperature = folding
        .temperature
        .or(file_val.temperature)
        .unwrap_or(defaults.temperature);
    let max_conformations = folding
        .max_conformations
        .or(file_val.max_conformations)
        .unwrap_or(defaults.max_conformations);

    let table_path = folding
        .interaction_table
        .clone()
        .or(file_val.interaction_table.map(PathBuf::from));
    let interaction_table = match table_path {
        Some(path) => load_table(&path)?,
        None => InteractionTable::miyazawa_jernigan(),
    };

    let target = folding
        .target
        .as_deref()
        .or(file_val.target.as_deref())
        .map(parser::parse_conformation)
        .transpose()?;

    Ok((
        ThermoConfig {
            temperature,
            interaction_table,
            target,
        },
        max_conformations,
    ))
}

fn load_table(path: &Path) -> Result<InteractionTable> {
    debug!("Loading contact energy table from {:?}", path);
    if !path.exists() {
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Provided path does not exist: {}", path.display()),
        )));
    }
    InteractionTable::load(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "thermo.temperature" => {
                config.thermo.get_or_insert_with(Default::default).temperature =
                    Some(parse_value(key, value_str, "float")?);
            }
            "thermo.interaction-table" => {
                config
                    .thermo
                    .get_or_insert_with(Default::default)
                    .interaction_table = Some(value_str.to_string());
            }
            "thermo.target" => {
                config.thermo.get_or_insert_with(Default::default).target =
                    Some(value_str.to_string());
            }
            "thermo.max-conformations" => {
                config
                    .thermo
                    .get_or_insert_with(Default::default)
                    .max_conformations = Some(parse_value(key, value_str, "integer")?);
            }
            "map.phenotype" => {
                config.map.get_or_insert_with(Default::default).phenotype =
                    Some(value_str.to_string());
            }
            "search.threshold" => {
                config.search.get_or_insert_with(Default::default).threshold =
                    Some(parse_value(key, value_str, "float")?);
            }
            "search.differ-by" => {
                config.search.get_or_insert_with(Default::default).differ_by =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "search.max-iterations" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .max_iterations = Some(parse_value(key, value_str, "integer")?);
            }
            "search.seed" => {
                config.search.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn thermo_args(sequence: &str) -> ThermoArgs {
        ThermoArgs {
            sequence: sequence.to_string(),
            conformations: None,
            json: false,
            folding: FoldingOptions::default(),
        }
    }

    fn map_args() -> MapArgs {
        MapArgs {
            wildtype: "HPPH".to_string(),
            mutant: "PPPH".to_string(),
            output: PathBuf::from("map.json"),
            phenotype: None,
            plain: false,
            folding: FoldingOptions::default(),
        }
    }

    fn search_args() -> SearchArgs {
        SearchArgs {
            length: 4,
            threshold: None,
            differ_by: None,
            max_iterations: None,
            seed: None,
            folding: FoldingOptions::default(),
        }
    }

    #[test]
    fn thermo_config_falls_back_to_defaults() {
        let app = build_thermo_config(&thermo_args("HPPH")).unwrap();
        let defaults = DefaultsConfig::default();
        assert_eq!(app.sequence.to_string(), "HPPH");
        assert_eq!(app.max_conformations, defaults.max_conformations);
        assert_eq!(app.core_config.temperature, defaults.temperature);
        assert_eq!(
            app.core_config.interaction_table,
            InteractionTable::miyazawa_jernigan()
        );
        assert!(app.core_config.target.is_none());
    }

    #[test]
    fn cli_flags_override_file_which_overrides_defaults() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            [thermo]
            temperature = 0.5
            max-conformations = 77
            target = "RDL"

            [map]
            phenotype = "fracfolded"
            "#,
        )
        .unwrap();

        let mut args = map_args();
        args.folding.config = Some(cfg_path);
        args.folding.temperature = Some(2.0);

        let app = build_map_config(&args).unwrap();
        let cfg = app.core_config;
        assert_eq!(cfg.thermo.temperature, 2.0);
        assert_eq!(cfg.max_conformations, 77);
        assert_eq!(cfg.thermo.target.map(|c| c.to_string()), Some("RDL".into()));
        assert_eq!(cfg.phenotype, PhenotypeKind::FracFolded);
        assert_eq!(app.wildtype.to_string(), "HPPH");
        assert_eq!(app.mutant.to_string(), "PPPH");
    }

    #[test]
    fn set_values_override_the_file() {
        let mut args = map_args();
        args.folding.set_values = vec![
            "thermo.temperature=0.25".to_string(),
            "map.phenotype=fitness".to_string(),
        ];
        let cfg = build_map_config(&args).unwrap().core_config;
        assert_eq!(cfg.thermo.temperature, 0.25);
        assert_eq!(cfg.phenotype, PhenotypeKind::Fitness);
    }

    #[test]
    fn phenotype_flag_beats_every_other_source() {
        let mut args = map_args();
        args.folding.set_values = vec!["map.phenotype=fitness".to_string()];
        args.phenotype = Some("energy".to_string());
        let cfg = build_map_config(&args).unwrap().core_config;
        assert_eq!(cfg.phenotype, PhenotypeKind::Energy);
    }

    #[test]
    fn unknown_phenotype_is_a_config_error() {
        let mut args = map_args();
        args.phenotype = Some("viscosity".to_string());
        assert!(matches!(build_map_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn search_config_merges_every_source() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            "[search]\nthreshold = -3.0\ndiffer-by = 2\nseed = 9\n",
        )
        .unwrap();

        let mut args = search_args();
        args.folding.config = Some(cfg_path);
        args.max_iterations = Some(50);

        let app = build_search_config(&args).unwrap();
        assert_eq!(app.length, 4);
        assert_eq!(app.seed, Some(9));
        assert_eq!(app.core_config.threshold, -3.0);
        assert_eq!(app.core_config.differ_by, Some(2));
        assert_eq!(app.core_config.max_iterations, 50);
    }

    #[test]
    fn search_config_defaults() {
        let app = build_search_config(&search_args()).unwrap();
        let defaults = DefaultsConfig::default();
        assert_eq!(app.core_config.threshold, defaults.threshold);
        assert_eq!(app.core_config.max_iterations, defaults.max_iterations);
        assert_eq!(app.core_config.differ_by, None);
        assert_eq!(app.seed, None);
    }

    #[test]
    fn table_path_is_loaded() {
        let dir = tempdir().unwrap();
        let table_path = dir.path().join("hp.csv");
        fs::write(&table_path, "residue_a,residue_b,energy\nH,H,-1.0\nH,P,0.0\nP,P,0.0\n").unwrap();

        let mut args = thermo_args("HPPH");
        args.folding.interaction_table = Some(table_path);
        let app = build_thermo_config(&args).unwrap();
        assert_eq!(app.core_config.interaction_table.len(), 3);
    }

    #[test]
    fn missing_table_is_an_io_error() {
        let dir = tempdir().unwrap();
        let mut args = thermo_args("HPPH");
        args.folding.interaction_table = Some(dir.path().join("missing.csv"));
        assert!(matches!(build_thermo_config(&args), Err(CliError::Io(_))));
    }

    #[test]
    fn invalid_target_is_an_argument_error() {
        let mut args = thermo_args("HPPH");
        args.folding.target = Some("RXL".to_string());
        assert!(matches!(
            build_thermo_config(&args),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn apply_set_values_rejects_malformed_pairs() {
        let result = apply_set_values(FileConfig::default(), &["thermo.temperature".to_string()]);
        assert!(matches!(result, Err(CliError::Config(_))));

        let result = apply_set_values(FileConfig::default(), &["thermo.volume=3".to_string()]);
        assert!(matches!(result, Err(CliError::Config(_))));

        let result =
            apply_set_values(FileConfig::default(), &["search.differ-by=two".to_string()]);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn apply_set_values_fills_nested_sections() {
        let config = apply_set_values(
            FileConfig::default(),
            &[
                "thermo.target=RUL".to_string(),
                "search.seed=11".to_string(),
                "thermo.max-conformations=10".to_string(),
            ],
        )
        .unwrap();
        let thermo = config.thermo.unwrap();
        assert_eq!(thermo.target.as_deref(), Some("RUL"));
        assert_eq!(thermo.max_conformations, Some(10));
        assert_eq!(config.search.unwrap().seed, Some(11));
    }
}
