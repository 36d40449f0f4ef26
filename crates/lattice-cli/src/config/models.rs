use latticegpm::core::models::residue::Sequence;
use latticegpm::engine::config::{MapConfig, SearchConfig, ThermoConfig};

pub struct ThermoAppConfig {
    pub sequence: Sequence,
    pub max_conformations: usize,
    pub core_config: ThermoConfig,
}

pub struct MapAppConfig {
    pub wildtype: Sequence,
    pub mutant: Sequence,
    pub core_config: MapConfig,
}

pub struct SearchAppConfig {
    pub length: usize,
    pub max_conformations: usize,
    pub seed: Option<u64>,
    pub core_config: SearchConfig,
}
