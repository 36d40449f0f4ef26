pub struct DefaultsConfig {
    pub temperature: f64,
    pub max_conformations: usize,
    pub phenotype: &'static str,
    pub threshold: f64,
    pub max_iterations: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_conformations: 1_000_000,
            phenotype: "stability",
            threshold: -1.0,
            max_iterations: 1000,
        }
    }
}
