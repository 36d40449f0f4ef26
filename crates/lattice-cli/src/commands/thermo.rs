use crate::cli::ThermoArgs;
use crate::config::builder::build_thermo_config;
use crate::config::models::ThermoAppConfig;
use crate::error::{CliError, Result};
use crate::utils::parser;
use latticegpm::core::conformations::ConformationSource;
use latticegpm::core::conformations::enumerate::SelfAvoidingWalks;
use latticegpm::core::models::conformation::Conformation;
use latticegpm::core::models::residue::Sequence;
use latticegpm::engine::error::EngineError;
use latticegpm::engine::thermo::{EnsembleMember, LatticeThermodynamics, ThermodynamicState};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct ThermoReport<'a> {
    sequence: &'a Sequence,
    temperature: f64,
    #[serde(flatten)]
    state: &'a ThermodynamicState,
}

pub fn run(args: ThermoArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_thermo_config(&args)?;

    let state = match &args.conformations {
        Some(path) => {
            info!("Reading conformation ensemble from {:?}", path);
            let ensemble = parser::read_conformations(path)?;
            evaluate(&app, &ensemble)?
        }
        None if app.sequence.len() < 2 => evaluate(&app, &[Conformation::default()])?,
        None => {
            info!(
                length = app.sequence.len(),
                "Enumerating self-avoiding walks..."
            );
            let walks = SelfAvoidingWalks::enumerate(app.sequence.len(), app.max_conformations)
                .map_err(EngineError::from)?;
            evaluate(&app, walks.conformations())?
        }
    };

    if args.json {
        let report = ThermoReport {
            sequence: &app.sequence,
            temperature: app.core_config.temperature,
            state: &state,
        };
        let json = serde_json::to_string_pretty(&report).map_err(|e| CliError::Other(e.into()))?;
        println!("{}", json);
    } else {
        print!("{}", render(&app.sequence, app.core_config.temperature, &state));
    }
    Ok(())
}

fn evaluate<M: EnsembleMember>(app: &ThermoAppConfig, ensemble: &[M]) -> Result<ThermodynamicState> {
    let thermo = &app.core_config;
    let state = match &thermo.target {
        Some(target) => ThermodynamicState::against_target(
            &app.sequence,
            ensemble,
            target,
            thermo.temperature,
            &thermo.interaction_table,
        )?,
        None => LatticeThermodynamics::new(
            app.sequence.clone(),
            ensemble,
            thermo.temperature,
            Some(&thermo.interaction_table),
        )?
        .into_state(),
    };
    info!(
        stability = state.stability,
        folded = state.folded,
        "Thermodynamics computed."
    );
    Ok(state)
}

fn render(sequence: &Sequence, temperature: f64, state: &ThermodynamicState) -> String {
    let native = state
        .native_conformation
        .as_ref()
        .map_or_else(|| "none".to_string(), |c| c.to_string());
    let scored = state.energies.iter().filter(|e| e.is_some()).count();
    format!(
        "sequence:       {}\n\
         temperature:    {}\n\
         conformations:  {} ({} scored)\n\
         native:         {}\n\
         native energy:  {:.4}\n\
         partition sum:  {:.6e}\n\
         stability:      {:.4}\n\
         folded:         {}\n\
         fracfolded:     {:.6}\n",
        sequence,
        temperature,
        state.energies.len(),
        scored,
        native,
        state.native_energy,
        state.partition_sum,
        state.stability,
        state.folded,
        state.fracfolded,
    )
}
