use crate::cli::SearchArgs;
use crate::config::builder::build_search_config;
use crate::error::Result;
use latticegpm::core::conformations::enumerate::SelfAvoidingWalks;
use latticegpm::core::models::residue::Sequence;
use latticegpm::engine::error::EngineError;
use latticegpm::engine::thermo::ThermodynamicState;
use latticegpm::workflows;
use latticegpm::workflows::search::SearchResult;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

pub fn run(args: SearchArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_search_config(&args)?;

    info!(length = app.length, "Enumerating self-avoiding walks...");
    let walks = SelfAvoidingWalks::enumerate(app.length, app.max_conformations)
        .map_err(EngineError::from)?;

    let mut rng = match app.seed {
        Some(seed) => {
            info!(seed, "Seeding the random number generator.");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    println!(
        "Searching for two sequences of length {} with stability below {}...",
        app.length, app.core_config.threshold
    );
    let result = workflows::search::run(&walks, &app.core_config, &mut rng)?;
    print!("{}", render(&result));
    Ok(())
}

fn render(result: &SearchResult) -> String {
    format!(
        "{}{}found after {} candidates\n",
        describe("first:", &result.first, &result.first_state),
        describe("second:", &result.second, &result.second_state),
        result.iterations
    )
}

fn describe(label: &str, sequence: &Sequence, state: &ThermodynamicState) -> String {
    let native = state
        .native_conformation
        .as_ref()
        .map_or_else(|| "none".to_string(), |c| c.to_string());
    format!(
        "{:<7} {}  stability {:.4}  native {}\n",
        label, sequence, state.stability, native
    )
}
