use crate::cli::ScoreArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use latticegpm::core::energy::scoring::FoldScorer;
use latticegpm::core::energy::table::InteractionTable;
use latticegpm::core::models::conformation::Conformation;
use latticegpm::core::models::residue::Sequence;
use latticegpm::engine::error::EngineError;
use std::fmt::Write;
use tracing::info;

pub fn run(args: ScoreArgs) -> Result<()> {
    let sequence = parser::parse_sequence(&args.sequence)?;
    let conformation = parser::parse_conformation(&args.conformation)?;

    let table = match &args.interaction_table {
        Some(path) => {
            info!("Loading contact energy table from {:?}", path);
            InteractionTable::load(path).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })?
        }
        None => InteractionTable::miyazawa_jernigan(),
    };

    print!("{}", render(&table, &sequence, &conformation, args.contacts)?);
    Ok(())
}

fn render(
    table: &InteractionTable,
    sequence: &Sequence,
    conformation: &Conformation,
    with_contacts: bool,
) -> Result<String> {
    let scorer = FoldScorer::new(table);
    let energy = scorer
        .fold_energy(sequence, Some(conformation))
        .map_err(EngineError::from)?;
    info!(sequence = %sequence, conformation = %conformation, energy, "Scored fold.");

    let mut out = String::new();
    let _ = writeln!(out, "{} {} energy: {:.4}", sequence, conformation, energy);

    if with_contacts {
        let contacts = scorer
            .contacts(sequence, Some(conformation))
            .map_err(EngineError::from)?;
        if contacts.is_empty() {
            let _ = writeln!(out, "  no contacts");
        }
        for contact in contacts {
            let (a, b) = contact.residues;
            let pair_energy = table.energy(a, b).unwrap_or_default();
            let _ = writeln!(
                out,
                "  {:>3}-{:<3} {}{} {:.4}",
                contact.i, contact.j, a, b, pair_energy
            );
        }
    }
    Ok(out)
}
