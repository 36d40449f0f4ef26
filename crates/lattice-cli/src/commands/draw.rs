use crate::cli::DrawArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use latticegpm::core::drawing::FoldDiagram;
use tracing::info;

pub fn run(args: DrawArgs) -> Result<()> {
    let sequence = parser::parse_sequence(&args.sequence)?;
    let conformation = parser::parse_conformation(&args.conformation)?;

    let mut diagram = FoldDiagram::build(&sequence, &conformation, args.rotation)
        .map_err(|e| CliError::Argument(e.to_string()))?;
    if let Some(colors) = &args.colors {
        diagram = diagram
            .with_colors(parser::parse_colors(colors)?)
            .map_err(|e| CliError::Argument(e.to_string()))?;
    }

    match &args.output {
        Some(path) => {
            info!("Writing SVG diagram to {:?}", path);
            diagram.save_svg(path, args.font_size)?;
            println!("Diagram written to: {}", path.display());
        }
        None => println!("{}", diagram.to_text()),
    }
    Ok(())
}
