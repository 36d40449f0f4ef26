use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Zach Sailer",
    version,
    about = "latticegpm - Genotype-phenotype maps and folding thermodynamics for 2-D lattice proteins.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to score conformation ensembles.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score the contact energy of a sequence folded onto one conformation.
    Score(ScoreArgs),
    /// Compute partition function, stability and fraction folded of a sequence.
    Thermo(ThermoArgs),
    /// Build the genotype-phenotype map between a wildtype and a mutant.
    Map(MapArgs),
    /// Draw a folded sequence as text or SVG.
    Draw(DrawArgs),
    /// Randomly search for two folding sequences that differ at chosen sites.
    Search(SearchArgs),
}

/// Options shared by every command that folds sequences against an ensemble.
#[derive(Args, Debug, Clone, Default)]
pub struct FoldingOptions {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the folding temperature.
    #[arg(short, long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Override the contact energy table (CSV or TOML). Defaults to Miyazawa-Jernigan.
    #[arg(long = "table", value_name = "PATH")]
    pub interaction_table: Option<PathBuf>,

    /// Fold every sequence to this conformation (e.g. 'RULLD') instead of its ground state.
    #[arg(long, value_name = "MOVES")]
    pub target: Option<String>,

    /// Override the maximum number of enumerated conformations.
    #[arg(long, value_name = "INT")]
    pub max_conformations: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S thermo.temperature=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Amino acid sequence in one-letter codes.
    #[arg(required = true)]
    pub sequence: String,

    /// Conformation as lattice moves (U, D, L, R), one fewer than residues.
    #[arg(required = true)]
    pub conformation: String,

    /// Contact energy table (CSV or TOML). Defaults to Miyazawa-Jernigan.
    #[arg(long = "table", value_name = "PATH")]
    pub interaction_table: Option<PathBuf>,

    /// List every scored contact.
    #[arg(long)]
    pub contacts: bool,
}

/// Arguments for the `thermo` subcommand.
#[derive(Args, Debug)]
pub struct ThermoArgs {
    /// Amino acid sequence in one-letter codes.
    #[arg(required = true)]
    pub sequence: String,

    /// Read the ensemble from a file with one conformation per line instead of
    /// enumerating every self-avoiding walk. A line reading 'none' is an absent conformation.
    #[arg(long, value_name = "PATH")]
    pub conformations: Option<PathBuf>,

    /// Print the full state, including every ensemble energy, as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub folding: FoldingOptions,
}

/// Arguments for the `map` subcommand.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Wildtype sequence.
    #[arg(required = true)]
    pub wildtype: String,

    /// Mutant sequence of the same length.
    #[arg(required = true)]
    pub mutant: String,

    /// Path for the JSON output.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the phenotype stored in the map (energy, stability, fracfolded, fitness).
    #[arg(short, long, value_name = "KIND")]
    pub phenotype: Option<String>,

    /// Write only genotypes and phenotypes, without the per-genotype thermodynamics.
    #[arg(long)]
    pub plain: bool,

    #[command(flatten)]
    pub folding: FoldingOptions,
}

/// Arguments for the `draw` subcommand.
#[derive(Args, Debug)]
pub struct DrawArgs {
    /// Amino acid sequence in one-letter codes.
    #[arg(required = true)]
    pub sequence: String,

    /// Conformation as lattice moves (U, D, L, R).
    #[arg(required = true)]
    pub conformation: String,

    /// Rotate the fold clockwise by 0, 90, 180 or 270 degrees.
    #[arg(short, long, default_value_t = 0, value_name = "DEGREES")]
    pub rotation: u32,

    /// Write an SVG file instead of printing the text diagram.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Font size of the SVG, in pixels. The drawing scales with it.
    #[arg(long, default_value_t = 20.0, value_name = "PX")]
    pub font_size: f64,

    /// Comma-separated SVG colors, one per residue (e.g. 'red,blue,blue,red').
    #[arg(long, value_name = "LIST")]
    pub colors: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Length of the sequences to search for.
    #[arg(short, long, required = true, value_name = "INT")]
    pub length: usize,

    /// Override the stability both sequences must fall below.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Number of sites at which the two sequences differ. Defaults to every site.
    #[arg(short, long, value_name = "INT")]
    pub differ_by: Option<usize>,

    /// Override the number of candidates drawn per stage before giving up.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Seed for the random number generator, for reproducible searches.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub folding: FoldingOptions,
}
