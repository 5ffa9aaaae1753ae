use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "cghelix",
    about = "Helical parameters of coarse-grained double-stranded DNA",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute base-pair, step and local helical parameters
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Print the embedded standard bead geometry (TOML)
    #[command(visible_alias = "r")]
    Reference(ReferenceArgs),
}

/// I/O options of the analyze command.
#[derive(Args)]
pub struct IoOptions {
    /// Input structure (stdin if omitted, requires --infmt)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output prefix; tables are written to <PREFIX>_basepair.json,
    /// <PREFIX>_step.json and <PREFIX>_local.json
    #[arg(short, long, value_name = "PREFIX")]
    pub output: PathBuf,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Frame fitting and geometry options.
#[derive(Args)]
#[command(next_help_heading = "Analysis")]
pub struct AnalysisOptions {
    /// Custom standard bead geometry (TOML file, see `cghelix reference`)
    #[arg(long, value_name = "FILE")]
    pub reference: Option<PathBuf>,

    /// Fit bases and build steps on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Relative gap below which the two largest superposition eigenvalues tie
    #[arg(long = "tie-tolerance", value_name = "TOL", default_value = "1e-10")]
    pub tie_tolerance: f64,

    /// Norm below which hinge and helical-axis vectors count as zero
    #[arg(long = "singular-tolerance", value_name = "TOL", default_value = "1e-8")]
    pub singular_tolerance: f64,
}

/// Additional output options.
#[derive(Args)]
#[command(next_help_heading = "Additional Output")]
pub struct OutputOptions {
    /// Also write base, base-pair and mid-step origins as PDB pseudo-atoms
    /// (<PREFIX>_bases.pdb, <PREFIX>_bp.pdb, <PREFIX>_midframe.pdb)
    #[arg(long)]
    pub centers: bool,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Input format (inferred from extension if not specified)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    #[command(flatten)]
    pub analysis: AnalysisOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Args)]
pub struct ReferenceArgs {
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormat {
    /// Coarse-grained PDB
    Pdb,
    /// GROMACS coordinates (nm)
    Gro,
}

pub fn parse() -> Cli {
    Cli::parse()
}
