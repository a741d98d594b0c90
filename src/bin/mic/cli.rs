use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use motif_ic::io::{Format, OutputFormat};
use motif_ic::scan::GapPolicy;

#[derive(Parser)]
#[command(
    name = "mic",
    about = "Locate sequence motifs in protein structures and extract their internal coordinates",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find a motif in a set of structures and extract its geometry
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    /// Print the residue sequence of each chain as FASTA
    Seq(SeqArgs),
}

/// Structure file options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Structure Files")]
pub struct InputOptions {
    /// Structure file format
    #[arg(short = 'f', long = "format", value_name = "FORMAT", default_value = "pdb")]
    pub format: StructureFormat,

    /// Structure files are gzip-compressed
    #[arg(short = 'g', long)]
    pub gzipped: bool,
}

/// Engine options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Scanning")]
pub struct ScanOptions {
    /// Engine settings (TOML file); command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How non-standard residues are treated in the sequence
    #[arg(long = "gap-policy", value_name = "POLICY")]
    pub gap_policy: Option<GapPolicyArg>,

    /// Model serial to scan (first model if omitted)
    #[arg(long, value_name = "N")]
    pub model: Option<usize>,

    /// Also extract side-chain geometry, chi torsions included
    #[arg(long)]
    pub side_chains: bool,

    /// Treat residues whose C–N distance exceeds this as a chain break (Å)
    #[arg(long = "peptide-bond-cutoff", value_name = "Å")]
    pub peptide_bond_cutoff: Option<f64>,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Amino-acid sequence to find, in one-letter codes
    #[arg(value_name = "MOTIF")]
    pub motif: String,

    /// Directory containing the structure files
    #[arg(value_name = "STRUCTURE_DIR")]
    pub structure_dir: PathBuf,

    /// Chain query list (CSV: Protein ID, File Path, Chain); scans every file
    /// and chain in STRUCTURE_DIR if omitted
    #[arg(short = 'q', long = "query-list", value_name = "FILE")]
    pub query_list: Option<PathBuf>,

    /// The query list has no header row
    #[arg(long = "no-query-header", requires = "query_list")]
    pub no_query_header: bool,

    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    /// Number of structures scanned in parallel
    #[arg(short = 'j', long, value_name = "N", default_value = "1")]
    pub jobs: usize,
}

#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output layout
    #[arg(long = "outfmt", value_name = "FORMAT", default_value = "csv")]
    pub outfmt: OutputFormatArg,

    /// Omit the column-name row of tabular output
    #[arg(long)]
    pub no_header: bool,

    /// Suppress progress output (for scripting)
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct SeqArgs {
    /// Structure file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputOptions,

    #[command(flatten)]
    pub scan: ScanOptions,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StructureFormat {
    /// Protein Data Bank
    Pdb,
    /// PDBx/mmCIF
    #[value(alias = "mmcif")]
    Cif,
}

impl From<StructureFormat> for Format {
    fn from(value: StructureFormat) -> Self {
        match value {
            StructureFormat::Pdb => Format::Pdb,
            StructureFormat::Cif => Format::Mmcif,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GapPolicyArg {
    /// Drop non-standard residues from the sequence
    Strict,
    /// Keep polymer-like non-standard residues as 'X'
    Permissive,
}

impl From<GapPolicyArg> for GapPolicy {
    fn from(value: GapPolicyArg) -> Self {
        match value {
            GapPolicyArg::Strict => GapPolicy::Strict,
            GapPolicyArg::Permissive => GapPolicy::Permissive,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormatArg {
    /// One row per residue per match, comma separated
    #[default]
    Csv,
    /// One row per residue per match, tab separated
    Tsv,
    /// One row per coordinate value
    Long,
    /// Full report, skipped targets included
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Tsv => OutputFormat::Tsv,
            OutputFormatArg::Long => OutputFormat::Long,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
