//! Command-line argument definitions and parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "matter-yaml",
    version,
    about = "Parse, serialize and validate YAML front matter",
    long_about = "matter-yaml reads and writes documents that start with a YAML block \
                  fenced by `---` lines. It can dump the decoded front matter, check \
                  documents for well-formed front matter, build documents from data, \
                  and normalize the front matter of existing files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the decoded front matter and content of documents
    Parse(ParseArgs),
    /// Check documents for well-formed front matter
    Validate(ValidateArgs),
    /// Build a document from a record file with `data` and `content` fields
    Serialize(SerializeArgs),
    /// Re-encode the front matter of documents in place
    Fmt(FmtArgs),
}

/// Options for decoding front matter
#[derive(Args, Debug, Clone, Default)]
pub struct DecodeArgs {
    /// Accept application tags such as `!include`
    #[arg(long)]
    pub allow_custom_tags: bool,
}

/// Options for encoding front matter
#[derive(Args, Debug, Clone, Default)]
pub struct EncodeArgs {
    /// Load encode options from a YAML or JSON file; flags override it
    #[arg(long = "options", value_name = "FILE")]
    pub options_file: Option<PathBuf>,

    /// Spaces per nesting level
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Do not indent sequences nested under a key
    #[arg(long)]
    pub no_array_indent: bool,

    /// Nesting depth from which collections use flow style
    #[arg(long, value_name = "DEPTH")]
    pub flow_level: Option<usize>,

    /// Sort mapping keys
    #[arg(long)]
    pub sort_keys: bool,

    /// Drop entries that cannot be encoded instead of failing
    #[arg(long)]
    pub skip_invalid: bool,
}

/// Output formats for parsed records
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Files or directories to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub decode: DecodeArgs,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files or directories to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub decode: DecodeArgs,
}

/// Arguments for the serialize command
#[derive(Args, Debug)]
pub struct SerializeArgs {
    /// YAML or JSON file holding `data` and `content`
    pub record: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub encode: EncodeArgs,
}

/// Arguments for the fmt command
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Files or directories to format
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// List files that would change without writing them
    #[arg(long)]
    pub check: bool,

    #[command(flatten)]
    pub encode: EncodeArgs,

    #[command(flatten)]
    pub decode: DecodeArgs,
}
