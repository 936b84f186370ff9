//! CLI argument definitions for the GEM translator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use gem_model::{Direction, Revision};

#[derive(Parser)]
#[command(
    name = "gem-translate",
    version,
    about = "Translate ICD-9-CM and ICD-10-CM codes through the General Equivalence Mappings",
    long_about = "Translate ICD-9-CM and ICD-10-CM codes and code ranges through the \
                  CMS General Equivalence Mappings.\n\n\
                  The CMS GEM text files (2018_I9gem.txt and 2018_I10gem.txt) are not \
                  bundled. Download them from CMS and point --gem-dir or the \
                  GEM_DATA_DIR environment variable at their directory; without \
                  either, data/gems/ in the workspace is tried."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory holding the GEM text files (overrides GEM_DATA_DIR).
    #[arg(long = "gem-dir", value_name = "DIR", global = true)]
    pub gem_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate codes and code ranges through one GEM direction.
    Translate(TranslateArgs),

    /// List the codes a range expands to.
    Expand(ExpandArgs),

    /// Show the mapping entry of one source code.
    Lookup(LookupArgs),
}

#[derive(Args)]
pub struct TranslateArgs {
    /// Translation direction (I9_I10 or I10_I9).
    #[arg(long = "direction", short = 'd', value_name = "DIRECTION")]
    pub direction: Direction,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Codes or ranges such as C00-D48, in source-revision notation.
    #[arg(value_name = "SPEC", required = true)]
    pub specifiers: Vec<String>,
}

#[derive(Args)]
pub struct ExpandArgs {
    /// Revision of the range endpoints (ICD-9 or ICD-10).
    #[arg(
        long = "revision",
        short = 'r',
        value_name = "REVISION",
        required_unless_present = "direction",
        conflicts_with = "direction"
    )]
    pub revision: Option<Revision>,

    /// Only list codes the loaded GEMs define for the revision.
    #[arg(long = "defined", requires = "revision")]
    pub defined: bool,

    /// Only list source codes of this GEM direction.
    #[arg(long = "direction", short = 'd', value_name = "DIRECTION")]
    pub direction: Option<Direction>,

    /// Range to expand, such as 140-141.
    #[arg(value_name = "RANGE")]
    pub range: String,
}

#[derive(Args)]
pub struct LookupArgs {
    /// GEM direction to look the code up in.
    #[arg(long = "direction", short = 'd', value_name = "DIRECTION")]
    pub direction: Direction,

    /// Source code.
    #[arg(value_name = "CODE")]
    pub code: String,
}

/// Translation output choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    /// One row per source code.
    Table,
    /// One target code per line.
    Lines,
    /// Full translation as JSON.
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
