use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "basequote")]
#[command(about = "Basequote - one search across every gene synthesis vendor")]
#[command(version)]
#[command(after_help = "\x1b[1;36mQuick Start:\x1b[0m
  basequote vendors                       List the configured vendors
  basequote search batch.json             Collect offers for a sequence batch
  basequote search batch.json --output json

\x1b[1;36mConfiguration:\x1b[0m
  Vendors and their credentials live in a YAML file (default:
  basequote.yml). Misconfigured vendors stay visible and answer with a
  placeholder offer instead of failing the whole search.

\x1b[1;36mBatch files:\x1b[0m
  A JSON array of sequence records:
  [{\"key\": 1, \"name\": \"gfp\", \"sequence\": \"ATGAGTAAAGGA...\"}]")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vendor configuration file
    #[arg(short, long, global = true, default_value = "basequote.yml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the configured vendors and any bootstrap notices
    #[command(alias = "ls")]
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  basequote vendors
  basequote vendors --config deploy.yml --output yaml")]
    Vendors,

    /// Search offers for a batch of sequences across all vendors
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  basequote search batch.json
  basequote search batch.json --timeout-secs 300
  basequote search batch.json --output json > offers.json")]
    Search {
        /// JSON file with an array of {key, name, sequence} records
        batch: PathBuf,

        /// Give up polling for results after this many seconds
        #[arg(long, default_value_t = 120)]
        timeout_secs: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Yaml,
    Text,
}
