use clap::builder::TypedValueParser;
use clap::Parser;

use handle_hunter::config::{DEFAULT_CONCURRENCY, DEFAULT_USER_AGENT};

const MAX_CONCURRENCY: u64 = 10_000;
const MAX_TIMEOUT_SECS: u64 = 3_600;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable detailed debug logging (global)
    #[arg(long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Enable verbose logging (global)
    #[arg(long, default_value_t = false, global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Search every catalog site for a username
    Search {
        /// Username to look for (prompted for when omitted)
        username: Option<String>,

        /// Site catalog JSON file
        #[arg(long, default_value = "data.json")]
        catalog: String,

        /// Output directory for reports
        #[arg(short = 'o', long, default_value = "./results")]
        out: String,

        /// Maximum probes in flight
        #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY, value_parser = clap::value_parser!(u64).range(1..=MAX_CONCURRENCY).map(|n| n as usize))]
        concurrency: usize,

        /// Per-request timeout in seconds (default: 5)
        #[arg(long, default_value_t = 5_u64, value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
        timeout: u64,

        /// User-Agent header sent with every probe
        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        user_agent: String,

        /// Only print sites where an account was found
        #[arg(long, default_value_t = false)]
        only_found: bool,

        /// Skip writing HTML/CSV/JSONL reports
        #[arg(long, default_value_t = false)]
        no_report: bool,

        /// Hide the progress bar
        #[arg(long, default_value_t = false)]
        no_progress: bool,
    },

    /// List the sites in the catalog
    Sites {
        /// Site catalog JSON file
        #[arg(long, default_value = "data.json")]
        catalog: String,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
