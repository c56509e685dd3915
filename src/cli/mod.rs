//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ontorule",
    version,
    about = "Deterministic rule-based ontology enrichment for CVE descriptions",
    long_about = "Ontorule extracts ontology classes, typed relations, and subsumption axioms \
                  from free-text vulnerability descriptions using hand-authored, tiered \
                  regular-expression rules. Fully offline and reproducible: the same rule set \
                  and input always produce identical output."
)]
pub struct Cli {
    /// Rule definitions file (defaults to the builtin rule set)
    #[arg(long, global = true, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Taxonomy definitions file (defaults to the builtin taxonomy)
    #[arg(long, global = true, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enrich a batch of CVE records from a JSON file
    Extract {
        /// Input JSON file with records ({"id", "prompt_input"})
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of records to process
        #[arg(short, long)]
        max: Option<usize>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Run a single description through the engine and print the breakdown
    Sample {
        /// Description text (a builtin example when omitted)
        text: Option<String>,
    },

    /// Show rule registry statistics
    Stats,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
