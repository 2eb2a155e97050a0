//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use grounder_oracle::backends::twee_backend::DEFAULT_TWEE_COMMAND;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grounder")]
#[command(about = "Simplify ground terms under equational axioms with a completion prover")]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Where the term comes from: `-T` inline or `-F` from a file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub(crate) struct TermInput {
    /// The term to simplify, e.g. 'mul(inv(inv(a)),one)'
    #[arg(short = 'T', long = "term")]
    pub(crate) term: Option<String>,

    /// A file containing the term to simplify
    #[arg(short = 'F', long = "term-file")]
    pub(crate) term_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Simplify a term under the axioms of a rule file
    Simplify {
        /// Rule file with one `cnf(NAME, axiom, LHS = RHS).` per line
        rule_file: PathBuf,

        #[command(flatten)]
        input: TermInput,

        /// Timeout in seconds for the final prover call (0 disables)
        #[arg(short = 't', long, default_value_t = 1)]
        timeout: u64,

        /// Prover command, invoked as `<oracle> [timeout] -`
        #[arg(long, default_value = DEFAULT_TWEE_COMMAND)]
        oracle: PathBuf,

        /// Also ground over every signature term up to this size
        #[arg(long)]
        enrich_size: Option<usize>,

        /// Directory that receives every prover input and output
        #[arg(long, env = "GROUNDER_DUMP_DIR")]
        dump_dir: Option<PathBuf>,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List every ground term of a given size over the problem's symbols
    Enumerate {
        /// Rule file with one `cnf(NAME, axiom, LHS = RHS).` per line
        rule_file: PathBuf,

        #[command(flatten)]
        input: TermInput,

        /// Number of nodes in each listed term
        #[arg(long)]
        size: usize,
    },
}
