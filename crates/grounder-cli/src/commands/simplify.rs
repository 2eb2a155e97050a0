// Command handler for: Simplify
//
// Loads the rule file and term, runs the refinement loop against the Twee
// backend and prints the simplified term or the full JSON report.

use std::path::PathBuf;

use grounder_engine::{simplify, PipelineOptions};
use grounder_oracle::backends::twee_backend::{TweeConfig, TweeOracle};
use miette::{Context, IntoDiagnostic};
use tracing::info;

use super::helpers::{load_rules, load_term, parse_output_format, OutputFormat};
use crate::cli::TermInput;

pub(crate) struct SimplifyArgs {
    pub(crate) rule_file: PathBuf,
    pub(crate) input: TermInput,
    pub(crate) timeout: u64,
    pub(crate) oracle: PathBuf,
    pub(crate) enrich_size: Option<usize>,
    pub(crate) dump_dir: Option<PathBuf>,
    pub(crate) format: String,
}

/// Run the `simplify` CLI command.
pub(crate) fn run_simplify_command(args: SimplifyArgs) -> miette::Result<()> {
    let format = parse_output_format(&args.format)?;
    let axioms = load_rules(&args.rule_file)?;
    let goal = load_term(&args.input)?;

    if let Some(dir) = &args.dump_dir {
        info!("Dumping prover traffic to {}", dir.display());
    }
    let mut oracle = TweeOracle::with_config(TweeConfig {
        command: args.oracle,
        dump_dir: args.dump_dir,
    });
    let options = PipelineOptions {
        final_timeout_secs: args.timeout,
        enrich_up_to_size: args.enrich_size,
    };

    let report = simplify(&goal, &axioms, &mut oracle, &options)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to simplify {goal}"))?;
    info!(
        "{} prover call(s), final call {}",
        oracle.calls(),
        report.final_verdict
    );

    match format {
        OutputFormat::Text => println!("{}", report.simplified),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
            println!("{json}");
        }
    }
    Ok(())
}
