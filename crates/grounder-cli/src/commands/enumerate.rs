// Command handler for: Enumerate
//
// Prints every ground term with exactly `--size` nodes over the symbols of
// the rule file and the term, one per line.

use std::path::PathBuf;

use grounder_ir::Signature;
use tracing::info;

use super::helpers::{load_rules, load_term};
use crate::cli::TermInput;

/// Run the `enumerate` CLI command.
pub(crate) fn run_enumerate_command(
    rule_file: PathBuf,
    input: TermInput,
    size: usize,
) -> miette::Result<()> {
    let axioms = load_rules(&rule_file)?;
    let goal = load_term(&input)?;
    let signature = Signature::collect(&axioms, &goal);

    let mut count = 0usize;
    for term in signature.enumerate_subterms(size) {
        println!("{term}");
        count += 1;
    }
    info!("{count} term(s) of size {size}");
    Ok(())
}
