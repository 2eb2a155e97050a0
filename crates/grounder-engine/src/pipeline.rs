use grounder_dsl::{parse_axioms, parse_term, Axiom, DslError, Term};
use grounder_ir::{GroundingError, Signature};
use grounder_oracle::{CompletionOracle, OracleProtocolError};
use thiserror::Error;
use tracing::info;

use crate::refinement::{Phase, RefinementContext};
use crate::result::SimplifyReport;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Rule or term error: {0}")]
    Dsl(#[from] DslError),
    #[error("Goal term must be ground, found variable `{var}` in `{term}`")]
    NonGroundGoal { term: String, var: String },
    #[error("The `goal` marker is reserved, but `{found_in}` uses it")]
    ReservedGoalMarker { found_in: String },
    #[error("Grounding error: {0}")]
    Grounding(#[from] GroundingError),
    #[error("Oracle protocol error: {0}")]
    Protocol(#[from] OracleProtocolError),
    #[error("Oracle `{oracle}` failed: {source}")]
    Oracle {
        oracle: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Refinement loop cannot {action} in phase {phase:?}")]
    InvalidPhase { action: &'static str, phase: Phase },
}

/// Options for a simplification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Timeout forwarded to the final oracle call. 0 means no timeout.
    pub final_timeout_secs: u64,
    /// Also schedule every signature term up to this size after the goal's
    /// own subterms.
    pub enrich_up_to_size: Option<usize>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            final_timeout_secs: 1,
            enrich_up_to_size: None,
        }
    }
}

impl PipelineOptions {
    pub fn final_timeout(&self) -> Option<u64> {
        if self.final_timeout_secs == 0 {
            None
        } else {
            Some(self.final_timeout_secs)
        }
    }
}

/// Simplify `goal` under `axioms`, asking `oracle` once per scheduled term
/// and once more for the final extraction.
pub fn simplify<O: CompletionOracle>(
    goal: &Term,
    axioms: &[Axiom],
    oracle: &mut O,
    options: &PipelineOptions,
) -> Result<SimplifyReport, PipelineError> {
    let mut ctx = RefinementContext::new(goal.clone(), axioms.to_vec())?;
    if let Some(max_size) = options.enrich_up_to_size {
        let signature = Signature::collect(axioms, goal);
        let added = ctx.extend_schedule(signature.enumerate_up_to(max_size));
        info!("Enriched schedule with {added} signature term(s) up to size {max_size}");
    }
    ctx.run(oracle, options.final_timeout())
}

/// Parse a rule file and a term, then [`simplify`].
pub fn simplify_source<O: CompletionOracle>(
    rules_source: &str,
    term_text: &str,
    oracle: &mut O,
    options: &PipelineOptions,
) -> Result<SimplifyReport, PipelineError> {
    let axioms = parse_axioms(rules_source)?;
    let goal = parse_term(term_text)?;
    simplify(&goal, &axioms, oracle, options)
}
