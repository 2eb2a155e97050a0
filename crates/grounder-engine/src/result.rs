use std::fmt;

use grounder_dsl::Term;
use grounder_oracle::Verdict;
use serde::Serialize;

/// How the final oracle call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalVerdict {
    Completed,
    GaveUp,
}

impl From<Verdict> for FinalVerdict {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Completed => FinalVerdict::Completed,
            Verdict::GaveUp => FinalVerdict::GaveUp,
        }
    }
}

impl fmt::Display for FinalVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalVerdict::Completed => write!(f, "completed"),
            FinalVerdict::GaveUp => write!(f, "gave_up"),
        }
    }
}

/// What happened in one intermediate round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub round: usize,
    /// Term appended to the universe this round.
    pub added: String,
    pub universe_size: usize,
    /// Instances newly emitted by grounding this round.
    pub new_instances: usize,
    /// Rules sent to the oracle, carried-over rules included.
    pub rules_sent: usize,
    pub rules_reported: usize,
    /// Tracked term once the round is over.
    pub tracked: String,
    pub simplified: bool,
}

/// Outcome of a full simplification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimplifyReport {
    pub oracle: String,
    pub original: String,
    pub original_size: usize,
    pub simplified: String,
    pub simplified_size: usize,
    #[serde(skip)]
    pub simplified_term: Term,
    /// Tracked term handed to the final call.
    pub tracked_before_final: String,
    pub rounds: Vec<RoundRecord>,
    pub final_verdict: FinalVerdict,
    /// Number of goal-equal terms found by the final call.
    pub candidates: usize,
}

impl SimplifyReport {
    pub fn was_simplified(&self) -> bool {
        self.simplified_size < self.original_size
    }
}

impl fmt::Display for SimplifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "original:   {} (size {})", self.original, self.original_size)?;
        writeln!(
            f,
            "simplified: {} (size {})",
            self.simplified, self.simplified_size
        )?;
        writeln!(
            f,
            "rounds:     {} via {}, final call {} with {} candidate(s)",
            self.rounds.len(),
            self.oracle,
            self.final_verdict,
            self.candidates
        )?;
        for record in &self.rounds {
            writeln!(
                f,
                "  round {:>3}: +{} sent={} reported={} tracked={}{}",
                record.round,
                record.added,
                record.rules_sent,
                record.rules_reported,
                record.tracked,
                if record.simplified { " *" } else { "" }
            )?;
        }
        Ok(())
    }
}
