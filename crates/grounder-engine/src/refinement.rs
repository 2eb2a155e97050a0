//! The round-by-round refinement state machine.
//!
//! A [`RefinementContext`] moves through
//! `{Grounding -> Querying -> Extracting}* -> FinalQuerying -> FinalExtracting -> Done`.
//! Construction performs the initial schedule computation. Every other
//! transition is one method, and calling a method in the wrong phase is an
//! error rather than a silent no-op.

use grounder_dsl::{Axiom, Term, GOAL_MARKER};
use grounder_ir::{Grounder, Universe};
use grounder_oracle::{AcceptedResponse, CompletionOracle, Problem, RoundKind};
use tracing::{debug, info, warn};

use crate::extraction::{final_candidates, round_candidate, smallest};
use crate::pipeline::PipelineError;
use crate::result::{RoundRecord, SimplifyReport};

/// Label of the final oracle call in logs and dumps.
pub const FINAL_LABEL: &str = "final";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Grounding,
    Querying,
    Extracting,
    FinalQuerying,
    FinalExtracting,
    Done,
}

#[derive(Debug, Clone)]
struct RoundInProgress {
    added: Term,
    new_instances: usize,
    rules_sent: usize,
}

/// All state carried between rounds of one simplification.
#[derive(Debug, Clone)]
pub struct RefinementContext {
    axioms: Vec<Axiom>,
    original: Term,
    schedule: Vec<Term>,
    next: usize,
    universe: Universe,
    grounder: Grounder,
    rules: Vec<Axiom>,
    tracked: Term,
    round: usize,
    phase: Phase,
    current: Option<RoundInProgress>,
    pending: Option<AcceptedResponse>,
    oracle_name: String,
    history: Vec<RoundRecord>,
}

impl RefinementContext {
    /// Schedule the goal's distinct subterms, smallest first.
    pub fn new(goal: Term, axioms: Vec<Axiom>) -> Result<Self, PipelineError> {
        if let Some(var) = goal.vars().into_iter().next() {
            return Err(PipelineError::NonGroundGoal {
                term: goal.to_string(),
                var,
            });
        }
        if goal.contains_symbol(GOAL_MARKER) {
            return Err(PipelineError::ReservedGoalMarker {
                found_in: goal.to_string(),
            });
        }
        if let Some(axiom) = axioms.iter().find(|axiom| {
            axiom.lhs.contains_symbol(GOAL_MARKER) || axiom.rhs.contains_symbol(GOAL_MARKER)
        }) {
            return Err(PipelineError::ReservedGoalMarker {
                found_in: axiom.to_string(),
            });
        }

        info!("Initial term: {goal}");
        info!("Rules:");
        for axiom in &axioms {
            info!("  {axiom}");
        }
        let schedule = goal.distinct_subterms();
        info!(
            "Subterms: {}",
            schedule
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            axioms,
            tracked: goal.clone(),
            original: goal,
            schedule,
            next: 0,
            universe: Universe::new(),
            grounder: Grounder::new(),
            rules: Vec::new(),
            round: 0,
            phase: Phase::Grounding,
            current: None,
            pending: None,
            oracle_name: String::new(),
            history: Vec::new(),
        })
    }

    /// Append extra ground terms to the schedule, after everything already
    /// scheduled, in canonical order. Returns how many were new.
    pub fn extend_schedule(&mut self, extra: impl IntoIterator<Item = Term>) -> usize {
        let mut fresh: Vec<Term> = extra
            .into_iter()
            .filter(|term| term.is_ground() && !self.schedule.contains(term))
            .collect();
        fresh.sort();
        fresh.dedup();
        let added = fresh.len();
        self.schedule.extend(fresh);
        if added > 0 && self.phase == Phase::FinalQuerying {
            self.phase = Phase::Grounding;
        }
        added
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn original(&self) -> &Term {
        &self.original
    }

    pub fn tracked(&self) -> &Term {
        &self.tracked
    }

    pub fn schedule(&self) -> &[Term] {
        &self.schedule
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Rule set the next oracle call will receive.
    pub fn rules(&self) -> &[Axiom] {
        &self.rules
    }

    pub fn grounder(&self) -> &Grounder {
        &self.grounder
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), PipelineError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(PipelineError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn ask<O: CompletionOracle>(
        &mut self,
        oracle: &mut O,
        problem: &Problem,
        timeout_secs: Option<u64>,
        kind: RoundKind,
    ) -> Result<AcceptedResponse, PipelineError> {
        self.oracle_name = oracle.name().to_string();
        let response = oracle
            .complete(problem, timeout_secs)
            .map_err(|source| PipelineError::Oracle {
                oracle: oracle.name().to_string(),
                source: Box::new(source),
            })?;
        Ok(response.accept(kind, &problem.label)?)
    }

    /// Add the next scheduled term to the universe and ground every axiom
    /// over the whole universe.
    pub fn ground(&mut self) -> Result<&Term, PipelineError> {
        self.expect_phase(Phase::Grounding, "ground")?;
        let added = self.schedule[self.next].clone();
        info!("=== Round {}, adding subterm: {added} ===", self.round);

        self.universe.push(added.clone())?;
        let emitted = self.grounder.ground_all(&self.axioms, &self.universe)?;
        let new_instances = emitted.len();
        self.rules.extend(emitted);
        debug!(
            new_instances,
            universe = self.universe.len(),
            "grounding finished"
        );

        self.current = Some(RoundInProgress {
            added,
            new_instances,
            rules_sent: self.rules.len(),
        });
        self.phase = Phase::Querying;
        Ok(&self.schedule[self.next])
    }

    /// Ask the oracle to complete the current rule set without a timeout.
    pub fn query<O: CompletionOracle>(&mut self, oracle: &mut O) -> Result<(), PipelineError> {
        self.expect_phase(Phase::Querying, "query")?;
        let problem = Problem::new(
            format!("round-{}", self.round),
            self.rules.clone(),
            self.tracked.clone(),
        );
        let accepted = self.ask(oracle, &problem, None, RoundKind::Intermediate)?;
        self.pending = Some(accepted);
        self.phase = Phase::Extracting;
        Ok(())
    }

    /// Shrink the tracked term if the oracle found a strictly smaller equal
    /// term, then carry the reported rules into the next round. Returns
    /// whether the tracked term changed.
    pub fn extract(&mut self) -> Result<bool, PipelineError> {
        self.expect_phase(Phase::Extracting, "extract")?;
        let (Some(accepted), Some(current)) = (self.pending.take(), self.current.take()) else {
            return Err(PipelineError::InvalidPhase {
                action: "extract",
                phase: self.phase,
            });
        };

        for rule in &accepted.rules {
            debug!("found rule: {rule}");
        }
        let mut simplified = false;
        if let Some(candidate) = round_candidate(&accepted.rules) {
            if candidate.size() < self.tracked.size() {
                info!("Term simplified to: {candidate}");
                self.tracked = candidate.clone();
                simplified = true;
            }
        }

        let rules_reported = accepted.rules.len();
        let name = format!("r{}", self.round);
        self.rules = accepted
            .rules
            .into_iter()
            .map(|rule| rule.into_axiom(name.clone()))
            .collect();

        self.history.push(RoundRecord {
            round: self.round,
            added: current.added.to_string(),
            universe_size: self.universe.len(),
            new_instances: current.new_instances,
            rules_sent: current.rules_sent,
            rules_reported,
            tracked: self.tracked.to_string(),
            simplified,
        });

        self.round += 1;
        self.next += 1;
        self.phase = if self.next < self.schedule.len() {
            Phase::Grounding
        } else {
            Phase::FinalQuerying
        };
        Ok(simplified)
    }

    /// Ask the oracle once more with the original axioms added back,
    /// bounded by `timeout_secs`.
    pub fn final_query<O: CompletionOracle>(
        &mut self,
        oracle: &mut O,
        timeout_secs: Option<u64>,
    ) -> Result<(), PipelineError> {
        self.expect_phase(Phase::FinalQuerying, "run the final query")?;
        info!("=== Final round with tracked term: {} ===", self.tracked);
        let mut axioms = self.rules.clone();
        axioms.extend(self.axioms.iter().cloned());
        let problem = Problem::new(FINAL_LABEL, axioms, self.tracked.clone());
        let accepted = self.ask(oracle, &problem, timeout_secs, RoundKind::Final)?;
        self.pending = Some(accepted);
        self.phase = Phase::FinalExtracting;
        Ok(())
    }

    /// Pick the smallest term proven equal to the goal and build the report.
    pub fn final_extract(&mut self) -> Result<SimplifyReport, PipelineError> {
        self.expect_phase(Phase::FinalExtracting, "run the final extraction")?;
        let Some(accepted) = self.pending.take() else {
            return Err(PipelineError::InvalidPhase {
                action: "run the final extraction",
                phase: self.phase,
            });
        };

        for rule in &accepted.rules {
            debug!("found rule: {rule}");
        }
        let candidates = final_candidates(&accepted.rules);
        info!(
            "Final goal terms: {}",
            candidates
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        let answer = match smallest(&candidates) {
            Some(term) => term.clone(),
            None => {
                warn!(
                    "final call proved nothing equal to the goal, keeping {}",
                    self.tracked
                );
                self.tracked.clone()
            }
        };
        info!("Simplified term: {answer}");

        self.phase = Phase::Done;
        Ok(SimplifyReport {
            oracle: self.oracle_name.clone(),
            original: self.original.to_string(),
            original_size: self.original.size(),
            simplified: answer.to_string(),
            simplified_size: answer.size(),
            simplified_term: answer,
            tracked_before_final: self.tracked.to_string(),
            rounds: self.history.clone(),
            final_verdict: accepted.verdict.into(),
            candidates: candidates.len(),
        })
    }

    /// Drive every remaining transition.
    pub fn run<O: CompletionOracle>(
        mut self,
        oracle: &mut O,
        final_timeout_secs: Option<u64>,
    ) -> Result<SimplifyReport, PipelineError> {
        while self.phase == Phase::Grounding {
            self.ground()?;
            self.query(oracle)?;
            self.extract()?;
        }
        self.final_query(oracle, final_timeout_secs)?;
        self.final_extract()
    }
}
