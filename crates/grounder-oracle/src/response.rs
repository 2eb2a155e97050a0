use std::fmt;

use grounder_dsl::{parse_term, Axiom, Term};
use tracing::warn;

/// Printed by the prover right before the final rewrite system.
pub const COMPLETION_BANNER: &str = "Here is the final rewrite system:";
/// Terminator when completion ran out of work without proving the conjecture.
pub const EXHAUSTED_TERMINATOR: &str = "RESULT: CounterSatisfiable";
/// Terminator when the prover stopped on a resource limit.
pub const GAVE_UP_TERMINATOR: &str = "RESULT: GaveUp";

/// One oriented rule `lhs -> rhs` reported by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RewriteRule {
    pub lhs: Term,
    pub rhs: Term,
}

impl RewriteRule {
    pub fn new(lhs: Term, rhs: Term) -> Self {
        Self { lhs, rhs }
    }

    pub fn into_axiom(self, name: impl Into<String>) -> Axiom {
        Axiom::new(name, self.lhs, self.rhs)
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

/// Structured verdict of one oracle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleResponse {
    /// Completion exhausted its work.
    Completed(Vec<RewriteRule>),
    /// Completion stopped on a resource limit.
    GaveUp(Vec<RewriteRule>),
    /// Banner or terminator missing; holds the raw output.
    Error(String),
}

impl OracleResponse {
    pub fn rules(&self) -> &[RewriteRule] {
        match self {
            OracleResponse::Completed(rules) | OracleResponse::GaveUp(rules) => rules,
            OracleResponse::Error(_) => &[],
        }
    }
}

/// Parse a `Term -> Term` line. `None` when the line has another shape or a
/// side does not parse.
pub fn parse_rule_line(line: &str) -> Option<RewriteRule> {
    let (lhs, rhs) = line.split_once("->")?;
    if rhs.contains("->") {
        return None;
    }
    let lhs = parse_term(lhs).ok()?;
    let rhs = parse_term(rhs).ok()?;
    Some(RewriteRule::new(lhs, rhs))
}

fn parse_rule_listing(listing: &str) -> Vec<RewriteRule> {
    let mut rules = Vec::new();
    for line in listing.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_rule_line(line) {
            Some(rule) => rules.push(rule),
            None => warn!("skipping unhandled oracle line: {line}"),
        }
    }
    rules
}

/// Turn the combined stdout/stderr of an oracle run into a response.
pub fn parse_response(output: &str) -> OracleResponse {
    let Some((_, after_banner)) = output.split_once(COMPLETION_BANNER) else {
        return OracleResponse::Error(output.to_string());
    };
    if let Some((listing, _)) = after_banner.split_once(EXHAUSTED_TERMINATOR) {
        return OracleResponse::Completed(parse_rule_listing(listing));
    }
    if let Some((listing, _)) = after_banner.split_once(GAVE_UP_TERMINATOR) {
        return OracleResponse::GaveUp(parse_rule_listing(listing));
    }
    OracleResponse::Error(output.to_string())
}
