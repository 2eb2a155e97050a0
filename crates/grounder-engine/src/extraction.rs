//! Reading simplification results out of oracle rewrite systems.

use grounder_dsl::{Term, GOAL_MARKER};
use grounder_oracle::RewriteRule;

/// Smallest left side among the rules rewriting straight to the goal marker.
///
/// Sides that mention the marker themselves are ignored. Ties on size go to
/// the first term in `(size, rendering)` order.
pub fn round_candidate(rules: &[RewriteRule]) -> Option<&Term> {
    rules
        .iter()
        .filter(|rule| rule.rhs.is_goal_marker())
        .map(|rule| &rule.lhs)
        .filter(|lhs| !lhs.contains_symbol(GOAL_MARKER))
        .min()
}

/// Terms the final rewrite system proves equal to the goal marker.
///
/// A rule qualifies when exactly one side is the marker and the other side's
/// rendering does not mention it.
pub fn final_candidates(rules: &[RewriteRule]) -> Vec<&Term> {
    rules
        .iter()
        .filter_map(|rule| {
            match (rule.lhs.is_goal_marker(), rule.rhs.is_goal_marker()) {
                (true, false) => Some(&rule.rhs),
                (false, true) => Some(&rule.lhs),
                _ => None,
            }
        })
        .filter(|side| !side.to_string().contains(GOAL_MARKER))
        .collect()
}

/// Minimum of `candidates` by `(size, rendering)`.
pub fn smallest<'a>(candidates: &[&'a Term]) -> Option<&'a Term> {
    candidates.iter().copied().min()
}
