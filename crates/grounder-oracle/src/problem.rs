use std::collections::HashSet;

use grounder_dsl::{Axiom, Term};

/// A finite equational problem for one oracle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Identifies the call in logs and debug dumps, e.g. `round-3` or `final`.
    pub label: String,
    pub axioms: Vec<Axiom>,
    /// The term tagged by `cnf(goal,axiom,TERM=goal).`
    pub tracked: Term,
}

impl Problem {
    pub fn new(label: impl Into<String>, axioms: Vec<Axiom>, tracked: Term) -> Self {
        Self {
            label: label.into(),
            axioms,
            tracked,
        }
    }

    /// Two numeral symbols that occur nowhere in the problem, normally
    /// `num0` and `num1`.
    pub fn fresh_numeral_pair(&self) -> (String, String) {
        let mut used = HashSet::new();
        let sides = self
            .axioms
            .iter()
            .flat_map(|axiom| [&axiom.lhs, &axiom.rhs])
            .chain(std::iter::once(&self.tracked));
        for side in sides {
            for node in side.subterms() {
                if let Some(value) = node.numeral_value() {
                    used.insert(value);
                }
            }
        }
        let mut fresh = (0i64..).filter(|n| !used.contains(n));
        let first = fresh.next().unwrap_or(0);
        let second = fresh.next().unwrap_or(1);
        (format!("num{first}"), format!("num{second}"))
    }

    /// Render as newline-joined TPTP `cnf` lines.
    pub fn to_tptp(&self) -> String {
        crate::backends::tptp_printer::problem_to_tptp(self)
    }
}
