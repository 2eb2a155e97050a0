#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::convert::Infallible;
use std::io;

use grounder_dsl::{parse_axioms, parse_term, Axiom, Term};
use grounder_oracle::{CompletionOracle, OracleResponse, Problem, RewriteRule};

pub fn t(text: &str) -> Term {
    parse_term(text).unwrap()
}

pub fn rules(source: &str) -> Vec<Axiom> {
    parse_axioms(source).unwrap()
}

pub fn rule(lhs: &str, rhs: &str) -> RewriteRule {
    RewriteRule::new(t(lhs), t(rhs))
}

#[derive(Debug, Clone)]
pub struct Call {
    pub problem: Problem,
    pub timeout_secs: Option<u64>,
}

/// Ground equational closure without congruence: every ground equation and
/// the goal tag merge two classes. Each class is reported as rules rewriting
/// its members to its smallest member, with the goal marker always chosen
/// as representative of its own class. Non-ground axioms are ignored.
#[derive(Debug, Default)]
pub struct ClosureOracle {
    pub calls: Vec<Call>,
}

impl ClosureOracle {
    fn classes(problem: &Problem) -> Vec<Vec<Term>> {
        let mut parent: BTreeMap<Term, Term> = BTreeMap::new();

        fn find(parent: &mut BTreeMap<Term, Term>, term: &Term) -> Term {
            let next = parent.entry(term.clone()).or_insert_with(|| term.clone()).clone();
            if &next == term {
                return next;
            }
            let root = find(parent, &next);
            parent.insert(term.clone(), root.clone());
            root
        }

        let goal = Term::goal_marker();
        let equations = problem
            .axioms
            .iter()
            .filter(|axiom| axiom.is_ground())
            .map(|axiom| (axiom.lhs.clone(), axiom.rhs.clone()))
            .chain(std::iter::once((problem.tracked.clone(), goal)));
        for (lhs, rhs) in equations {
            let a = find(&mut parent, &lhs);
            let b = find(&mut parent, &rhs);
            if a != b {
                parent.insert(a, b);
            }
        }

        let terms: Vec<Term> = parent.keys().cloned().collect();
        let mut classes: BTreeMap<Term, Vec<Term>> = BTreeMap::new();
        for term in terms {
            let root = find(&mut parent, &term);
            classes.entry(root).or_default().push(term);
        }
        classes.into_values().collect()
    }
}

impl CompletionOracle for ClosureOracle {
    type Error = Infallible;

    fn complete(
        &mut self,
        problem: &Problem,
        timeout_secs: Option<u64>,
    ) -> Result<OracleResponse, Infallible> {
        self.calls.push(Call {
            problem: problem.clone(),
            timeout_secs,
        });
        let mut reported = Vec::new();
        for class in Self::classes(problem) {
            let representative = class
                .iter()
                .find(|term| term.is_goal_marker())
                .or_else(|| class.iter().min())
                .cloned();
            let Some(representative) = representative else {
                continue;
            };
            for member in class.into_iter().filter(|m| *m != representative) {
                reported.push(RewriteRule::new(member, representative.clone()));
            }
        }
        Ok(OracleResponse::Completed(reported))
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Replays canned responses in order.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    pub responses: VecDeque<OracleResponse>,
    pub calls: Vec<Call>,
}

impl ScriptedOracle {
    pub fn new(responses: impl IntoIterator<Item = OracleResponse>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            calls: Vec::new(),
        }
    }
}

impl CompletionOracle for ScriptedOracle {
    type Error = io::Error;

    fn complete(
        &mut self,
        problem: &Problem,
        timeout_secs: Option<u64>,
    ) -> Result<OracleResponse, io::Error> {
        self.calls.push(Call {
            problem: problem.clone(),
            timeout_secs,
        });
        self.responses
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
