use grounder_dsl::{Axiom, GOAL_MARKER};

use crate::problem::Problem;

/// Print one axiom as `cnf(NAME,axiom,LHS=RHS).`
pub fn axiom_to_tptp(axiom: &Axiom) -> String {
    format!("cnf({},axiom,{}={}).", axiom.name, axiom.lhs, axiom.rhs)
}

/// Print every line of a problem: the rules, the goal tag, then the false
/// conjecture.
pub fn problem_lines(problem: &Problem) -> Vec<String> {
    let mut lines: Vec<String> = problem.axioms.iter().map(axiom_to_tptp).collect();
    lines.push(format!(
        "cnf({GOAL_MARKER},axiom,{}={GOAL_MARKER}).",
        problem.tracked
    ));
    let (left, right) = problem.fresh_numeral_pair();
    lines.push(format!("cnf(false,conjecture,{left}={right})."));
    lines
}

pub fn problem_to_tptp(problem: &Problem) -> String {
    problem_lines(problem).join("\n")
}
