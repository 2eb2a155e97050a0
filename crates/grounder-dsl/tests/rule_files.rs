//! Rule-file loading end to end: the group-theory file shipped with the
//! simplifier's documentation, plus the failure modes a user hits first.

use grounder_dsl::{parse_axioms, parse_term, ConfigError, DslError, TermKind};

const GROUP_RULES: &str = "\
% Group theory, left axioms only.
cnf(left_identity, axiom, mul(one, X) = X).
cnf(left_inverse, axiom, mul(inv(X), X) = one).
cnf(associativity, axiom, mul(mul(X, Y), Z) = mul(X, mul(Y, Z))).
";

#[test]
fn group_rules_load_in_file_order() {
    let axioms = parse_axioms(GROUP_RULES).expect("group rules should parse");
    assert_eq!(axioms.len(), 3);
    assert_eq!(axioms[0].to_string(), "left_identity: mul(one,X) = X");
    assert_eq!(axioms[1].to_string(), "left_inverse: mul(inv(X),X) = one");
    assert_eq!(
        axioms[2].to_string(),
        "associativity: mul(mul(X,Y),Z) = mul(X,mul(Y,Z))"
    );
    assert!(axioms.iter().all(|a| !a.is_ground()));
}

#[test]
fn windows_line_endings_are_tolerated() {
    let source = "cnf(a, axiom, f(X) = X).\r\n\r\ncnf(b, axiom, g(X) = X).\r\n";
    let axioms = parse_axioms(source).unwrap();
    assert_eq!(axioms.len(), 2);
}

#[test]
fn numerals_survive_the_rule_file() {
    let axioms = parse_axioms("cnf(zero, axiom, plus(num0, X) = X).").unwrap();
    let zero = &axioms[0].lhs.args()[0];
    assert_eq!(zero.kind(), TermKind::Numeral(0));
}

#[test]
fn conjecture_in_rule_file_is_fatal() {
    let source = format!("{GROUP_RULES}cnf(goal, negated_conjecture, a = b).\n");
    match parse_axioms(&source) {
        Err(DslError::Config(ConfigError::UnsupportedRole { line, role })) => {
            assert_eq!(line, 5);
            assert_eq!(role, "negated_conjecture");
        }
        other => panic!("expected UnsupportedRole, got {other:?}"),
    }
}

#[test]
fn goal_terms_round_trip_through_rendering() {
    for text in [
        "inv(inv(a))",
        "mul(a,b)",
        "mul(inv(inv(inv(a))),mul(inv(inv(a)),one))",
        "f(numneg3,negnum4,num5)",
    ] {
        let term = parse_term(text).unwrap();
        assert_eq!(term.to_string(), text);
        assert_eq!(parse_term(&term.to_string()).unwrap(), term);
    }
}
