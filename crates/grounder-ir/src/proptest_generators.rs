//! Proptest strategies for generating well-formed terms and axioms.

use grounder_dsl::{Axiom, Term};
use proptest::prelude::*;

const CONSTANTS: [&str; 5] = ["a", "b", "c", "one", "num0"];
const VARIABLES: [&str; 3] = ["X", "Y", "Z"];
const FUNCTORS: [(&str, usize); 4] = [("inv", 1), ("f", 1), ("mul", 2), ("g", 3)];

fn leaf(name: &str) -> Term {
    Term::leaf(name).expect("generator symbols are never ambiguous numerals")
}

fn arb_terms(leaves: BoxedStrategy<Term>, depth: u32) -> impl Strategy<Value = Term> {
    leaves.prop_recursive(depth, 24, 3, |inner| {
        (
            proptest::sample::select(FUNCTORS.to_vec()),
            proptest::collection::vec(inner, 3),
        )
            .prop_map(|((name, arity), mut args)| {
                args.truncate(arity);
                Term::new(name, args).expect("non-nullary terms always build")
            })
    })
}

/// Strategy for variable-free terms up to `depth` levels of nesting.
pub fn arb_ground_term(depth: u32) -> impl Strategy<Value = Term> {
    let leaves = proptest::sample::select(CONSTANTS.to_vec())
        .prop_map(leaf)
        .boxed();
    arb_terms(leaves, depth)
}

/// Strategy for terms that may contain the variables `X`, `Y`, `Z`.
pub fn arb_term(depth: u32) -> impl Strategy<Value = Term> {
    let leaves = prop_oneof![
        proptest::sample::select(CONSTANTS.to_vec()).prop_map(leaf),
        proptest::sample::select(VARIABLES.to_vec()).prop_map(leaf),
    ]
    .boxed();
    arb_terms(leaves, depth)
}

/// Strategy for an axiom whose sides may share variables.
pub fn arb_axiom() -> impl Strategy<Value = Axiom> {
    (arb_term(3), arb_term(3)).prop_map(|(lhs, rhs)| Axiom::new("generated", lhs, rhs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grounding::{instantiations, Universe};
    use crate::substitution::{apply, Substitution};
    use grounder_dsl::parse_term;

    proptest! {
        #[test]
        fn render_then_parse_round_trips(term in arb_term(4)) {
            let rendered = term.to_string();
            let reparsed = parse_term(&rendered).unwrap();
            prop_assert_eq!(&reparsed, &term);
            prop_assert_eq!(reparsed.to_string(), rendered);
        }

        #[test]
        fn spaced_rendering_parses_to_the_same_term(term in arb_term(3)) {
            let spaced = term.to_string().replace(',', " , ").replace('(', " ( ");
            prop_assert_eq!(parse_term(&spaced).unwrap(), term);
        }

        #[test]
        fn generated_ground_terms_are_ground(term in arb_ground_term(4)) {
            prop_assert!(term.is_ground());
            prop_assert!(term.vars().is_empty());
            prop_assert_eq!(
                term.size(),
                1 + term.args().iter().map(Term::size).sum::<usize>()
            );
        }

        #[test]
        fn identity_substitution_preserves_term(term in arb_term(4)) {
            let result = apply(&term, &Substitution::new());
            prop_assert_eq!(result.term(), &term);
            prop_assert_eq!(result.term().size(), term.size());
        }

        #[test]
        fn full_instantiation_always_grounds(
            axiom in arb_axiom(),
            domain in proptest::collection::vec(arb_ground_term(2), 1..3),
        ) {
            let mut universe = Universe::new();
            for term in domain {
                universe.push(term).unwrap();
            }
            let vars = axiom.vars();
            let expected = universe.len().pow(vars.len() as u32);
            let mut count = 0;
            for subst in instantiations(&vars, universe.terms()) {
                prop_assert!(apply(&axiom.lhs, &subst).is_ground());
                prop_assert!(apply(&axiom.rhs, &subst).is_ground());
                count += 1;
            }
            prop_assert_eq!(count, expected);
        }
    }
}
