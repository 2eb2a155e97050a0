//! Term syntax and rule files for the grounder simplifier.
//!
//! Terms use a prefix-arity notation, `mul(inv(X),one)`. Zero-arity
//! all-uppercase symbols are variables and `num<N>` / `numneg<N>` /
//! `negnum<N>` symbols are numerals. Rule files list one
//! `cnf(NAME, axiom, LHS=RHS).` declaration per line.

pub mod ast;
pub mod errors;
pub mod parser;

pub use ast::{Axiom, Term, TermKind, GOAL_MARKER};
pub use errors::{ConfigError, DslError, ParseError};
pub use parser::{parse_axiom_line, parse_axioms, parse_term};
