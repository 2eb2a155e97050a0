use std::cmp::Ordering;
use std::fmt;

use crate::errors::ConfigError;

/// Source span for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Nullary marker that tags the term under simplification in oracle problems.
pub const GOAL_MARKER: &str = "goal";

/// Classification of a term node, fixed when the node is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// Zero-arity, all-uppercase identifier.
    Variable,
    /// Zero-arity identifier using a reserved numeral prefix.
    Numeral(i64),
    /// Function application; zero-arity applications are constants.
    Application,
}

/// Prefix patterns recognised by the numeral classifier, longest first.
const NUMERAL_PREFIXES: [(&str, bool); 3] = [("numneg", true), ("negnum", true), ("num", false)];

/// Continuations that mark a second pattern stacked after the first.
const STACKED_PREFIXES: [&str; 2] = ["num", "neg"];

/// Classify a zero-arity symbol as a numeral.
///
/// The longest matching prefix decides the reading. A symbol whose suffix
/// after that prefix starts with another numeral prefix or a bare `neg`
/// (`numnum3`, `numnegnum5`, `negnumneg2`) stacks patterns and is rejected.
pub fn classify_numeral(symbol: &str) -> Result<Option<i64>, ConfigError> {
    let lower = symbol.to_ascii_lowercase();
    let Some(&(prefix, negated)) = NUMERAL_PREFIXES
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
    else {
        return Ok(None);
    };

    let suffix = &lower[prefix.len()..];
    if STACKED_PREFIXES
        .iter()
        .any(|stacked| suffix.starts_with(stacked))
    {
        return Err(ConfigError::AmbiguousNumeral {
            symbol: symbol.to_string(),
        });
    }

    Ok(suffix
        .parse::<i64>()
        .ok()
        .map(|value| if negated { -value } else { value }))
}

fn is_variable_symbol(symbol: &str) -> bool {
    symbol.chars().any(char::is_uppercase) && !symbol.chars().any(char::is_lowercase)
}

/// A first-order term: a functor applied to an ordered list of children.
///
/// Equality and hashing are structural. Ordering is canonical: by
/// [`Term::size`] first, then by rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    functor: String,
    args: Vec<Term>,
    kind: TermKind,
    size: usize,
}

impl Term {
    /// Build a term, classifying zero-arity symbols.
    pub fn new(functor: impl Into<String>, args: Vec<Term>) -> Result<Self, ConfigError> {
        let functor = functor.into();
        let kind = if args.is_empty() {
            match classify_numeral(&functor)? {
                Some(value) => TermKind::Numeral(value),
                None if is_variable_symbol(&functor) => TermKind::Variable,
                None => TermKind::Application,
            }
        } else {
            TermKind::Application
        };
        let size = 1 + args.iter().map(Term::size).sum::<usize>();
        Ok(Self {
            functor,
            args,
            kind,
            size,
        })
    }

    /// Build a zero-arity term.
    pub fn leaf(functor: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(functor, Vec::new())
    }

    /// The goal marker constant.
    pub fn goal_marker() -> Self {
        Self {
            functor: GOAL_MARKER.to_string(),
            args: Vec::new(),
            kind: TermKind::Application,
            size: 1,
        }
    }

    /// Rebuild a node with new children, keeping the functor and kind.
    pub fn with_args(&self, args: Vec<Term>) -> Self {
        let size = 1 + args.iter().map(Term::size).sum::<usize>();
        let kind = if args.is_empty() {
            self.kind
        } else {
            TermKind::Application
        };
        Self {
            functor: self.functor.clone(),
            args,
            kind,
            size,
        }
    }

    pub fn functor(&self) -> &str {
        &self.functor
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn kind(&self) -> TermKind {
        self.kind
    }

    pub fn is_var(&self) -> bool {
        self.kind == TermKind::Variable
    }

    /// Integer value when this node is a numeral.
    pub fn numeral_value(&self) -> Option<i64> {
        match self.kind {
            TermKind::Numeral(value) => Some(value),
            _ => None,
        }
    }

    /// Node count: a leaf is 1, otherwise 1 plus the children's sizes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_ground(&self) -> bool {
        !self.is_var() && self.args.iter().all(Term::is_ground)
    }

    pub fn is_goal_marker(&self) -> bool {
        self.args.is_empty() && self.functor == GOAL_MARKER
    }

    /// Sorted, deduplicated variable names occurring in this term.
    pub fn vars(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out.sort();
        out.dedup();
        out
    }

    fn collect_vars(&self, out: &mut Vec<String>) {
        if self.is_var() {
            out.push(self.functor.clone());
        }
        for arg in &self.args {
            arg.collect_vars(out);
        }
    }

    /// All subterms in post-order, this term last. Duplicates are kept.
    pub fn subterms(&self) -> Vec<&Term> {
        let mut out = Vec::new();
        self.collect_subterms(&mut out);
        out
    }

    fn collect_subterms<'a>(&'a self, out: &mut Vec<&'a Term>) {
        for arg in &self.args {
            arg.collect_subterms(out);
        }
        out.push(self);
    }

    /// Distinct subterms (including this term) in canonical order.
    pub fn distinct_subterms(&self) -> Vec<Term> {
        let mut out: Vec<Term> = self.subterms().into_iter().cloned().collect();
        out.sort();
        out.dedup();
        out
    }

    /// Whether `symbol` occurs as a functor anywhere in this term.
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.functor == symbol || self.args.iter().any(|arg| arg.contains_symbol(symbol))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.functor)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "({first}")?;
            for arg in rest {
                write!(f, ",{arg}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size
            .cmp(&other.size)
            .then_with(|| self.to_string().cmp(&other.to_string()))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A named, unconditional equation `lhs = rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Axiom {
    pub name: String,
    pub lhs: Term,
    pub rhs: Term,
}

impl Axiom {
    pub fn new(name: impl Into<String>, lhs: Term, rhs: Term) -> Self {
        Self {
            name: name.into(),
            lhs,
            rhs,
        }
    }

    /// `vars(lhs) ∪ vars(rhs)`, sorted.
    pub fn vars(&self) -> Vec<String> {
        let mut vars = self.lhs.vars();
        vars.extend(self.rhs.vars());
        vars.sort();
        vars.dedup();
        vars
    }

    pub fn is_ground(&self) -> bool {
        self.lhs.is_ground() && self.rhs.is_ground()
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} = {}", self.name, self.lhs, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> Term {
        Term::leaf(name).unwrap()
    }

    fn app(name: &str, args: Vec<Term>) -> Term {
        Term::new(name, args).unwrap()
    }

    #[test]
    fn classify_plain_and_negated_numerals() {
        assert_eq!(classify_numeral("num5").unwrap(), Some(5));
        assert_eq!(classify_numeral("NUM12").unwrap(), Some(12));
        assert_eq!(classify_numeral("numneg3").unwrap(), Some(-3));
        assert_eq!(classify_numeral("negnum7").unwrap(), Some(-7));
        assert_eq!(classify_numeral("NegNum0").unwrap(), Some(0));
    }

    #[test]
    fn non_numeric_suffix_is_not_a_numeral() {
        assert_eq!(classify_numeral("number").unwrap(), None);
        assert_eq!(classify_numeral("numneg").unwrap(), None);
        assert_eq!(classify_numeral("negative").unwrap(), None);
        assert_eq!(classify_numeral("numnegative").unwrap(), None);
        assert_eq!(classify_numeral("mul").unwrap(), None);
    }

    #[test]
    fn stacked_numeral_prefixes_are_ambiguous() {
        for symbol in [
            "numnum3",
            "numnegnum1",
            "numnegnum5",
            "negnumneg2",
            "NegNumNeg7",
            "numnegneg4",
            "numnegnum",
        ] {
            assert!(
                matches!(
                    classify_numeral(symbol),
                    Err(ConfigError::AmbiguousNumeral { .. })
                ),
                "{symbol} should be ambiguous"
            );
        }
    }

    #[test]
    fn kinds_are_assigned_on_construction() {
        assert_eq!(leaf("X").kind(), TermKind::Variable);
        assert_eq!(leaf("X1").kind(), TermKind::Variable);
        assert_eq!(leaf("a").kind(), TermKind::Application);
        assert_eq!(leaf("Xy").kind(), TermKind::Application);
        assert_eq!(leaf("num4").kind(), TermKind::Numeral(4));
        assert_eq!(leaf("NUM4").numeral_value(), Some(4));
        assert_eq!(app("F", vec![leaf("a")]).kind(), TermKind::Application);
    }

    #[test]
    fn size_counts_nodes() {
        let t = app("mul", vec![app("inv", vec![leaf("a")]), leaf("b")]);
        assert_eq!(t.size(), 4);
        assert_eq!(leaf("a").size(), 1);
    }

    #[test]
    fn render_is_prefix_notation() {
        let t = app("mul", vec![app("inv", vec![leaf("a")]), leaf("X")]);
        assert_eq!(t.to_string(), "mul(inv(a),X)");
    }

    #[test]
    fn canonical_order_is_size_then_rendering() {
        let a = leaf("a");
        let b = leaf("b");
        let inv_a = app("inv", vec![leaf("a")]);
        let mut terms = vec![inv_a.clone(), b.clone(), a.clone()];
        terms.sort();
        assert_eq!(terms, vec![a, b, inv_a]);
    }

    #[test]
    fn distinct_subterms_are_sorted_and_deduplicated() {
        let t = app("mul", vec![leaf("a"), app("mul", vec![leaf("a"), leaf("b")])]);
        let rendered: Vec<String> = t.distinct_subterms().iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["a", "b", "mul(a,b)", "mul(a,mul(a,b))"]);
    }

    #[test]
    fn vars_are_sorted_and_unique() {
        let t = app("f", vec![leaf("Y"), app("g", vec![leaf("X"), leaf("Y")])]);
        assert_eq!(t.vars(), vec!["X".to_string(), "Y".to_string()]);
        assert!(!t.is_ground());
    }

    #[test]
    fn axiom_vars_union_both_sides() {
        let axiom = Axiom::new(
            "assoc",
            app("f", vec![leaf("X"), leaf("Y")]),
            app("g", vec![leaf("Z")]),
        );
        assert_eq!(axiom.vars(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn goal_marker_detection() {
        let goal = Term::goal_marker();
        assert!(goal.is_goal_marker());
        assert!(!app("goal", vec![leaf("a")]).is_goal_marker());
        assert!(app("f", vec![goal]).contains_symbol(GOAL_MARKER));
    }
}
