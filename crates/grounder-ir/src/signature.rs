//! Function signature observed in a problem, and enumeration of every ground
//! term of a given size over it.

use std::collections::BTreeMap;

use grounder_dsl::{Axiom, Term};

use crate::grounding::Odometer;

/// Arity to functor symbols, each with a prototype node used to rebuild it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    symbols: BTreeMap<usize, BTreeMap<String, Term>>,
}

impl Signature {
    /// Collect symbols from every axiom side and the goal term. Variables are
    /// skipped; numerals count as constants.
    pub fn collect(axioms: &[Axiom], goal: &Term) -> Self {
        let mut signature = Self::default();
        for axiom in axioms {
            signature.observe(&axiom.lhs);
            signature.observe(&axiom.rhs);
        }
        signature.observe(goal);
        signature
    }

    /// Register every non-variable node of `term`.
    pub fn observe(&mut self, term: &Term) {
        for node in term.subterms() {
            if node.is_var() {
                continue;
            }
            self.symbols
                .entry(node.arity())
                .or_default()
                .entry(node.functor().to_string())
                .or_insert_with(|| node.clone());
        }
    }

    /// Symbols registered at `arity`, sorted.
    pub fn symbols(&self, arity: usize) -> impl Iterator<Item = &str> {
        self.symbols
            .get(&arity)
            .into_iter()
            .flat_map(|by_name| by_name.keys().map(String::as_str))
    }

    pub fn arities(&self) -> impl Iterator<Item = usize> + '_ {
        self.symbols.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Every ground term with exactly `size` nodes.
    ///
    /// Arguments are ordered, so child sizes range over compositions of
    /// `size - 1`, not partitions.
    pub fn enumerate_subterms(&self, size: usize) -> Box<dyn Iterator<Item = Term> + '_> {
        if size == 0 {
            return Box::new(std::iter::empty());
        }
        if size == 1 {
            return Box::new(
                self.symbols
                    .get(&0)
                    .into_iter()
                    .flat_map(|by_name| by_name.values().cloned()),
            );
        }

        let budget = size - 1;
        Box::new(
            self.symbols
                .range(1..=budget)
                .flat_map(move |(&arity, by_name)| {
                    compositions(budget, arity)
                        .into_iter()
                        .flat_map(move |parts| self.children_for(parts))
                        .flat_map(move |children| {
                            by_name
                                .values()
                                .map(move |proto| proto.with_args(children.clone()))
                        })
                }),
        )
    }

    /// Every ground term with between 1 and `max_size` nodes, smallest first.
    pub fn enumerate_up_to(&self, max_size: usize) -> impl Iterator<Item = Term> + '_ {
        (1..=max_size).flat_map(move |size| self.enumerate_subterms(size))
    }

    /// Cross product of the enumerations of each part size.
    fn children_for(&self, parts: Vec<usize>) -> impl Iterator<Item = Vec<Term>> {
        let choices: Vec<Vec<Term>> = parts
            .iter()
            .map(|&part| self.enumerate_subterms(part).collect())
            .collect();
        let radixes = choices.iter().map(Vec::len).collect();
        Odometer::new(radixes).map(move |indices| {
            indices
                .iter()
                .zip(&choices)
                .map(|(&idx, options)| options[idx].clone())
                .collect()
        })
    }
}

/// Ordered tuples of `parts` positive integers summing to `total`.
pub fn compositions(total: usize, parts: usize) -> Vec<Vec<usize>> {
    if parts == 0 {
        return if total == 0 { vec![Vec::new()] } else { Vec::new() };
    }
    if total < parts {
        return Vec::new();
    }
    let mut out = Vec::new();
    for first in 1..=(total - (parts - 1)) {
        for mut rest in compositions(total - first, parts - 1) {
            rest.insert(0, first);
            out.push(rest);
        }
    }
    out
}
