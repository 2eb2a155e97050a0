//! Grounding of axioms over a growing universe of ground terms.
//!
//! Each round the whole universe is re-enumerated for every axiom; the
//! [`Grounder`] keeps the seen-instance set that decides which grounded
//! pairs are worth forwarding.

use std::collections::HashSet;

use grounder_dsl::{Axiom, Term};
use thiserror::Error;
use tracing::debug;

use crate::substitution::{apply, Substitution, SubstitutionError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroundingError {
    #[error("universe only holds ground terms, got `{term}`")]
    NotGround { term: String },
    #[error(transparent)]
    Substitution(#[from] SubstitutionError),
}

/// Mixed-radix index counter, one slot per radix.
///
/// The last slot turns fastest, so slot 0 is the slowest-varying.
#[derive(Debug, Clone)]
pub(crate) struct Odometer {
    radixes: Vec<usize>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Odometer {
    pub(crate) fn new(radixes: Vec<usize>) -> Self {
        let exhausted = radixes.iter().any(|&r| r == 0);
        let indices = vec![0; radixes.len()];
        Self {
            radixes,
            indices,
            exhausted,
        }
    }

    fn remaining(&self) -> Option<usize> {
        if self.exhausted {
            return Some(0);
        }
        // Mixed-radix value of the digits still to come, counting the current one.
        let mut remaining: usize = 0;
        for (digit, radix) in self.indices.iter().zip(&self.radixes) {
            remaining = remaining.checked_mul(*radix)?.checked_add(radix - 1 - digit)?;
        }
        remaining.checked_add(1)
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();

        let mut slot = self.indices.len();
        loop {
            if slot == 0 {
                self.exhausted = true;
                break;
            }
            slot -= 1;
            self.indices[slot] += 1;
            if self.indices[slot] < self.radixes[slot] {
                break;
            }
            self.indices[slot] = 0;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

/// Every total mapping of `variables` into `domain`.
///
/// Finite and restartable: clone before consuming, or call
/// [`instantiations`] again, to replay the sequence.
#[derive(Debug, Clone)]
pub struct Instantiations<'a> {
    variables: &'a [String],
    domain: &'a [Term],
    odometer: Odometer,
}

/// Cross product `domain^|variables|` as substitutions, first variable
/// slowest-varying, domain in its given order.
pub fn instantiations<'a>(variables: &'a [String], domain: &'a [Term]) -> Instantiations<'a> {
    Instantiations {
        variables,
        domain,
        odometer: Odometer::new(vec![domain.len(); variables.len()]),
    }
}

impl Iterator for Instantiations<'_> {
    type Item = Substitution;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.odometer.next()?;
        Some(
            self.variables
                .iter()
                .zip(indices)
                .map(|(var, idx)| (var.clone(), self.domain[idx].clone()))
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.odometer.size_hint()
    }
}

/// Append-only ordered sequence of ground terms usable as substitution targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universe {
    terms: Vec<Term>,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ground term. Existing elements are never reordered.
    pub fn push(&mut self, term: Term) -> Result<(), GroundingError> {
        if !term.is_ground() {
            return Err(GroundingError::NotGround {
                term: term.to_string(),
            });
        }
        self.terms.push(term);
        Ok(())
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Grounds axioms and filters instances through the seen-instance set.
#[derive(Debug, Clone, Default)]
pub struct Grounder {
    seen: HashSet<Term>,
}

impl Grounder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_seen(&self, term: &Term) -> bool {
        self.seen.contains(term)
    }

    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    /// Emission policy: a pair is kept, and both sides marked seen, iff at
    /// least one side was unseen before the check.
    pub fn offer(&mut self, lhs: &Term, rhs: &Term) -> bool {
        if self.seen.contains(lhs) && self.seen.contains(rhs) {
            return false;
        }
        self.seen.insert(lhs.clone());
        self.seen.insert(rhs.clone());
        true
    }

    /// Ground one axiom over the entire universe.
    pub fn ground_axiom(
        &mut self,
        axiom: &Axiom,
        universe: &Universe,
    ) -> Result<Vec<Axiom>, GroundingError> {
        let vars = axiom.vars();
        let mut emitted = Vec::new();
        for subst in instantiations(&vars, universe.terms()) {
            let lhs = apply(&axiom.lhs, &subst).into_ground()?;
            let rhs = apply(&axiom.rhs, &subst).into_ground()?;
            if self.offer(&lhs, &rhs) {
                debug!("adding grounded rule: {lhs} = {rhs}");
                emitted.push(Axiom::new(axiom.name.clone(), lhs, rhs));
            }
        }
        Ok(emitted)
    }

    /// Ground every axiom in order, returning the instances emitted this call.
    pub fn ground_all(
        &mut self,
        axioms: &[Axiom],
        universe: &Universe,
    ) -> Result<Vec<Axiom>, GroundingError> {
        let mut emitted = Vec::new();
        for axiom in axioms {
            emitted.extend(self.ground_axiom(axiom, universe)?);
        }
        Ok(emitted)
    }
}
