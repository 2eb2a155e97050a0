use grounder_dsl::Term;
use indexmap::IndexMap;
use thiserror::Error;

/// Variable name to replacement term, in binding order.
pub type Substitution = IndexMap<String, Term>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    #[error("substitution left `{term}` with free variables {free:?}")]
    Unbound { term: String, free: Vec<String> },
}

/// Outcome of applying a substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substituted {
    /// Every variable was bound to a ground term.
    Ground(Term),
    /// Some variables remain; `free` lists them sorted.
    Partial { term: Term, free: Vec<String> },
}

impl Substituted {
    pub fn term(&self) -> &Term {
        match self {
            Substituted::Ground(term) | Substituted::Partial { term, .. } => term,
        }
    }

    pub fn into_term(self) -> Term {
        match self {
            Substituted::Ground(term) | Substituted::Partial { term, .. } => term,
        }
    }

    pub fn is_ground(&self) -> bool {
        matches!(self, Substituted::Ground(_))
    }

    /// The ground result, or an error naming the variables left free.
    pub fn into_ground(self) -> Result<Term, SubstitutionError> {
        match self {
            Substituted::Ground(term) => Ok(term),
            Substituted::Partial { term, free } => Err(SubstitutionError::Unbound {
                term: term.to_string(),
                free,
            }),
        }
    }
}

fn replace(term: &Term, subst: &Substitution) -> Term {
    if term.is_var() {
        if let Some(bound) = subst.get(term.functor()) {
            return bound.clone();
        }
        return term.clone();
    }
    if term.arity() == 0 {
        return term.clone();
    }
    term.with_args(term.args().iter().map(|arg| replace(arg, subst)).collect())
}

/// Replace every bound variable of `term`. The input is left untouched.
pub fn apply(term: &Term, subst: &Substitution) -> Substituted {
    let result = replace(term, subst);
    let free = result.vars();
    if free.is_empty() {
        Substituted::Ground(result)
    } else {
        Substituted::Partial { term: result, free }
    }
}
