//! Grounding machinery for the grounder simplifier.
//!
//! [`substitution`] applies variable bindings, [`grounding`] enumerates
//! bindings over a ground universe and filters the resulting instances, and
//! [`signature`] enumerates every ground term of a given size over the
//! observed function symbols.

pub mod grounding;
pub mod signature;
pub mod substitution;

#[cfg(any(test, feature = "proptest-generators"))]
pub mod proptest_generators;

pub use grounding::{instantiations, Grounder, GroundingError, Instantiations, Universe};
pub use signature::Signature;
pub use substitution::{apply, Substituted, Substitution, SubstitutionError};
