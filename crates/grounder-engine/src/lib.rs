#![doc = include_str!("../README.md")]

//! Grounder refinement engine.
//!
//! [`refinement::RefinementContext`] holds all cross-round state and exposes
//! one method per state transition; [`pipeline`] wires it to an oracle and
//! produces a [`result::SimplifyReport`].

pub mod extraction;
pub mod pipeline;
pub mod refinement;
pub mod result;

pub use pipeline::{simplify, simplify_source, PipelineError, PipelineOptions};
pub use refinement::{Phase, RefinementContext};
pub use result::{FinalVerdict, RoundRecord, SimplifyReport};
