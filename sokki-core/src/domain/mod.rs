//! Decision-engine internals.
//!
//! Segmentation and similarity are exposed for hosts that want to reuse
//! the primitives; the pipeline, learning, and undo machinery are only
//! reachable through the engine facade.

pub mod segment;
pub mod similarity;

pub(crate) mod abbreviations;
pub(crate) mod affix;
pub(crate) mod learning;
pub(crate) mod pipeline;
pub(crate) mod undo;
