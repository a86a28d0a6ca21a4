//! Allocation engine: reference lookup, weights, pairing and record building

pub mod allocation;
pub mod classifier;
pub mod pipeline;
pub mod reference;
pub mod weight;

pub use allocation::AllocationBuilder;
pub use classifier::{match_partner, Pairing};
pub use pipeline::{AllocationReport, Pipeline, RoleCounts};
pub use reference::ReferenceLookup;
pub use weight::{resolve_weight, Normalizer};
