//! Report model assembly: normalization, association resolution, ordering
//! and cross-reference resolution

pub mod associations;
pub mod model;
pub mod normalize;
pub mod xref;
