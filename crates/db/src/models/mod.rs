//! Row structs and the outward-facing projections built from them.

pub mod dataset;
