pub mod dataset;
pub mod docs;
