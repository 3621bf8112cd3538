pub mod dataset;
pub mod docs;
pub mod health;
