//! Domain logic for the dataset catalog.
//!
//! Pure code only: the record validator, the recognized vocabularies and the
//! helpers the HTTP layer needs before it touches storage.

pub mod dataset;
pub mod encoding;
pub mod error;
pub mod types;
pub mod vocabulary;
