#![forbid(unsafe_code)]

pub mod repo;
pub mod store;

pub use store::{content_hash_hex, AssessmentStore, StorageError};
