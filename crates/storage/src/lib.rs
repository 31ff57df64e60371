//! Storage for the historical objective corpus.
//!
//! This crate provides a trait-based store interface with a JSON file
//! reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;

pub use trait_::{ObjectiveStore, StorageError, Result};
pub use json_storage::JsonObjectiveStore;
