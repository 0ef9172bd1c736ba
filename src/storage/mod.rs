//! Storage Module
//!
//! The directory-backed storage engine: one keyfile per key inside a single
//! store directory.

mod keyfile;
mod store;

pub use store::TupleStore;
