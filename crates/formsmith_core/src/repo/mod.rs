//! Repository layer over local storage.
//!
//! # Responsibility
//! - Keep SQL and JSON encoding out of the store and services.
//!
//! # Invariants
//! - Reads reject invalid stored state with a typed error.

pub mod form_repo;
