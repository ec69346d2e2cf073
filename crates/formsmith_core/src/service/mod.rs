//! Core use-case services.
//!
//! # Responsibility
//! - Combine store, synthesis, generation and storage into calls the FFI
//!   layer can expose one to one.

pub mod artifacts;
pub mod autosave;
