//! Static field catalogs.
//!
//! # Responsibility
//! - Map each field type to its allowed rendering formats.
//! - Provide the ready-made field templates offered by the palette.
//!
//! # Invariants
//! - Catalog tables are static and ordered; lookups have no side effects.
//! - Every palette template uses a format its type allows.

pub mod formats;
pub mod palette;
