//! Form-builder domain model.
//!
//! # Responsibility
//! - Define the canonical field and form data structures.
//! - Keep the wire shape (camelCase JSON, `type` discriminator) in one place.
//!
//! # Invariants
//! - Every placed field is identified by a stable `FieldId` and its derived key.
//! - Model types carry no derivation behavior; schema and code generation
//!   live in their own modules.

pub mod field;
pub mod form;
