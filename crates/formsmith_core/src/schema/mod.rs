//! Validation-schema synthesis.
//!
//! # Responsibility
//! - Turn an ordered field list into a live validator, default values and
//!   the equivalent validation-library declaration.
//!
//! # Invariants
//! - The executable validator and the declaration text are both derived from
//!   the same per-field `SchemaNode`.
//! - Synthesis is pure and never fails for a structurally valid field list.
//!
//! # See also
//! - codegen/mod.rs (consumes `source_text` and `default_values`)

pub mod date;
pub mod defaults;
pub mod node;
pub mod synth;
pub mod validate;

pub use defaults::{DefaultValue, DefaultValues};
pub use node::{DateBound, Pattern, SchemaNode, TextCheck};
pub use synth::{
    render_declaration, synthesize_schema, DiagnosticKind, SchemaDiagnostic, SynthesizedSchema,
    FORM_SCHEMA_VARIABLE_NAME,
};
pub use validate::{FormValidator, ValidationErrors, ValidationIssue};
