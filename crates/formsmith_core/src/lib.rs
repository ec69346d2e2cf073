//! Core domain logic for the formsmith form builder.
//! This crate is the single source of truth for field invariants and for
//! everything derived from a field list (validator, defaults, source text).

pub mod catalog;
pub mod codegen;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schema;
pub mod service;
pub mod store;

pub use catalog::formats::{formats_for, formats_for_type_name, is_format_allowed, FormatOption};
pub use catalog::palette::{field_sections, find_template, FieldSection, FieldTemplate};
pub use codegen::generate_source_code;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::field::{
    field_key, Field, FieldId, FieldType, FieldValidationError, FieldWithIdAndKey,
};
pub use model::form::{Form, FormMetadata, MetadataValidationError};
pub use repo::form_repo::{FormRepository, RepoError, RepoResult, SqliteFormRepository};
pub use schema::{
    synthesize_schema, DefaultValue, DefaultValues, FormValidator, SchemaDiagnostic,
    SynthesizedSchema, ValidationErrors, ValidationIssue,
};
pub use service::artifacts::{derive_artifacts, preview_submission, FormArtifacts, SubmissionPreview};
pub use service::autosave::{
    AutoSaveOutcome, AutoSaveService, AutoSaveState, DEFAULT_AUTOSAVE_DELAY,
};
pub use store::{PlaygroundSnapshot, PlaygroundStore, PlaygroundTab, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
