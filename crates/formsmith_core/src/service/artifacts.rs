//! Derived artifacts of a form snapshot.
//!
//! # Responsibility
//! - Run synthesis and generation together for one form.
//! - Validate a preview submission and format its payload for display.
//!
//! # Invariants
//! - Generation always consumes the schema text and defaults synthesized
//!   from the same field list.

use crate::codegen::generate_source_code;
use crate::model::form::Form;
use crate::schema::{synthesize_schema, FormValidator, SynthesizedSchema, ValidationErrors};
use log::debug;
use serde_json::{Map, Value};

/// Everything the preview and code panes render.
#[derive(Debug, Clone, PartialEq)]
pub struct FormArtifacts {
    pub schema: SynthesizedSchema,
    pub source_code: String,
}

/// Synthesizes the schema of `form` and generates its component source.
pub fn derive_artifacts(form: &Form) -> FormArtifacts {
    let schema = synthesize_schema(&form.fields);
    let source_code = generate_source_code(form, &schema.source_text, &schema.default_values);
    FormArtifacts {
        schema,
        source_code,
    }
}

/// Accepted submission: parsed values plus the pretty-printed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPreview {
    pub values: Map<String, Value>,
    pub payload: String,
}

/// Validates `values` and renders the accepted payload as indented JSON.
pub fn preview_submission(
    validator: &FormValidator,
    values: &Value,
) -> Result<SubmissionPreview, ValidationErrors> {
    match validator.validate(values) {
        Ok(parsed) => {
            let payload = pretty_payload(&parsed);
            debug!(
                "event=submission_preview module=artifacts status=ok keys={}",
                parsed.len()
            );
            Ok(SubmissionPreview {
                values: parsed,
                payload,
            })
        }
        Err(errors) => {
            debug!(
                "event=submission_preview module=artifacts status=error issues={}",
                errors.issues.len()
            );
            Err(errors)
        }
    }
}

fn pretty_payload(values: &Map<String, Value>) -> String {
    // Serializing a `Map` of JSON values cannot fail.
    serde_json::to_string_pretty(values).unwrap_or_else(|_| "{}".to_string())
}
