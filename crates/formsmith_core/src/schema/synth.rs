//! Schema synthesis from an ordered field list.
//!
//! # Responsibility
//! - Decide one `SchemaNode` and one default value per field.
//! - Derive the executable validator and its source text from those nodes.
//!
//! # Invariants
//! - Record keys, default-value keys and text lines follow field order.
//! - Every rule lives in exactly one place (`field_entry`); the validator and
//!   the text cannot disagree.
//! - Synthesis never fails: unsupported fields are skipped and reported in
//!   `diagnostics`.

use super::defaults::{DefaultValue, DefaultValues};
use super::node::{DateBound, Pattern, SchemaNode, TextCheck};
use super::validate::FormValidator;
use crate::model::field::{
    DateField, DateFormat, EnumField, EnumFormat, Field, FieldType, FieldWithIdAndKey,
    StringField, StringFormat,
};
use log::{debug, warn};
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Variable name of the emitted schema declaration.
pub const FORM_SCHEMA_VARIABLE_NAME: &str = "formSchema";

/// Result of one synthesis pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedSchema {
    pub validator: FormValidator,
    pub default_values: DefaultValues,
    /// `const formSchema = z.object({ ... });`
    pub source_text: String,
    pub diagnostics: Vec<SchemaDiagnostic>,
}

/// Why a field (or part of it) produced no schema output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// No synthesis rule exists for this type/format.
    UnsupportedField {
        field_type: FieldType,
        format: &'static str,
    },
    /// The pattern does not compile; the pattern check was dropped.
    InvalidPattern { pattern: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiagnostic {
    pub key: String,
    pub kind: DiagnosticKind,
}

impl Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::UnsupportedField { field_type, format } => write!(
                f,
                "{}: no schema rule for {field_type}/{format}; field skipped",
                self.key
            ),
            DiagnosticKind::InvalidPattern { pattern, reason } => write!(
                f,
                "{}: pattern `{pattern}` does not compile ({reason}); check dropped",
                self.key
            ),
        }
    }
}

struct FieldEntry {
    node: SchemaNode,
    default: Option<DefaultValue>,
}

/// Synthesizes validator, default values and declaration text for `fields`.
///
/// Pure: the same field list always yields identical output.
pub fn synthesize_schema(fields: &[FieldWithIdAndKey]) -> SynthesizedSchema {
    let started_at = Instant::now();
    let mut shape = Vec::with_capacity(fields.len());
    let mut default_values = DefaultValues::new();
    let mut diagnostics = Vec::new();

    for field in fields {
        let Some(entry) = field_entry(field, &mut diagnostics) else {
            continue;
        };
        default_values.push(field.key.clone(), entry.default);
        shape.push((field.key.clone(), entry.node));
    }

    let source_text = render_declaration(&shape);

    for diagnostic in &diagnostics {
        match &diagnostic.kind {
            DiagnosticKind::UnsupportedField { field_type, format } => warn!(
                "event=schema_field_skipped module=schema status=skipped key={} type={} format={}",
                diagnostic.key, field_type, format
            ),
            DiagnosticKind::InvalidPattern { .. } => warn!(
                "event=schema_pattern_dropped module=schema status=skipped key={}",
                diagnostic.key
            ),
        }
    }
    debug!(
        "event=schema_synthesize module=schema status=ok fields={} synthesized={} diagnostics={} duration_us={}",
        fields.len(),
        shape.len(),
        diagnostics.len(),
        started_at.elapsed().as_micros()
    );

    SynthesizedSchema {
        validator: FormValidator::new(shape),
        default_values,
        source_text,
        diagnostics,
    }
}

/// Renders the multi-line declaration, one line per synthesized field.
pub fn render_declaration(shape: &[(String, SchemaNode)]) -> String {
    let lines = shape
        .iter()
        .map(|(key, node)| format!("  {key}: {},", node.render()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("const {FORM_SCHEMA_VARIABLE_NAME} = z.object({{\n{lines}\n}});")
}

fn field_entry(
    field: &FieldWithIdAndKey,
    diagnostics: &mut Vec<SchemaDiagnostic>,
) -> Option<FieldEntry> {
    match &field.field {
        Field::String(spec) => Some(string_entry(&field.key, spec, diagnostics)),
        Field::Enum(spec) => Some(enum_entry(spec)),
        Field::Boolean(_) => Some(FieldEntry {
            node: SchemaNode::Boolean { default: false },
            default: Some(DefaultValue::Boolean(false)),
        }),
        Field::Date(spec) => Some(date_entry(spec)),
        Field::Number(spec) => {
            diagnostics.push(SchemaDiagnostic {
                key: field.key.clone(),
                kind: DiagnosticKind::UnsupportedField {
                    field_type: FieldType::Number,
                    format: spec.format.as_str(),
                },
            });
            None
        }
    }
}

fn string_entry(
    key: &str,
    spec: &StringField,
    diagnostics: &mut Vec<SchemaDiagnostic>,
) -> FieldEntry {
    let mut checks = Vec::new();
    // Zero bounds and empty patterns count as unset.
    if let Some(min) = spec.min.filter(|min| *min > 0) {
        checks.push(TextCheck::MinLength(min));
    }
    if let Some(max) = spec.max.filter(|max| *max > 0) {
        checks.push(TextCheck::MaxLength(max));
    }
    if let Some(source) = spec.pattern.as_deref().filter(|source| !source.is_empty()) {
        match Pattern::compile(source) {
            Ok(pattern) => checks.push(TextCheck::Pattern(pattern)),
            Err(err) => diagnostics.push(SchemaDiagnostic {
                key: key.to_string(),
                kind: DiagnosticKind::InvalidPattern {
                    pattern: source.to_string(),
                    reason: err.to_string(),
                },
            }),
        }
    }

    let node = match spec.format {
        StringFormat::Email => {
            checks.push(TextCheck::Email);
            SchemaNode::Text(checks).optional_if(!spec.required)
        }
        StringFormat::Phone => SchemaNode::Text(checks).optional_if(!spec.required),
        StringFormat::Input | StringFormat::Textarea | StringFormat::Password => {
            if spec.required && spec.min.is_none() {
                checks.push(TextCheck::MinLength(1));
            }
            SchemaNode::Text(checks).optional_if(!spec.required)
        }
    };

    FieldEntry {
        node,
        default: Some(DefaultValue::empty_text()),
    }
}

fn enum_entry(spec: &EnumField) -> FieldEntry {
    match spec.format {
        EnumFormat::Radio => FieldEntry {
            node: SchemaNode::Enum(
                spec.options
                    .iter()
                    .map(|option| option.value.clone())
                    .collect(),
            ),
            default: None,
        },
        EnumFormat::Select | EnumFormat::Combobox => FieldEntry {
            node: SchemaNode::Text(Vec::new()),
            default: Some(DefaultValue::empty_text()),
        },
    }
}

fn date_entry(spec: &DateField) -> FieldEntry {
    match spec.format {
        DateFormat::Date | DateFormat::Datetime => {
            let mut checks = Vec::new();
            if let Some(min_date) = non_empty(spec.min_date.as_deref()) {
                checks.push(TextCheck::NotBefore(DateBound::new(min_date)));
            }
            if let Some(max_date) = non_empty(spec.max_date.as_deref()) {
                checks.push(TextCheck::NotAfter(DateBound::new(max_date)));
            }
            FieldEntry {
                node: SchemaNode::Text(checks).optional_if(!spec.required),
                default: Some(DefaultValue::empty_text()),
            }
        }
        DateFormat::Time => FieldEntry {
            node: SchemaNode::Text(Vec::new()).optional_if(!spec.required),
            default: Some(DefaultValue::empty_text()),
        },
        DateFormat::Range => {
            let endpoint = || SchemaNode::Text(vec![TextCheck::MinLength(1)]);
            FieldEntry {
                node: SchemaNode::Object(vec![
                    ("start".to_string(), endpoint()),
                    ("end".to_string(), endpoint()),
                ])
                .optional_if(!spec.required),
                default: Some(DefaultValue::empty_range()),
            }
        }
    }
}

/// Trimmed value, or `None` when blank. Matches how `Field::validate` reads
/// date bounds.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
