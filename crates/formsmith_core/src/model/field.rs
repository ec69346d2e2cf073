//! Field domain model.
//!
//! # Responsibility
//! - Define the tagged union of the five field kinds and their formats.
//! - Provide declaration-level validation used before a field enters a form.
//!
//! # Invariants
//! - `key` is always `field_<id>` for the field's `id`.
//! - `min <= max` (string, number) and `minDate <= maxDate` (date) when both
//!   are set.
//! - Enum option values are unique and the option list is non-empty.
//! - A date field's default value shape matches its format.
//!
//! # See also
//! - model/form.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable per-form field identifier. Minted once by the store, never reused.
pub type FieldId = u32;

/// Returns the record key for a field id.
pub fn field_key(id: FieldId) -> String {
    format!("field_{id}")
}

/// Closed set of field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Enum,
    Boolean,
    Number,
    Date,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::String,
        FieldType::Enum,
        FieldType::Boolean,
        FieldType::Number,
        FieldType::Date,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Enum => "enum",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Date => "date",
        }
    }

    /// Parses a wire type name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == name)
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringFormat {
    Input,
    Textarea,
    Email,
    Password,
    Phone,
}

impl StringFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Password => "password",
            Self::Phone => "phone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumFormat {
    Select,
    Combobox,
    Radio,
}

impl EnumFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Combobox => "combobox",
            Self::Radio => "radio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanFormat {
    Checkbox,
    Switch,
}

impl BooleanFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Switch => "switch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    Input,
    Slider,
}

impl NumberFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Slider => "slider",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    Date,
    Time,
    Datetime,
    Range,
}

impl DateFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Range => "range",
        }
    }
}

/// Clock display for time-bearing date formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimeFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwelveHour => "12h",
            Self::TwentyFourHour => "24h",
        }
    }
}

/// One selectable enum option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub label: String,
    pub value: String,
}

impl EnumOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Start/end pair used by range date fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Stored default of a date field: a single value or a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateDefault {
    Single(String),
    Range(DateRange),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringField {
    pub format: StringFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    /// Minimum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    /// Maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumField {
    pub format: EnumFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub options: Vec<EnumOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanField {
    pub format: BooleanFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub as_card: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberField {
    pub format: NumberFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateField {
    pub format: DateFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub required: bool,
    pub past_enabled: bool,
    pub future_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<TimeFormat>,
    /// ISO date string (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    /// ISO date string (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DateDefault>,
}

/// A configurable form input, discriminated by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Field {
    String(StringField),
    Enum(EnumField),
    Boolean(BooleanField),
    Number(NumberField),
    Date(DateField),
}

impl Field {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::String(_) => FieldType::String,
            Self::Enum(_) => FieldType::Enum,
            Self::Boolean(_) => FieldType::Boolean,
            Self::Number(_) => FieldType::Number,
            Self::Date(_) => FieldType::Date,
        }
    }

    /// Wire name of the field's format.
    pub fn format_name(&self) -> &'static str {
        match self {
            Self::String(field) => field.format.as_str(),
            Self::Enum(field) => field.format.as_str(),
            Self::Boolean(field) => field.format.as_str(),
            Self::Number(field) => field.format.as_str(),
            Self::Date(field) => field.format.as_str(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::String(field) => field.label.as_deref(),
            Self::Enum(field) => field.label.as_deref(),
            Self::Boolean(field) => field.label.as_deref(),
            Self::Number(field) => field.label.as_deref(),
            Self::Date(field) => field.label.as_deref(),
        }
    }

    /// Validates declaration-level invariants of this field.
    ///
    /// Synthesis and code generation never call this; the store does, before
    /// a field enters the form.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        match self {
            Self::String(field) => {
                if let (Some(min), Some(max)) = (field.min, field.max) {
                    if min > max {
                        return Err(FieldValidationError::LengthBoundsReversed { min, max });
                    }
                }
                Ok(())
            }
            Self::Enum(field) => {
                if field.options.is_empty() {
                    return Err(FieldValidationError::MissingOptions);
                }
                let mut seen = BTreeSet::new();
                for option in &field.options {
                    if !seen.insert(option.value.as_str()) {
                        return Err(FieldValidationError::DuplicateOptionValue(
                            option.value.clone(),
                        ));
                    }
                }
                Ok(())
            }
            Self::Boolean(_) => Ok(()),
            Self::Number(field) => {
                if let (Some(min), Some(max)) = (field.min, field.max) {
                    if min > max {
                        return Err(FieldValidationError::NumberBoundsReversed { min, max });
                    }
                }
                match field.step {
                    Some(step) if !(step > 0.0) => Err(FieldValidationError::NonPositiveStep(step)),
                    _ => Ok(()),
                }
            }
            Self::Date(field) => validate_date_field(field),
        }
    }
}

fn validate_date_field(field: &DateField) -> Result<(), FieldValidationError> {
    let min = parse_bound(field.min_date.as_deref())?;
    let max = parse_bound(field.max_date.as_deref())?;
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(FieldValidationError::DateBoundsReversed {
                min_date: min.to_string(),
                max_date: max.to_string(),
            });
        }
    }

    match (&field.default_value, field.format) {
        (None, _) => Ok(()),
        (Some(DateDefault::Range(_)), DateFormat::Range) => Ok(()),
        (Some(DateDefault::Single(_)), DateFormat::Range) => {
            Err(FieldValidationError::DefaultShapeMismatch(DateFormat::Range))
        }
        (Some(DateDefault::Range(_)), format) => {
            Err(FieldValidationError::DefaultShapeMismatch(format))
        }
        (Some(DateDefault::Single(_)), _) => Ok(()),
    }
}

fn parse_bound(raw: Option<&str>) -> Result<Option<NaiveDate>, FieldValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FieldValidationError::InvalidDateBound(value.to_string())),
    }
}

/// A field placed in a form: the field body plus its minted identity.
///
/// Serialized flat: `{"id": 0, "key": "field_0", "type": "string", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWithIdAndKey {
    pub id: FieldId,
    pub key: String,
    #[serde(flatten)]
    pub field: Field,
}

impl FieldWithIdAndKey {
    /// Attaches identity to a field body. `key` is derived from `id`.
    pub fn new(id: FieldId, field: Field) -> Self {
        Self {
            id,
            key: field_key(id),
            field,
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.field.field_type()
    }

    pub fn format_name(&self) -> &'static str {
        self.field.format_name()
    }

    /// Returns whether `key` still matches the `field_<id>` derivation.
    pub fn has_canonical_key(&self) -> bool {
        self.key == field_key(self.id)
    }
}

/// Declaration-level field validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValidationError {
    LengthBoundsReversed { min: u32, max: u32 },
    NumberBoundsReversed { min: f64, max: f64 },
    NonPositiveStep(f64),
    MissingOptions,
    DuplicateOptionValue(String),
    InvalidDateBound(String),
    DateBoundsReversed { min_date: String, max_date: String },
    DefaultShapeMismatch(DateFormat),
}

impl Display for FieldValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthBoundsReversed { min, max } => {
                write!(f, "min length ({min}) must be <= max length ({max})")
            }
            Self::NumberBoundsReversed { min, max } => {
                write!(f, "min ({min}) must be <= max ({max})")
            }
            Self::NonPositiveStep(step) => write!(f, "step must be > 0, got {step}"),
            Self::MissingOptions => write!(f, "enum field must have at least one option"),
            Self::DuplicateOptionValue(value) => {
                write!(f, "enum option value is duplicated: {value}")
            }
            Self::InvalidDateBound(value) => {
                write!(f, "date bound is not a YYYY-MM-DD date: {value}")
            }
            Self::DateBoundsReversed { min_date, max_date } => {
                write!(f, "minDate ({min_date}) must be <= maxDate ({max_date})")
            }
            Self::DefaultShapeMismatch(format) => write!(
                f,
                "default value shape does not match date format `{}`",
                format.as_str()
            ),
        }
    }
}

impl Error for FieldValidationError {}
