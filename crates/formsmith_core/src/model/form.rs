//! Form and form metadata model.
//!
//! # Responsibility
//! - Define the whole-form value owned by the store and persisted wholesale.
//! - Enforce presentation length caps on metadata.
//!
//! # Invariants
//! - `name` and `metadata.title` are at most 100 characters.
//! - `metadata.description` is at most 300 characters.
//! - `fields` order is the render/synthesis order.

use crate::model::field::FieldWithIdAndKey;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MAX_FORM_NAME_CHARS: usize = 100;
pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 300;

const DEFAULT_FORM_NAME: &str = "My New Form";
const DEFAULT_DESCRIPTION: &str =
    "I built this form with formsmith, shadcn/ui, React Hook Form and Zod.";

/// Presentation attributes of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormMetadata {
    pub title: String,
    pub description: String,
    pub submit_button_label: String,
    pub submit_button_color: String,
    pub submit_button_shade: u32,
    pub button_width_full: bool,
    pub show_background: bool,
    pub background_color: String,
    pub background_shade: u32,
}

impl Default for FormMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_FORM_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            submit_button_label: "Submit".to_string(),
            submit_button_color: "zinc".to_string(),
            submit_button_shade: 900,
            button_width_full: false,
            show_background: true,
            background_color: "amber".to_string(),
            background_shade: 500,
        }
    }
}

impl FormMetadata {
    /// Validates the declared length caps.
    pub fn validate(&self) -> Result<(), MetadataValidationError> {
        let title_chars = self.title.chars().count();
        if title_chars > MAX_TITLE_CHARS {
            return Err(MetadataValidationError::TitleTooLong(title_chars));
        }
        let description_chars = self.description.chars().count();
        if description_chars > MAX_DESCRIPTION_CHARS {
            return Err(MetadataValidationError::DescriptionTooLong(
                description_chars,
            ));
        }
        Ok(())
    }
}

/// Complete form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub name: String,
    pub metadata: FormMetadata,
    pub fields: Vec<FieldWithIdAndKey>,
}

impl Default for Form {
    fn default() -> Self {
        Self::empty()
    }
}

impl Form {
    /// Returns the session-start form: default metadata, no fields.
    pub fn empty() -> Self {
        Self {
            name: DEFAULT_FORM_NAME.to_string(),
            metadata: FormMetadata::default(),
            fields: Vec::new(),
        }
    }

    /// Validates the form name and metadata caps.
    ///
    /// Field bodies are validated individually by the store on insertion.
    pub fn validate(&self) -> Result<(), MetadataValidationError> {
        let name_chars = self.name.chars().count();
        if name_chars > MAX_FORM_NAME_CHARS {
            return Err(MetadataValidationError::NameTooLong(name_chars));
        }
        self.metadata.validate()
    }
}

/// Metadata length-cap violations. Payload is the offending char count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValidationError {
    NameTooLong(usize),
    TitleTooLong(usize),
    DescriptionTooLong(usize),
}

impl Display for MetadataValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooLong(count) => write!(
                f,
                "form name has {count} characters; at most {MAX_FORM_NAME_CHARS} allowed"
            ),
            Self::TitleTooLong(count) => write!(
                f,
                "form title has {count} characters; at most {MAX_TITLE_CHARS} allowed"
            ),
            Self::DescriptionTooLong(count) => write!(
                f,
                "form description has {count} characters; at most {MAX_DESCRIPTION_CHARS} allowed"
            ),
        }
    }
}

impl Error for MetadataValidationError {}
