//! Executable form validator.

use super::node::{json_type_name, parse_shape, SchemaNode};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One validation failure, located by key path (`["field_3", "start"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub(crate) fn new(path: &[String], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// All failures of one validation run, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// Returns issues whose path starts at `key`.
    pub fn for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
        self.issues
            .iter()
            .filter(move |issue| issue.path.first().map(String::as_str) == Some(key))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {joined}")
    }
}

impl Error for ValidationErrors {}

/// Validator for a whole form record keyed by field key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValidator {
    shape: Vec<(String, SchemaNode)>,
}

impl FormValidator {
    pub(crate) fn new(shape: Vec<(String, SchemaNode)>) -> Self {
        Self { shape }
    }

    /// Keys validated by this validator, in field order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.shape.iter().map(|(key, _)| key.as_str())
    }

    pub fn node(&self, key: &str) -> Option<&SchemaNode> {
        self.shape
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, node)| node)
    }

    pub fn shape(&self) -> &[(String, SchemaNode)] {
        &self.shape
    }

    /// Validates a record and returns the parsed output.
    ///
    /// Output keys follow field order; unknown input keys are stripped;
    /// boolean defaults fill absent booleans.
    pub fn validate(&self, values: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let mut issues = Vec::new();
        let map = match values {
            Value::Object(map) => map,
            other => {
                return Err(ValidationErrors {
                    issues: vec![ValidationIssue::new(
                        &[],
                        format!("Expected object, received {}", json_type_name(other)),
                    )],
                });
            }
        };

        let mut path = Vec::new();
        let output = parse_shape(&self.shape, map, &mut path, &mut issues);
        if issues.is_empty() {
            Ok(output)
        } else {
            Err(ValidationErrors { issues })
        }
    }

    /// Validates a single field value (`None` means absent).
    ///
    /// Unknown keys validate as absent-and-accepted, mirroring key stripping.
    pub fn validate_field(
        &self,
        key: &str,
        value: Option<&Value>,
    ) -> Result<Option<Value>, ValidationErrors> {
        let Some(node) = self.node(key) else {
            return Ok(None);
        };
        let mut issues = Vec::new();
        let mut path = vec![key.to_string()];
        let parsed = node.parse(value, &mut path, &mut issues);
        if issues.is_empty() {
            Ok(parsed)
        } else {
            Err(ValidationErrors { issues })
        }
    }
}
