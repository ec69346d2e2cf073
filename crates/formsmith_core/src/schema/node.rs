//! Per-field validator AST.
//!
//! # Responsibility
//! - Represent one field's validator as data.
//! - Interpret it against JSON input (`parse`).
//! - Print it as validation-library source (`render`).
//!
//! # Invariants
//! - `parse` and `render` walk the same node; neither adds rules the other
//!   does not know about.
//! - Checks are applied and printed in list order.

use super::date::parse_date_value;
use super::validate::ValidationIssue;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use std::fmt::{Debug, Formatter};

// Lookaheads of the library's email rule (no leading dot, no `..`) are
// checked separately in `is_email`.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"^([A-Z0-9_'+\-\.]*)[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .case_insensitive(true)
        .build()
        .expect("valid email regex")
});

/// Validator node for one value.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// `z.string()` followed by checks.
    Text(Vec<TextCheck>),
    /// `z.enum([...])` over literal values.
    Enum(Vec<String>),
    /// `z.boolean().default(..)`.
    Boolean { default: bool },
    /// `z.object({ .. })`, keys in declaration order.
    Object(Vec<(String, SchemaNode)>),
    /// `.optional()` wrapper: an absent value is accepted.
    Optional(Box<SchemaNode>),
}

/// One refinement applied to a text value.
#[derive(Debug, Clone, PartialEq)]
pub enum TextCheck {
    MinLength(u32),
    MaxLength(u32),
    Pattern(Pattern),
    Email,
    NotBefore(DateBound),
    NotAfter(DateBound),
}

/// User-supplied regular expression, kept with its source text.
///
/// Compiled with `fancy_regex` so look-around and backreferences behave as
/// in the browser's `RegExp`.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: fancy_regex::Regex,
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Self, fancy_regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: fancy_regex::Regex::new(source)?,
        })
    }

    /// Search semantics; a match that exceeds the backtracking limit fails.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text).unwrap_or(false)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Debug for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

/// Date bound as configured, plus its parsed instant.
///
/// An unparseable bound rejects every value, matching a comparison against
/// an invalid date.
#[derive(Debug, Clone, PartialEq)]
pub struct DateBound {
    raw: String,
    at: Option<DateTime<Utc>>,
}

impl DateBound {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            at: parse_date_value(raw),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl SchemaNode {
    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Wraps in `Optional` when `optional` is set.
    pub fn optional_if(self, optional: bool) -> Self {
        if optional {
            self.optional()
        } else {
            self
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Prints this node as a single-line validator expression.
    pub fn render(&self) -> String {
        match self {
            Self::Text(checks) => {
                let mut out = String::from("z.string()");
                for check in checks {
                    out.push_str(&check.render());
                }
                out
            }
            Self::Enum(values) => format!("z.enum({})", json_string_array(values)),
            Self::Boolean { default } => format!("z.boolean().default({default})"),
            Self::Object(shape) => {
                if shape.is_empty() {
                    return "z.object({})".to_string();
                }
                let entries = shape
                    .iter()
                    .map(|(key, node)| format!("{key}: {}", node.render()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("z.object({{ {entries} }})")
            }
            Self::Optional(inner) => format!("{}.optional()", inner.render()),
        }
    }

    /// Interprets this node against `value` (`None` means absent).
    ///
    /// Returns the parsed output, or `None` when the value is absent or
    /// invalid. Failures are appended to `issues` under `path`.
    pub(crate) fn parse(
        &self,
        value: Option<&Value>,
        path: &mut Vec<String>,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Value> {
        match self {
            Self::Optional(inner) => match value {
                None => None,
                Some(value) => inner.parse(Some(value), path, issues),
            },
            Self::Text(checks) => {
                let text = match value {
                    None => {
                        issues.push(ValidationIssue::new(path, "Required"));
                        return None;
                    }
                    Some(Value::String(text)) => text,
                    Some(other) => {
                        issues.push(ValidationIssue::new(
                            path,
                            format!("Expected string, received {}", json_type_name(other)),
                        ));
                        return None;
                    }
                };
                let before = issues.len();
                for check in checks {
                    if let Some(message) = check.failure(text) {
                        issues.push(ValidationIssue::new(path, message));
                    }
                }
                (issues.len() == before).then(|| Value::String(text.clone()))
            }
            Self::Enum(values) => {
                let expected = values
                    .iter()
                    .map(|value| format!("'{value}'"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                match value {
                    None => {
                        issues.push(ValidationIssue::new(path, "Required"));
                        None
                    }
                    Some(Value::String(text)) if values.contains(text) => {
                        Some(Value::String(text.clone()))
                    }
                    Some(Value::String(text)) => {
                        issues.push(ValidationIssue::new(
                            path,
                            format!("Invalid enum value. Expected {expected}, received '{text}'"),
                        ));
                        None
                    }
                    Some(other) => {
                        issues.push(ValidationIssue::new(
                            path,
                            format!("Expected {expected}, received {}", json_type_name(other)),
                        ));
                        None
                    }
                }
            }
            Self::Boolean { default } => match value {
                None => Some(Value::Bool(*default)),
                Some(Value::Bool(flag)) => Some(Value::Bool(*flag)),
                Some(other) => {
                    issues.push(ValidationIssue::new(
                        path,
                        format!("Expected boolean, received {}", json_type_name(other)),
                    ));
                    None
                }
            },
            Self::Object(shape) => {
                let map = match value {
                    None => {
                        issues.push(ValidationIssue::new(path, "Required"));
                        return None;
                    }
                    Some(Value::Object(map)) => map,
                    Some(other) => {
                        issues.push(ValidationIssue::new(
                            path,
                            format!("Expected object, received {}", json_type_name(other)),
                        ));
                        return None;
                    }
                };
                let before = issues.len();
                let output = parse_shape(shape, map, path, issues);
                (issues.len() == before).then_some(Value::Object(output))
            }
        }
    }
}

/// Parses every key of `shape` out of `map`, stripping unknown keys.
pub(crate) fn parse_shape(
    shape: &[(String, SchemaNode)],
    map: &Map<String, Value>,
    path: &mut Vec<String>,
    issues: &mut Vec<ValidationIssue>,
) -> Map<String, Value> {
    let mut output = Map::new();
    for (key, node) in shape {
        path.push(key.clone());
        if let Some(parsed) = node.parse(map.get(key), path, issues) {
            output.insert(key.clone(), parsed);
        }
        path.pop();
    }
    output
}

impl TextCheck {
    fn render(&self) -> String {
        match self {
            Self::MinLength(min) => format!(".min({min})"),
            Self::MaxLength(max) => format!(".max({max})"),
            Self::Pattern(pattern) => {
                format!(".regex(new RegExp({}))", json_string(pattern.source()))
            }
            Self::Email => ".email()".to_string(),
            Self::NotBefore(bound) => render_date_refine(bound, ">=", &self.message()),
            Self::NotAfter(bound) => render_date_refine(bound, "<=", &self.message()),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MinLength(min) => format!("String must contain at least {min} character(s)"),
            Self::MaxLength(max) => format!("String must contain at most {max} character(s)"),
            Self::Pattern(_) => "Invalid".to_string(),
            Self::Email => "Invalid email".to_string(),
            Self::NotBefore(bound) => format!("Date must be on or after {}", bound.raw()),
            Self::NotAfter(bound) => format!("Date must be on or before {}", bound.raw()),
        }
    }

    /// Returns the failure message when `text` does not satisfy this check.
    fn failure(&self, text: &str) -> Option<String> {
        let passed = match self {
            Self::MinLength(min) => utf16_len(text) >= *min as usize,
            Self::MaxLength(max) => utf16_len(text) <= *max as usize,
            Self::Pattern(pattern) => pattern.is_match(text),
            Self::Email => is_email(text),
            Self::NotBefore(bound) => match (parse_date_value(text), bound.at) {
                (Some(value), Some(min)) => value >= min,
                _ => false,
            },
            Self::NotAfter(bound) => match (parse_date_value(text), bound.at) {
                (Some(value), Some(max)) => value <= max,
                _ => false,
            },
        };
        (!passed).then(|| self.message())
    }
}

fn render_date_refine(bound: &DateBound, operator: &str, message: &str) -> String {
    format!(
        ".refine((date) => {{ const inputDate = new Date(date); if (isNaN(inputDate.getTime())) return false; return inputDate {operator} new Date({}); }}, {{ message: {} }})",
        json_string(bound.raw()),
        json_string(message)
    )
}

fn is_email(text: &str) -> bool {
    !text.starts_with('.') && !text.contains("..") && EMAIL_RE.is_match(text)
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON-escapes a string literal for embedding in generated source.
pub fn json_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

fn json_string_array(values: &[String]) -> String {
    Value::Array(values.iter().cloned().map(Value::String).collect()).to_string()
}

#[cfg(test)]
mod tests {
    use super::{is_email, DateBound, Pattern, SchemaNode, TextCheck};

    #[test]
    fn renders_checks_in_order() {
        let node = SchemaNode::Text(vec![
            TextCheck::MinLength(2),
            TextCheck::MaxLength(8),
            TextCheck::Pattern(Pattern::compile("^[a-z]+$").expect("valid pattern")),
        ])
        .optional();
        assert_eq!(
            node.render(),
            r#"z.string().min(2).max(8).regex(new RegExp("^[a-z]+$")).optional()"#
        );
    }

    #[test]
    fn renders_range_object_inline() {
        let node = SchemaNode::Object(vec![
            ("start".to_string(), SchemaNode::Text(vec![TextCheck::MinLength(1)])),
            ("end".to_string(), SchemaNode::Text(vec![TextCheck::MinLength(1)])),
        ]);
        assert_eq!(
            node.render(),
            "z.object({ start: z.string().min(1), end: z.string().min(1) })"
        );
    }

    #[test]
    fn date_refine_escapes_bound_and_message() {
        let rendered = SchemaNode::Text(vec![TextCheck::NotBefore(DateBound::new("2024-01-01"))]).render();
        assert!(rendered.contains(r#"return inputDate >= new Date("2024-01-01");"#));
        assert!(rendered.contains(r#"{ message: "Date must be on or after 2024-01-01" }"#));
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn email_rule_rejects_dot_edge_cases() {
        assert!(is_email("ada@example.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
        assert!(!is_email(".ada@example.com"));
        assert!(!is_email("ada..l@example.com"));
        assert!(!is_email("ada@example"));
        assert!(!is_email(""));
    }
}
