//! Field format catalog.

use crate::model::field::FieldType;
use serde::Serialize;

/// One selectable format for a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatOption {
    /// Wire name stored in the field's `format`.
    pub format: &'static str,
    /// Human-readable picker label.
    pub label: &'static str,
}

const fn option(format: &'static str, label: &'static str) -> FormatOption {
    FormatOption { format, label }
}

const STRING_FORMATS: &[FormatOption] = &[
    option("email", "Email"),
    option("input", "Text input"),
    option("password", "Password"),
    option("textarea", "Textarea"),
    option("phone", "Phone"),
];

const ENUM_FORMATS: &[FormatOption] = &[
    option("select", "Select"),
    option("combobox", "Combobox"),
    option("radio", "Radio group"),
];

const BOOLEAN_FORMATS: &[FormatOption] = &[
    option("checkbox", "Checkbox"),
    option("switch", "Switch"),
];

const NUMBER_FORMATS: &[FormatOption] = &[option("input", "Numeric"), option("slider", "Slider")];

const DATE_FORMATS: &[FormatOption] = &[
    option("date", "Date"),
    option("time", "Time"),
    option("datetime", "Date and time"),
    option("range", "Date range picker"),
];

/// Returns the ordered formats allowed for `field_type`.
pub fn formats_for(field_type: FieldType) -> &'static [FormatOption] {
    match field_type {
        FieldType::String => STRING_FORMATS,
        FieldType::Enum => ENUM_FORMATS,
        FieldType::Boolean => BOOLEAN_FORMATS,
        FieldType::Number => NUMBER_FORMATS,
        FieldType::Date => DATE_FORMATS,
    }
}

/// Looks up formats by wire type name. Unknown names yield an empty slice.
pub fn formats_for_type_name(type_name: &str) -> &'static [FormatOption] {
    FieldType::from_name(type_name.trim())
        .map(formats_for)
        .unwrap_or(&[])
}

/// Returns whether `format` belongs to the allowed set of `field_type`.
pub fn is_format_allowed(field_type: FieldType, format: &str) -> bool {
    formats_for(field_type)
        .iter()
        .any(|option| option.format == format)
}

#[cfg(test)]
mod tests {
    use super::{formats_for, formats_for_type_name, is_format_allowed};
    use crate::model::field::FieldType;

    #[test]
    fn string_formats_keep_catalog_order() {
        let names: Vec<&str> = formats_for(FieldType::String)
            .iter()
            .map(|option| option.format)
            .collect();
        assert_eq!(names, ["email", "input", "password", "textarea", "phone"]);
    }

    #[test]
    fn unknown_type_name_yields_empty() {
        assert!(formats_for_type_name("color").is_empty());
        assert_eq!(formats_for_type_name(" date ").len(), 4);
    }

    #[test]
    fn input_is_shared_by_string_and_number_only() {
        assert!(is_format_allowed(FieldType::String, "input"));
        assert!(is_format_allowed(FieldType::Number, "input"));
        assert!(!is_format_allowed(FieldType::Enum, "input"));
        assert!(!is_format_allowed(FieldType::Number, "range"));
    }
}
