//! Field palette: ready-made templates grouped by field type.
//!
//! Each template is the exact `Field` the "add field" action inserts; the
//! store mints its id/key on insertion.

use crate::model::field::{
    BooleanField, BooleanFormat, DateField, DateFormat, EnumField, EnumFormat, EnumOption, Field,
    FieldType, NumberField, NumberFormat, StringField, StringFormat,
};
use serde::Serialize;

const STRING_LABEL: &str = "My string field";
const ENUM_LABEL: &str = "My enum field";
const BOOLEAN_LABEL: &str = "My boolean field";
const NUMBER_LABEL: &str = "My number field";
const DATE_LABEL: &str = "My date field";
const TEXT_PLACEHOLDER: &str = "Insert placeholder here...";
const ENUM_PLACEHOLDER: &str = "Select an option from the enum...";
const BOOLEAN_DESCRIPTION: &str = "You can include an optional description here...";

/// One palette button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub field: Field,
}

/// Palette section for one field type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSection {
    pub field_type: FieldType,
    pub section_name: &'static str,
    pub templates: Vec<FieldTemplate>,
}

/// Returns every palette section in display order.
pub fn field_sections() -> Vec<FieldSection> {
    FieldType::ALL.into_iter().map(section_for).collect()
}

/// Returns the palette section of one field type.
pub fn section_for(field_type: FieldType) -> FieldSection {
    match field_type {
        FieldType::String => FieldSection {
            field_type,
            section_name: "String fields",
            templates: vec![
                string_template("Text Input", "Single-line text input field", StringFormat::Input),
                string_template("Text Area", "Multi-line text input field", StringFormat::Textarea),
                string_template("Email", "Input field for email addresses", StringFormat::Email),
                string_template(
                    "Password",
                    "Secure input field for passwords",
                    StringFormat::Password,
                ),
                string_template("Phone", "Input field for phone numbers", StringFormat::Phone),
            ],
        },
        FieldType::Enum => FieldSection {
            field_type,
            section_name: "Enum fields",
            templates: vec![
                enum_template(
                    "Select",
                    "Dropdown selection from a list of options",
                    EnumFormat::Select,
                ),
                enum_template(
                    "Combobox",
                    "Searchable dropdown with options",
                    EnumFormat::Combobox,
                ),
                enum_template(
                    "Radio Group",
                    "Select one option from a list of radio buttons",
                    EnumFormat::Radio,
                ),
            ],
        },
        FieldType::Boolean => FieldSection {
            field_type,
            section_name: "Boolean fields",
            templates: vec![
                boolean_template(
                    "Checkbox",
                    "Toggle between true and false with a checkbox",
                    BooleanFormat::Checkbox,
                ),
                boolean_template(
                    "Switch",
                    "Toggle between true and false with a switch",
                    BooleanFormat::Switch,
                ),
            ],
        },
        FieldType::Number => FieldSection {
            field_type,
            section_name: "Number fields",
            templates: vec![
                number_template("Number Input", "Single-line number input field", NumberFormat::Input),
                number_template("Slider", "Slider input field", NumberFormat::Slider),
            ],
        },
        FieldType::Date => FieldSection {
            field_type,
            section_name: "Date fields",
            templates: vec![
                date_template(
                    "Individual Date Picker",
                    "Select a single date from a calendar",
                    DateFormat::Date,
                ),
                date_template(
                    "Date Range Picker",
                    "Select a range of dates from a calendar",
                    DateFormat::Range,
                ),
                date_template("Time Picker", "Select a time from a clock", DateFormat::Time),
                date_template(
                    "Date and Time Picker",
                    "Select a date and time from a calendar and clock",
                    DateFormat::Datetime,
                ),
            ],
        },
    }
}

/// Finds the template for a type/format pair by wire names.
pub fn find_template(type_name: &str, format: &str) -> Option<FieldTemplate> {
    let field_type = FieldType::from_name(type_name.trim())?;
    section_for(field_type)
        .templates
        .into_iter()
        .find(|template| template.field.format_name() == format.trim())
}

fn string_template(
    title: &'static str,
    description: &'static str,
    format: StringFormat,
) -> FieldTemplate {
    FieldTemplate {
        title,
        description,
        field: Field::String(StringField {
            format,
            label: Some(STRING_LABEL.to_string()),
            placeholder: Some(TEXT_PLACEHOLDER.to_string()),
            required: true,
            min: None,
            max: None,
            pattern: None,
        }),
    }
}

fn enum_template(title: &'static str, description: &'static str, format: EnumFormat) -> FieldTemplate {
    FieldTemplate {
        title,
        description,
        field: Field::Enum(EnumField {
            format,
            label: Some(ENUM_LABEL.to_string()),
            placeholder: Some(ENUM_PLACEHOLDER.to_string()),
            options: vec![
                EnumOption::new("Apple", "apple"),
                EnumOption::new("Banana", "banana"),
                EnumOption::new("Orange", "orange"),
            ],
        }),
    }
}

fn boolean_template(
    title: &'static str,
    description: &'static str,
    format: BooleanFormat,
) -> FieldTemplate {
    FieldTemplate {
        title,
        description,
        field: Field::Boolean(BooleanField {
            format,
            label: Some(BOOLEAN_LABEL.to_string()),
            description: Some(BOOLEAN_DESCRIPTION.to_string()),
            as_card: true,
        }),
    }
}

fn number_template(
    title: &'static str,
    description: &'static str,
    format: NumberFormat,
) -> FieldTemplate {
    FieldTemplate {
        title,
        description,
        field: Field::Number(NumberField {
            format,
            label: Some(NUMBER_LABEL.to_string()),
            placeholder: Some(TEXT_PLACEHOLDER.to_string()),
            required: true,
            min: None,
            max: None,
            step: None,
        }),
    }
}

fn date_template(title: &'static str, description: &'static str, format: DateFormat) -> FieldTemplate {
    FieldTemplate {
        title,
        description,
        field: Field::Date(DateField {
            format,
            label: Some(DATE_LABEL.to_string()),
            required: true,
            past_enabled: true,
            future_enabled: true,
            time_format: None,
            min_date: None,
            max_date: None,
            default_value: None,
        }),
    }
}
