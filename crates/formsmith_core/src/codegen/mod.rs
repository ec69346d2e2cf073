//! Component source-code generation.
//!
//! # Responsibility
//! - Render a form into one self-contained component source document:
//!   client pragma, imports, combobox option arrays, schema declaration,
//!   component function, closing markup.
//!
//! # Invariants
//! - Section order is fixed; field blocks follow field order.
//! - Import lines are never duplicated.
//! - Empty optional attributes suppress their line instead of emitting an
//!   empty one.
//! - Generation never fails; malformed defaults degrade to safe defaults.
//!
//! # See also
//! - schema/synth.rs (produces the declaration text and default values)

mod boolean_field;
mod date_field;
mod enum_field;
mod string_field;

use crate::model::field::{DateFormat, EnumFormat, Field, FieldWithIdAndKey};
use crate::model::form::{Form, FormMetadata};
use crate::schema::node::json_string;
use crate::schema::{DefaultValue, DefaultValues, FORM_SCHEMA_VARIABLE_NAME};
use log::debug;
use std::time::Instant;

pub use boolean_field::generate_boolean_field_source;
pub use date_field::generate_date_field_source;
pub use enum_field::{generate_combobox_static_array, generate_enum_field_source};
pub use string_field::generate_string_field_source;

const FALLBACK_COMPONENT_NAME: &str = "ProfileForm";

const BASE_IMPORTS: &[&str] = &[
    r#"import { z } from "zod";"#,
    r#"import { zodResolver } from "@hookform/resolvers/zod";"#,
    r#"import { useForm } from "react-hook-form";"#,
    r#"import { Form, FormControl, FormDescription, FormField, FormItem, FormLabel, FormMessage } from "@/components/ui/form";"#,
    r#"import { Button } from "@/components/ui/button";"#,
];

const BLOCK_INDENT: usize = 8;

const INPUT_IMPORT: &str = r#"import { Input } from "@/components/ui/input";"#;

/// Generates the full component source for `form`.
///
/// `schema_source` is the synthesized declaration text and `default_values`
/// the synthesized defaults; both are taken as given.
pub fn generate_source_code(
    form: &Form,
    schema_source: &str,
    default_values: &DefaultValues,
) -> String {
    let started_at = Instant::now();
    let mut source = String::new();

    source.push_str("\"use client\";\n");

    for line in BASE_IMPORTS {
        source.push_str(line);
        source.push('\n');
    }
    for line in field_specific_imports(&form.fields) {
        source.push_str(line);
        source.push('\n');
    }
    source.push('\n');

    for field in &form.fields {
        if let Field::Enum(spec) = &field.field {
            if spec.format == EnumFormat::Combobox {
                source.push_str(&generate_combobox_static_array(&field.key, spec));
                source.push('\n');
            }
        }
    }

    source.push_str(schema_source);
    source.push_str("\n\n");

    source.push_str(&format!(
        "export function {}() {{\n",
        component_name(&form.name)
    ));
    source.push_str(&format!(
        "  const form = useForm<z.infer<typeof {FORM_SCHEMA_VARIABLE_NAME}>>({{\n"
    ));
    source.push_str(&format!(
        "    resolver: zodResolver({FORM_SCHEMA_VARIABLE_NAME}),\n"
    ));
    source.push_str("    defaultValues: {\n");
    for field in &form.fields {
        if let Some(line) = default_value_line(field, default_values) {
            source.push_str("      ");
            source.push_str(&line);
            source.push('\n');
        }
    }
    source.push_str("    },\n");
    source.push_str("  });\n\n");

    source.push_str(&submit_handler());

    source.push_str("  return (\n");
    source.push_str("    <Form {...form}>\n");
    source.push_str(
        "      <form onSubmit={form.handleSubmit(onSubmit)} className=\"space-y-4\">\n",
    );
    source.push_str(&indent_block(&metadata_source(&form.metadata), BLOCK_INDENT));
    source.push_str(&indent_block(&fields_source(&form.fields), BLOCK_INDENT));
    source.push_str(&submit_button_source(&form.metadata));
    source.push_str("      </form>\n");
    source.push_str("    </Form>\n");
    source.push_str("  );\n");
    source.push_str("}\n");

    debug!(
        "event=codegen_generate module=codegen status=ok fields={} bytes={} duration_us={}",
        form.fields.len(),
        source.len(),
        started_at.elapsed().as_micros()
    );

    source
}

/// Returns deduplicated widget imports in first-appearance order of formats.
pub fn field_specific_imports(fields: &[FieldWithIdAndKey]) -> Vec<&'static str> {
    let mut imports: Vec<&'static str> = Vec::new();
    for field in fields {
        for line in imports_for_format(field.format_name()) {
            if !imports.contains(line) {
                imports.push(line);
            }
        }
    }
    imports
}

fn imports_for_format(format: &str) -> &'static [&'static str] {
    match format {
        "email" | "input" | "password" => &[INPUT_IMPORT],
        "textarea" => &[r#"import { Textarea } from "@/components/ui/textarea";"#],
        "phone" => &[r#"import { PhoneInput } from "@/components/ui/phone-input";"#],
        "radio" => &[r#"import { RadioGroup, RadioGroupItem } from "@/components/ui/radio-group";"#],
        "select" => &[
            r#"import { Select, SelectContent, SelectItem, SelectTrigger, SelectValue } from "@/components/ui/select";"#,
        ],
        "combobox" => &[
            r#"import { Popover, PopoverContent, PopoverTrigger } from "@/components/ui/popover";"#,
            r#"import { Command, CommandEmpty, CommandGroup, CommandInput, CommandItem, CommandList } from "@/components/ui/command";"#,
            r#"import { Check, ChevronsUpDown } from "lucide-react";"#,
            r#"import { cn } from "@/lib/utils";"#,
        ],
        "checkbox" => &[r#"import { Checkbox } from "@/components/ui/checkbox";"#],
        "switch" => &[r#"import { Switch } from "@/components/ui/switch";"#],
        "date" => &[r#"import { DatePicker } from "@/components/date-picker";"#],
        "time" => &[r#"import { TimePicker } from "@/components/time-picker";"#],
        "datetime" => &[r#"import { DateTimePicker } from "@/components/date-time-picker";"#],
        "range" => &[r#"import { RangeDatePicker } from "@/components/range-date-picker";"#],
        _ => &[],
    }
}

/// Renders the `defaultValues` initializer line of one field.
///
/// Radio enums and number fields contribute no line.
pub fn default_value_line(field: &FieldWithIdAndKey, default_values: &DefaultValues) -> Option<String> {
    let key = field.key.as_str();
    let text_default = || match default_values.get(key) {
        Some(DefaultValue::Text(text)) => text.as_str(),
        _ => "",
    };

    match &field.field {
        Field::String(_) => Some(format!("{key}: {},", json_string(text_default()))),
        Field::Enum(spec) if spec.format == EnumFormat::Radio => None,
        Field::Enum(_) => Some(format!("{key}: {},", json_string(text_default()))),
        Field::Boolean(_) => Some(format!("{key}: false,")),
        Field::Date(spec) if spec.format == DateFormat::Range => {
            let (start, end) = match default_values.get(key) {
                Some(DefaultValue::Range(range)) => (range.start.as_str(), range.end.as_str()),
                _ => ("", ""),
            };
            Some(format!(
                "{key}: {{ start: {}, end: {} }},",
                json_string(start),
                json_string(end)
            ))
        }
        Field::Date(_) => Some(format!("{key}: {},", json_string(text_default()))),
        Field::Number(_) => None,
    }
}

fn submit_handler() -> String {
    let mut out = String::new();
    out.push_str("  // Define a submit handler.\n");
    out.push_str(&format!(
        "  function onSubmit(values: z.infer<typeof {FORM_SCHEMA_VARIABLE_NAME}>) {{\n"
    ));
    out.push_str("    // Do something with the form values.\n");
    out.push_str("    // This will be type-safe and validated.\n");
    out.push_str("    console.log(values);\n");
    out.push_str("  }\n\n");
    out
}

/// Renders the title/description block; empty when both are empty.
pub fn metadata_source(metadata: &FormMetadata) -> String {
    if metadata.title.is_empty() && metadata.description.is_empty() {
        return String::new();
    }

    let mut out = String::from("<div>\n");
    if !metadata.title.is_empty() {
        out.push_str(&format!(
            "  <h1 className=\"text-3xl font-bold tracking-tight mb-1.5\">{}</h1>\n",
            jsx_text(&metadata.title)
        ));
    }
    if !metadata.description.is_empty() {
        out.push_str(&format!(
            "  <p className=\"text-base text-zinc-500\">{}</p>\n",
            jsx_text(&metadata.description)
        ));
    }
    out.push_str("</div>\n");
    out
}

/// Concatenates field blocks in field order.
pub fn fields_source(fields: &[FieldWithIdAndKey]) -> String {
    fields
        .iter()
        .map(|field| match &field.field {
            Field::String(spec) => generate_string_field_source(&field.key, spec),
            Field::Enum(spec) => generate_enum_field_source(&field.key, spec),
            Field::Boolean(spec) => generate_boolean_field_source(&field.key, spec),
            Field::Date(spec) => generate_date_field_source(&field.key, spec),
            Field::Number(_) => String::new(),
        })
        .collect()
}

fn submit_button_source(metadata: &FormMetadata) -> String {
    let label = if metadata.submit_button_label.is_empty() {
        "Submit"
    } else {
        metadata.submit_button_label.as_str()
    };
    let class_name = if metadata.button_width_full {
        " className=\"w-full\""
    } else {
        ""
    };
    format!(
        "        <Button type=\"submit\"{class_name}>{}</Button>\n",
        jsx_text(label)
    )
}

/// Derives a PascalCase component identifier from the form name.
pub fn component_name(form_name: &str) -> String {
    let name: String = form_name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    match name.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => name,
        _ => FALLBACK_COMPONENT_NAME.to_string(),
    }
}

/// Prefixes every non-empty line of `block` with `width` spaces.
pub(crate) fn indent_block(block: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_string()
            } else {
                format!("{pad}{line}\n")
            }
        })
        .collect()
}

/// Escapes text placed between JSX tags.
pub(crate) fn jsx_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '{' => out.push_str("{\"{\"}"),
            '}' => out.push_str("{\"}\"}"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes a double-quoted JSX attribute value.
pub(crate) fn jsx_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Returns `value` when set and non-empty.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|value| !value.is_empty())
}

pub(crate) fn push_form_field_open(out: &mut String, key: &str) {
    out.push_str("<FormField\n");
    out.push_str("  control={form.control}\n");
    out.push_str(&format!("  name=\"{key}\"\n"));
    out.push_str("  render={({ field }) => (\n");
}

pub(crate) fn push_form_field_close(out: &mut String) {
    out.push_str("  )}\n");
    out.push_str("/>\n");
}

#[cfg(test)]
mod tests {
    use super::{component_name, indent_block, jsx_attr, jsx_text};

    #[test]
    fn component_name_is_pascal_case() {
        assert_eq!(component_name("My New Form"), "MyNewForm");
        assert_eq!(component_name("signup-form v2"), "SignupFormV2");
    }

    #[test]
    fn component_name_falls_back_for_unusable_names() {
        assert_eq!(component_name(""), "ProfileForm");
        assert_eq!(component_name("2024 survey"), "ProfileForm");
        assert_eq!(component_name("!!!"), "ProfileForm");
    }

    #[test]
    fn jsx_escaping_covers_braces_and_quotes() {
        assert_eq!(jsx_text("a {b} <c>"), "a {\"{\"}b{\"}\"} &lt;c&gt;");
        assert_eq!(jsx_attr("say \"hi\" & go"), "say &quot;hi&quot; &amp; go");
    }

    #[test]
    fn indent_block_pads_non_empty_lines() {
        assert_eq!(indent_block("a\n\n  b\n", 2), "  a\n\n    b\n");
        assert_eq!(indent_block("", 4), "");
    }
}
