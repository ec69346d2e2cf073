//! String field block renderer.

use super::{jsx_attr, jsx_text, non_empty, push_form_field_close, push_form_field_open};
use crate::model::field::{StringField, StringFormat};

fn input_component_source(spec: &StringField) -> String {
    let placeholder = non_empty(spec.placeholder.as_ref())
        .map(|placeholder| format!(" placeholder=\"{}\"", jsx_attr(placeholder)))
        .unwrap_or_default();

    match spec.format {
        StringFormat::Input => format!("<Input{placeholder} {{...field}} />"),
        StringFormat::Email => format!("<Input type=\"email\"{placeholder} {{...field}} />"),
        StringFormat::Password => format!("<Input type=\"password\"{placeholder} {{...field}} />"),
        StringFormat::Textarea => format!("<Textarea{placeholder} {{...field}} />"),
        StringFormat::Phone => {
            format!("<PhoneInput{placeholder} defaultCountry=\"US\" {{...field}} />")
        }
    }
}

/// Renders the `<FormField>` block of a string field.
pub fn generate_string_field_source(key: &str, spec: &StringField) -> String {
    let mut out = String::new();
    push_form_field_open(&mut out, key);
    out.push_str("    <FormItem>\n");
    if let Some(label) = non_empty(spec.label.as_ref()) {
        out.push_str(&format!("      <FormLabel>{}</FormLabel>\n", jsx_text(label)));
    }
    out.push_str("      <FormControl>\n");
    out.push_str("        ");
    out.push_str(&input_component_source(spec));
    out.push('\n');
    out.push_str("      </FormControl>\n");
    out.push_str("      <FormMessage />\n");
    out.push_str("    </FormItem>\n");
    push_form_field_close(&mut out);
    out
}
