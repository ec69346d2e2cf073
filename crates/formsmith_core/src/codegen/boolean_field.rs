//! Boolean field block renderer.

use super::{jsx_text, non_empty, push_form_field_close, push_form_field_open};
use crate::model::field::{BooleanField, BooleanFormat};

fn form_item_class_name(spec: &BooleanField) -> &'static str {
    match (spec.format, spec.as_card) {
        (BooleanFormat::Checkbox, true) => {
            "flex flex-row items-start space-y-0 space-x-3 rounded-md border border-zinc-200 p-4"
        }
        (BooleanFormat::Checkbox, false) => "flex flex-row items-start space-y-0 space-x-2",
        (BooleanFormat::Switch, true) => {
            "flex flex-row items-center justify-between rounded-md border border-zinc-200 p-4"
        }
        (BooleanFormat::Switch, false) => "flex flex-row items-center justify-between",
    }
}

fn push_text_block(out: &mut String, spec: &BooleanField, class_name: &str) {
    out.push_str(&format!("      <div className=\"{class_name}\">\n"));
    if let Some(label) = non_empty(spec.label.as_ref()) {
        out.push_str(&format!("        <FormLabel>{}</FormLabel>\n", jsx_text(label)));
    }
    if let Some(description) = non_empty(spec.description.as_ref()) {
        out.push_str(&format!(
            "        <FormDescription>{}</FormDescription>\n",
            jsx_text(description)
        ));
    }
    out.push_str("      </div>\n");
}

/// Renders the `<FormField>` block of a boolean field.
pub fn generate_boolean_field_source(key: &str, spec: &BooleanField) -> String {
    let mut out = String::new();
    push_form_field_open(&mut out, key);
    out.push_str(&format!(
        "    <FormItem className=\"{}\">\n",
        form_item_class_name(spec)
    ));

    match spec.format {
        BooleanFormat::Checkbox => {
            out.push_str("      <FormControl>\n");
            out.push_str(
                "        <Checkbox checked={field.value} onCheckedChange={field.onChange} />\n",
            );
            out.push_str("      </FormControl>\n");
            push_text_block(&mut out, spec, "space-y-1 leading-none");
        }
        BooleanFormat::Switch => {
            push_text_block(&mut out, spec, "space-y-0.5");
            out.push_str("      <FormControl>\n");
            out.push_str(
                "        <Switch checked={field.value} onCheckedChange={field.onChange} />\n",
            );
            out.push_str("      </FormControl>\n");
        }
    }

    out.push_str("    </FormItem>\n");
    push_form_field_close(&mut out);
    out
}
