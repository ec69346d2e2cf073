//! Date field block renderer.

use super::{jsx_text, non_empty, push_form_field_close, push_form_field_open};
use crate::model::field::{DateField, DateFormat, TimeFormat};

fn picker_source(key: &str, spec: &DateField) -> String {
    let time_format = spec
        .time_format
        .unwrap_or(TimeFormat::TwentyFourHour)
        .as_str();

    match spec.format {
        DateFormat::Date => format!(
            "        <DatePicker\n\
             \x20         mode=\"single\"\n\
             \x20         value={{field.value ? new Date(field.value) : undefined}}\n\
             \x20         onValueChange={{(d) => form.setValue(\"{key}\", d ? d.toISOString().slice(0, 10) : \"\")}}\n\
             \x20       />\n"
        ),
        DateFormat::Time => format!(
            "        <TimePicker\n\
             \x20         value={{field.value}}\n\
             \x20         onValueChange={{(v) => form.setValue(\"{key}\", v)}}\n\
             \x20         timeFormat=\"{time_format}\"\n\
             \x20       />\n"
        ),
        DateFormat::Datetime => format!(
            "        <DateTimePicker\n\
             \x20         value={{field.value ? new Date(field.value) : undefined}}\n\
             \x20         onValueChange={{(d) => form.setValue(\"{key}\", d ? d.toISOString() : \"\")}}\n\
             \x20         timeFormat=\"{time_format}\"\n\
             \x20       />\n"
        ),
        DateFormat::Range => format!(
            "        <RangeDatePicker\n\
             \x20         value={{field.value}}\n\
             \x20         onValueChange={{(r) => form.setValue(\"{key}\", r ? {{ start: r.from?.toISOString().slice(0, 10) ?? \"\", end: r.to?.toISOString().slice(0, 10) ?? \"\" }} : {{ start: \"\", end: \"\" }})}}\n\
             \x20       />\n"
        ),
    }
}

/// Renders the `<FormField>` block of a date field.
pub fn generate_date_field_source(key: &str, spec: &DateField) -> String {
    let mut out = String::new();
    push_form_field_open(&mut out, key);
    out.push_str("    <FormItem>\n");
    if let Some(label) = non_empty(spec.label.as_ref()) {
        out.push_str(&format!("      <FormLabel>{}</FormLabel>\n", jsx_text(label)));
    }
    out.push_str("      <FormControl>\n");
    out.push_str(&picker_source(key, spec));
    out.push_str("      </FormControl>\n");
    out.push_str("      <FormMessage />\n");
    out.push_str("    </FormItem>\n");
    push_form_field_close(&mut out);
    out
}
