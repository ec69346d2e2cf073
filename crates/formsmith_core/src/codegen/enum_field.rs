//! Enum field block renderers (select, radio group, combobox).

use super::{jsx_attr, jsx_text, non_empty, push_form_field_close, push_form_field_open};
use crate::model::field::{EnumField, EnumFormat};
use crate::schema::node::json_string;

/// Name of the module-level option array a combobox field iterates.
pub fn combobox_options_name(key: &str) -> String {
    format!("{key}Options")
}

/// Renders `const {key}Options = [ ... ] as const;` for a combobox field.
pub fn generate_combobox_static_array(key: &str, spec: &EnumField) -> String {
    let mut out = format!("const {} = [\n", combobox_options_name(key));
    for option in &spec.options {
        out.push_str(&format!(
            "  {{ label: {}, value: {} }},\n",
            json_string(&option.label),
            json_string(&option.value)
        ));
    }
    out.push_str("] as const;\n");
    out
}

/// Renders the `<FormField>` block of an enum field.
pub fn generate_enum_field_source(key: &str, spec: &EnumField) -> String {
    let mut out = String::new();
    push_form_field_open(&mut out, key);
    match spec.format {
        EnumFormat::Select => push_select(&mut out, spec),
        EnumFormat::Radio => push_radio(&mut out, spec),
        EnumFormat::Combobox => push_combobox(&mut out, key, spec),
    }
    push_form_field_close(&mut out);
    out
}

fn push_label(out: &mut String, spec: &EnumField) {
    if let Some(label) = non_empty(spec.label.as_ref()) {
        out.push_str(&format!("      <FormLabel>{}</FormLabel>\n", jsx_text(label)));
    }
}

fn placeholder_text(spec: &EnumField, fallback: &str) -> String {
    non_empty(spec.placeholder.as_ref())
        .unwrap_or(fallback)
        .to_string()
}

fn push_select(out: &mut String, spec: &EnumField) {
    out.push_str("    <FormItem>\n");
    push_label(out, spec);
    out.push_str("      <Select onValueChange={field.onChange} defaultValue={field.value}>\n");
    out.push_str("        <FormControl>\n");
    out.push_str("          <SelectTrigger>\n");
    match non_empty(spec.placeholder.as_ref()) {
        Some(placeholder) => out.push_str(&format!(
            "            <SelectValue placeholder=\"{}\" />\n",
            jsx_attr(placeholder)
        )),
        None => out.push_str("            <SelectValue />\n"),
    }
    out.push_str("          </SelectTrigger>\n");
    out.push_str("        </FormControl>\n");
    out.push_str("        <SelectContent>\n");
    for option in &spec.options {
        out.push_str(&format!(
            "          <SelectItem value=\"{}\">{}</SelectItem>\n",
            jsx_attr(&option.value),
            jsx_text(&option.label)
        ));
    }
    out.push_str("        </SelectContent>\n");
    out.push_str("      </Select>\n");
    out.push_str("      <FormMessage />\n");
    out.push_str("    </FormItem>\n");
}

fn push_radio(out: &mut String, spec: &EnumField) {
    out.push_str("    <FormItem className=\"space-y-3\">\n");
    push_label(out, spec);
    out.push_str("      <FormControl>\n");
    out.push_str("        <RadioGroup\n");
    out.push_str("          onValueChange={field.onChange}\n");
    out.push_str("          defaultValue={field.value}\n");
    out.push_str("          className=\"flex flex-col space-y-1\"\n");
    out.push_str("        >\n");
    for option in &spec.options {
        out.push_str("          <FormItem className=\"flex items-center space-x-3 space-y-0\">\n");
        out.push_str("            <FormControl>\n");
        out.push_str(&format!(
            "              <RadioGroupItem value=\"{}\" />\n",
            jsx_attr(&option.value)
        ));
        out.push_str("            </FormControl>\n");
        out.push_str(&format!(
            "            <FormLabel className=\"font-normal\">{}</FormLabel>\n",
            jsx_text(&option.label)
        ));
        out.push_str("          </FormItem>\n");
    }
    out.push_str("        </RadioGroup>\n");
    out.push_str("      </FormControl>\n");
    out.push_str("      <FormMessage />\n");
    out.push_str("    </FormItem>\n");
}

fn push_combobox(out: &mut String, key: &str, spec: &EnumField) {
    let options_name = combobox_options_name(key);
    let placeholder = placeholder_text(spec, "Select an option");

    out.push_str("    <FormItem className=\"flex flex-col\">\n");
    push_label(out, spec);
    out.push_str("      <Popover>\n");
    out.push_str("        <PopoverTrigger asChild>\n");
    out.push_str("          <FormControl>\n");
    out.push_str("            <Button\n");
    out.push_str("              variant=\"outline\"\n");
    out.push_str("              role=\"combobox\"\n");
    out.push_str(
        "              className={cn(\"w-full justify-between\", !field.value && \"text-muted-foreground\")}\n",
    );
    out.push_str("            >\n");
    out.push_str("              {field.value\n");
    out.push_str(&format!(
        "                ? {options_name}.find((option) => option.value === field.value)?.label\n"
    ));
    out.push_str(&format!("                : {}}}\n", json_string(&placeholder)));
    out.push_str("              <ChevronsUpDown className=\"ml-2 h-4 w-4 shrink-0 opacity-50\" />\n");
    out.push_str("            </Button>\n");
    out.push_str("          </FormControl>\n");
    out.push_str("        </PopoverTrigger>\n");
    out.push_str("        <PopoverContent className=\"w-full p-0\">\n");
    out.push_str("          <Command>\n");
    out.push_str(&format!(
        "            <CommandInput placeholder=\"{}\" />\n",
        jsx_attr(&placeholder)
    ));
    out.push_str("            <CommandList>\n");
    out.push_str("              <CommandEmpty>No option found.</CommandEmpty>\n");
    out.push_str("              <CommandGroup>\n");
    out.push_str(&format!("                {{{options_name}.map((option) => (\n"));
    out.push_str("                  <CommandItem\n");
    out.push_str("                    value={option.label}\n");
    out.push_str("                    key={option.value}\n");
    out.push_str("                    onSelect={() => {\n");
    out.push_str(&format!(
        "                      form.setValue(\"{key}\", option.value);\n"
    ));
    out.push_str("                    }}\n");
    out.push_str("                  >\n");
    out.push_str("                    <Check\n");
    out.push_str(
        "                      className={cn(\"mr-2 h-4 w-4\", option.value === field.value ? \"opacity-100\" : \"opacity-0\")}\n",
    );
    out.push_str("                    />\n");
    out.push_str("                    {option.label}\n");
    out.push_str("                  </CommandItem>\n");
    out.push_str("                ))}\n");
    out.push_str("              </CommandGroup>\n");
    out.push_str("            </CommandList>\n");
    out.push_str("          </Command>\n");
    out.push_str("        </PopoverContent>\n");
    out.push_str("      </Popover>\n");
    out.push_str("      <FormMessage />\n");
    out.push_str("    </FormItem>\n");
}

#[cfg(test)]
mod tests {
    use super::{generate_combobox_static_array, generate_enum_field_source};
    use crate::model::field::{EnumField, EnumFormat, EnumOption};

    fn fruit(format: EnumFormat) -> EnumField {
        EnumField {
            format,
            label: Some("Fruit".to_string()),
            placeholder: None,
            options: vec![
                EnumOption::new("Apple", "apple"),
                EnumOption::new("Say \"hi\"", "quote"),
            ],
        }
    }

    #[test]
    fn combobox_array_escapes_literals() {
        let array = generate_combobox_static_array("field_3", &fruit(EnumFormat::Combobox));
        assert!(array.starts_with("const field_3Options = [\n"));
        assert!(array.contains(r#"{ label: "Say \"hi\"", value: "quote" },"#));
        assert!(array.ends_with("] as const;\n"));
    }

    #[test]
    fn select_without_placeholder_emits_bare_value() {
        let block = generate_enum_field_source("field_1", &fruit(EnumFormat::Select));
        assert!(block.contains("<SelectValue />"));
        assert!(block.contains(r#"<SelectItem value="apple">Apple</SelectItem>"#));
    }

    #[test]
    fn radio_lists_every_option() {
        let block = generate_enum_field_source("field_2", &fruit(EnumFormat::Radio));
        assert_eq!(block.matches("<RadioGroupItem").count(), 2);
        assert!(block.contains(r#"<RadioGroupItem value="quote" />"#));
    }
}
