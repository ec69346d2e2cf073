use formsmith_core::codegen::{default_value_line, field_specific_imports};
use formsmith_core::model::field::{
    BooleanField, BooleanFormat, DateDefault, DateField, DateFormat, DateRange, EnumField,
    EnumFormat, EnumOption, NumberField, NumberFormat, StringField, StringFormat, TimeFormat,
};
use formsmith_core::{
    derive_artifacts, generate_source_code, synthesize_schema, Field, FieldWithIdAndKey, Form,
    FormMetadata,
};
use std::collections::HashSet;

fn string_field(format: StringFormat, label: Option<&str>) -> Field {
    Field::String(StringField {
        format,
        label: label.map(str::to_string),
        placeholder: None,
        required: true,
        min: None,
        max: None,
        pattern: None,
    })
}

fn boolean_field(format: BooleanFormat, as_card: bool) -> Field {
    Field::Boolean(BooleanField {
        format,
        label: Some("Accept terms".to_string()),
        description: None,
        as_card,
    })
}

fn enum_field(format: EnumFormat) -> Field {
    Field::Enum(EnumField {
        format,
        label: Some("Fruit".to_string()),
        placeholder: Some("Pick one".to_string()),
        options: vec![
            EnumOption::new("Apple", "apple"),
            EnumOption::new("Banana", "banana"),
        ],
    })
}

fn date_field(format: DateFormat) -> Field {
    Field::Date(DateField {
        format,
        label: Some("When".to_string()),
        required: true,
        past_enabled: true,
        future_enabled: true,
        time_format: Some(TimeFormat::TwelveHour),
        min_date: None,
        max_date: None,
        default_value: None,
    })
}

fn number_field() -> Field {
    Field::Number(NumberField {
        format: NumberFormat::Input,
        label: Some("Age".to_string()),
        placeholder: None,
        required: true,
        min: None,
        max: None,
        step: None,
    })
}

fn form_with(fields: Vec<Field>) -> Form {
    let mut form = Form::empty();
    form.fields = fields
        .into_iter()
        .enumerate()
        .map(|(index, field)| FieldWithIdAndKey::new(index as u32, field))
        .collect();
    form
}

fn every_combination() -> Vec<Field> {
    vec![
        string_field(StringFormat::Input, Some("Name")),
        string_field(StringFormat::Textarea, Some("Bio")),
        string_field(StringFormat::Email, Some("Email")),
        string_field(StringFormat::Password, Some("Password")),
        string_field(StringFormat::Phone, Some("Phone")),
        enum_field(EnumFormat::Select),
        enum_field(EnumFormat::Combobox),
        enum_field(EnumFormat::Radio),
        boolean_field(BooleanFormat::Checkbox, false),
        boolean_field(BooleanFormat::Switch, true),
        number_field(),
        date_field(DateFormat::Date),
        date_field(DateFormat::Time),
        date_field(DateFormat::Datetime),
        date_field(DateFormat::Range),
    ]
}

fn defaults_block(source: &str) -> &str {
    let start = source
        .find("defaultValues: {")
        .expect("defaults block should exist");
    let end = source[start..]
        .find("    },")
        .expect("defaults block should close");
    &source[start..start + end]
}

#[test]
fn default_block_lists_every_non_radio_field_once() {
    let form = form_with(every_combination());
    let source = derive_artifacts(&form).source_code;
    let block = defaults_block(&source);

    for field in &form.fields {
        let occurrences = block.matches(&format!("{}:", field.key)).count();
        let expected = match &field.field {
            Field::Enum(spec) if spec.format == EnumFormat::Radio => 0,
            Field::Number(_) => 0,
            _ => 1,
        };
        assert_eq!(occurrences, expected, "key {}", field.key);
    }
    assert!(block.contains("field_8: false,"));
    assert!(block.contains(r#"field_14: { start: "", end: "" },"#));
}

#[test]
fn email_and_switch_scenario_imports() {
    let form = form_with(vec![
        string_field(StringFormat::Email, None),
        boolean_field(BooleanFormat::Switch, true),
    ]);
    let source = derive_artifacts(&form).source_code;

    let input_imports = source
        .lines()
        .filter(|line| line.contains(r#"from "@/components/ui/input""#))
        .count();
    let switch_imports = source
        .lines()
        .filter(|line| line.contains(r#"from "@/components/ui/switch""#))
        .count();
    assert_eq!(input_imports, 1);
    assert_eq!(switch_imports, 1);
    assert!(defaults_block(&source).contains(r#"field_0: "","#));
    assert!(defaults_block(&source).contains("field_1: false,"));
}

#[test]
fn import_lines_are_never_duplicated() {
    let mut fields = every_combination();
    fields.extend(every_combination());
    let form = form_with(fields);
    let source = derive_artifacts(&form).source_code;

    let imports = source
        .lines()
        .filter(|line| line.starts_with("import "))
        .collect::<Vec<_>>();
    let unique = imports.iter().collect::<HashSet<_>>();
    assert_eq!(imports.len(), unique.len());

    let field_imports = field_specific_imports(&form.fields);
    assert_eq!(
        field_imports.first().copied(),
        Some(r#"import { Input } from "@/components/ui/input";"#)
    );
}

#[test]
fn sections_appear_in_fixed_order() {
    let form = form_with(vec![enum_field(EnumFormat::Combobox)]);
    let schema = synthesize_schema(&form.fields);
    let source = generate_source_code(&form, &schema.source_text, &schema.default_values);

    let pragma = source.find("\"use client\";").expect("pragma");
    let imports = source.find("import { z }").expect("imports");
    let options = source.find("const field_0Options = [").expect("options array");
    let declaration = source.find("const formSchema = z.object({").expect("schema");
    let component = source.find("export function MyNewForm() {").expect("component");
    let button = source.find("<Button type=\"submit\">Submit</Button>").expect("button");
    assert!(pragma < imports);
    assert!(imports < options);
    assert!(options < declaration);
    assert!(declaration < component);
    assert!(component < button);
    assert!(source.ends_with("    </Form>\n  );\n}\n"));
    assert!(source.contains(r#"  { label: "Apple", value: "apple" },"#));
    assert!(source.contains("field_0Options.find((option) => option.value === field.value)"));
}

#[test]
fn generation_is_byte_identical_for_same_input() {
    let form = form_with(every_combination());
    assert_eq!(
        derive_artifacts(&form).source_code,
        derive_artifacts(&form).source_code
    );
}

#[test]
fn empty_labels_are_suppressed() {
    let form = form_with(vec![
        string_field(StringFormat::Input, None),
        string_field(StringFormat::Input, Some("")),
    ]);
    let source = derive_artifacts(&form).source_code;
    assert!(!source.contains("<FormLabel>"));
    assert!(!source.contains("placeholder="));
}

#[test]
fn metadata_block_and_button_follow_metadata() {
    let mut form = form_with(vec![string_field(StringFormat::Input, Some("Name"))]);
    form.metadata = FormMetadata {
        title: "Sign {up} <now>".to_string(),
        description: String::new(),
        submit_button_label: "Send it".to_string(),
        button_width_full: true,
        ..FormMetadata::default()
    };
    let source = derive_artifacts(&form).source_code;

    assert!(source.contains(r#"Sign {"{"}up{"}"} &lt;now&gt;</h1>"#));
    assert!(!source.contains("text-zinc-500"));
    assert!(source.contains(r#"<Button type="submit" className="w-full">Send it</Button>"#));

    form.metadata.title = String::new();
    let without_metadata = derive_artifacts(&form).source_code;
    assert!(!without_metadata.contains("<h1"));
}

#[test]
fn component_name_derives_from_form_name() {
    let mut form = form_with(Vec::new());
    form.name = "customer feedback".to_string();
    assert!(derive_artifacts(&form)
        .source_code
        .contains("export function CustomerFeedback() {"));

    form.name = "  ".to_string();
    assert!(derive_artifacts(&form)
        .source_code
        .contains("export function ProfileForm() {"));
}

#[test]
fn boolean_formats_use_their_own_widget() {
    let form = form_with(vec![
        boolean_field(BooleanFormat::Checkbox, false),
        boolean_field(BooleanFormat::Switch, false),
    ]);
    let source = derive_artifacts(&form).source_code;
    assert_eq!(source.matches("<Checkbox ").count(), 1);
    assert_eq!(source.matches("<Switch ").count(), 1);
    assert!(source.contains(r#"import { Checkbox } from "@/components/ui/checkbox";"#));
}

#[test]
fn number_fields_render_nothing() {
    let form = form_with(vec![number_field()]);
    let source = derive_artifacts(&form).source_code;
    assert!(!source.contains("field_0"));
}

#[test]
fn date_pickers_follow_format() {
    let form = form_with(vec![
        date_field(DateFormat::Time),
        date_field(DateFormat::Range),
    ]);
    let source = derive_artifacts(&form).source_code;
    assert!(source.contains("<TimePicker"));
    assert!(source.contains(r#"timeFormat="12h""#));
    assert!(source.contains("<RangeDatePicker"));
    assert!(source.contains(r#"form.setValue("field_1", r ?"#));
}

#[test]
fn malformed_range_default_degrades_to_empty_range() {
    let field = FieldWithIdAndKey::new(
        3,
        Field::Date(DateField {
            format: DateFormat::Range,
            label: None,
            required: false,
            past_enabled: true,
            future_enabled: true,
            time_format: None,
            min_date: None,
            max_date: None,
            default_value: Some(DateDefault::Range(DateRange::default())),
        }),
    );
    // Defaults synthesized for a different field list: no entry for field_3.
    let unrelated = synthesize_schema(&[]).default_values;
    assert_eq!(
        default_value_line(&field, &unrelated).as_deref(),
        Some(r#"field_3: { start: "", end: "" },"#)
    );
}
