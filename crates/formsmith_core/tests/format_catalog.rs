use formsmith_core::{
    field_sections, find_template, formats_for, formats_for_type_name, is_format_allowed,
    FieldType,
};

#[test]
fn every_type_has_catalog_entries_in_order() {
    let names = |field_type| {
        formats_for(field_type)
            .iter()
            .map(|option| option.format)
            .collect::<Vec<_>>()
    };

    assert_eq!(
        names(FieldType::String),
        vec!["email", "input", "password", "textarea", "phone"]
    );
    assert_eq!(names(FieldType::Enum), vec!["select", "combobox", "radio"]);
    assert_eq!(names(FieldType::Boolean), vec!["checkbox", "switch"]);
    assert_eq!(names(FieldType::Number), vec!["input", "slider"]);
    assert_eq!(names(FieldType::Date), vec!["date", "time", "datetime", "range"]);
}

#[test]
fn labels_match_picker_text() {
    assert_eq!(formats_for(FieldType::Number)[0].label, "Numeric");
    assert_eq!(formats_for(FieldType::Date)[3].label, "Date range picker");
    assert_eq!(formats_for_type_name("enum")[2].label, "Radio group");
}

#[test]
fn unknown_type_names_have_no_formats() {
    assert!(formats_for_type_name("color").is_empty());
    assert!(!is_format_allowed(FieldType::Boolean, "radio"));
    assert!(is_format_allowed(FieldType::Date, "range"));
}

#[test]
fn palette_has_one_section_per_type() {
    let sections = field_sections();
    let names = sections
        .iter()
        .map(|section| section.section_name)
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "String fields",
            "Enum fields",
            "Boolean fields",
            "Number fields",
            "Date fields"
        ]
    );
}

#[test]
fn every_palette_template_is_valid_and_allowed() {
    for section in field_sections() {
        for template in &section.templates {
            let field = &template.field;
            assert_eq!(field.field_type(), section.field_type, "{}", template.title);
            assert!(
                is_format_allowed(section.field_type, field.format_name()),
                "{} uses a format outside the catalog",
                template.title
            );
            field
                .validate()
                .unwrap_or_else(|err| panic!("{} is invalid: {err}", template.title));
        }
        assert_eq!(
            section.templates.len(),
            formats_for(section.field_type).len(),
            "{} should cover every format",
            section.section_name
        );
    }
}

#[test]
fn find_template_matches_wire_names() {
    let template = find_template(" enum ", "radio").expect("radio template should exist");
    assert_eq!(template.field.format_name(), "radio");
    assert!(find_template("enum", "slider").is_none());
    assert!(find_template("color", "input").is_none());
}
