use formsmith_core::model::field::{
    BooleanField, BooleanFormat, EnumField, EnumFormat, EnumOption, StringField, StringFormat,
};
use formsmith_core::{
    Field, FieldValidationError, FieldWithIdAndKey, Form, FormMetadata, PlaygroundStore,
    PlaygroundTab, StoreError,
};

fn text_input() -> Field {
    Field::String(StringField {
        format: StringFormat::Input,
        label: Some("Name".to_string()),
        placeholder: None,
        required: true,
        min: None,
        max: None,
        pattern: None,
    })
}

fn checkbox() -> Field {
    Field::Boolean(BooleanField {
        format: BooleanFormat::Checkbox,
        label: None,
        description: None,
        as_card: false,
    })
}

#[test]
fn add_field_assigns_counter_and_never_reuses_ids() {
    let mut store = PlaygroundStore::new();
    assert_eq!(store.next_field_id(), 0);

    let first = store.add_field(text_input()).unwrap();
    assert_eq!(first.id, 0);
    assert_eq!(first.key, "field_0");
    assert_eq!(store.next_field_id(), 1);

    store.remove_field(first.id).unwrap();
    let second = store.add_field(checkbox()).unwrap();
    assert_eq!(second.id, 1);
    assert_eq!(second.key, "field_1");
    assert_eq!(store.next_field_id(), 2);
    assert_eq!(store.fields().len(), 1);
}

#[test]
fn set_field_preserves_identity_and_allows_type_switch() {
    let mut store = PlaygroundStore::new();
    let placed = store.add_field(text_input()).unwrap();

    store.set_field(placed.id, checkbox()).unwrap();
    let updated = store.field(placed.id).unwrap();
    assert_eq!(updated.key, "field_0");
    assert_eq!(updated.field, checkbox());
}

#[test]
fn invalid_field_is_rejected_without_mutation() {
    let mut store = PlaygroundStore::new();
    store.add_field(text_input()).unwrap();
    let revision = store.revision();
    let snapshot = store.form().clone();

    let empty_enum = Field::Enum(EnumField {
        format: EnumFormat::Select,
        label: None,
        placeholder: None,
        options: Vec::new(),
    });
    let err = store.add_field(empty_enum.clone()).unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidField {
            id: None,
            source: FieldValidationError::MissingOptions,
        }
    );
    let err = store.set_field(0, empty_enum).unwrap_err();
    assert_eq!(err.code(), "invalid_field");

    assert_eq!(store.revision(), revision);
    assert_eq!(store.form(), &snapshot);
    assert_eq!(store.next_field_id(), 1);
}

#[test]
fn set_fields_reorders_minted_fields() {
    let mut store = PlaygroundStore::new();
    let first = store.add_field(text_input()).unwrap();
    let second = store.add_field(checkbox()).unwrap();

    store.set_fields(vec![second.clone(), first.clone()]).unwrap();
    let keys = store.fields().iter().map(|field| field.key.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, vec!["field_1", "field_0"]);
}

#[test]
fn set_fields_rejects_unknown_duplicate_and_renamed_entries() {
    let mut store = PlaygroundStore::new();
    let first = store.add_field(text_input()).unwrap();
    let revision = store.revision();

    let unknown = FieldWithIdAndKey::new(7, checkbox());
    assert_eq!(
        store.set_fields(vec![unknown]).unwrap_err(),
        StoreError::UnknownFieldId(7)
    );
    assert_eq!(
        store.set_fields(vec![first.clone(), first.clone()]).unwrap_err(),
        StoreError::DuplicateFieldId(0)
    );

    let mut renamed = first.clone();
    renamed.key = "email".to_string();
    assert_eq!(
        store.set_fields(vec![renamed]).unwrap_err(),
        StoreError::NonCanonicalKey {
            id: 0,
            key: "email".to_string(),
        }
    );
    assert_eq!(store.revision(), revision);
}

#[test]
fn metadata_caps_are_enforced() {
    let mut store = PlaygroundStore::new();
    let metadata = FormMetadata {
        description: "d".repeat(301),
        ..FormMetadata::default()
    };
    let err = store.set_metadata(metadata).unwrap_err();
    assert_eq!(err.code(), "invalid_metadata");

    let metadata = FormMetadata {
        title: "Contact us".to_string(),
        ..FormMetadata::default()
    };
    store.set_metadata(metadata).unwrap();
    assert_eq!(store.metadata().title, "Contact us");

    assert!(store.set_form_name("n".repeat(101)).is_err());
    store.set_form_name("Contact").unwrap();
    assert_eq!(store.form().name, "Contact");
}

#[test]
fn remove_unknown_field_fails() {
    let mut store = PlaygroundStore::new();
    assert_eq!(store.remove_field(3).unwrap_err(), StoreError::FieldNotFound(3));
    assert_eq!(store.revision(), 0);
}

#[test]
fn reset_restores_empty_form_and_counter() {
    let mut store = PlaygroundStore::new();
    store.add_field(text_input()).unwrap();
    store.set_background("sky", 200);
    store.set_show_background(false);
    assert_eq!(store.metadata().background_color, "sky");

    store.reset_form();
    assert_eq!(store.form(), &Form::empty());
    assert_eq!(store.next_field_id(), 0);
}

#[test]
fn load_form_takes_max_of_stored_counter_and_ids() {
    let mut form = Form::empty();
    form.fields = vec![
        FieldWithIdAndKey::new(4, text_input()),
        FieldWithIdAndKey::new(9, checkbox()),
    ];

    let mut store = PlaygroundStore::new();
    store.load_form(form.clone(), Some(3)).unwrap();
    assert_eq!(store.next_field_id(), 10);

    store.load_form(form.clone(), Some(25)).unwrap();
    assert_eq!(store.next_field_id(), 25);

    store.load_form(Form::empty(), None).unwrap();
    assert_eq!(store.next_field_id(), 0);
}

#[test]
fn load_form_rejects_invalid_field_bodies() {
    let mut form = Form::empty();
    form.fields = vec![FieldWithIdAndKey::new(
        0,
        Field::Enum(EnumField {
            format: EnumFormat::Radio,
            label: None,
            placeholder: None,
            options: vec![EnumOption::new("A", "a"), EnumOption::new("B", "a")],
        }),
    )];

    let mut store = PlaygroundStore::new();
    let err = store.load_form(form, None).unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidField {
            id: Some(0),
            source: FieldValidationError::DuplicateOptionValue("a".to_string()),
        }
    );
    assert_eq!(store.revision(), 0);
}

#[test]
fn ui_flags_do_not_count_as_form_revisions() {
    let mut store = PlaygroundStore::new();
    store.set_current_tab(PlaygroundTab::Code);
    store.set_compact_toolbar(true);
    store.set_payload_preview(Some("{}".to_string()));

    assert_eq!(store.revision(), 0);
    let snapshot = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(snapshot["currentTab"], "code");
    assert_eq!(snapshot["compactToolbar"], true);
    assert_eq!(snapshot["payloadPreview"], "{}");
    assert_eq!(snapshot["nextFieldId"], 0);
}
