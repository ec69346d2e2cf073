//! Explicit state container for the form being built.
//!
//! # Responsibility
//! - Hold the working form, the monotonic field-id counter and UI flags.
//! - Validate every incoming field and metadata value before accepting it.
//!
//! # Invariants
//! - Field ids are minted from `next_field_id` and never reused within a
//!   session; keys are always `field_<id>`.
//! - Every mutation replaces a whole field, field list or metadata value.
//! - A failed mutation leaves state and `revision` untouched.
//!
//! # See also
//! - service/autosave.rs (persists the form on a debounced schedule)

use crate::model::field::{Field, FieldId, FieldValidationError, FieldWithIdAndKey};
use crate::model::form::{Form, FormMetadata, MetadataValidationError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    InvalidField {
        id: Option<FieldId>,
        source: FieldValidationError,
    },
    InvalidMetadata(MetadataValidationError),
    FieldNotFound(FieldId),
    /// Id was never minted by this store.
    UnknownFieldId(FieldId),
    DuplicateFieldId(FieldId),
    NonCanonicalKey {
        id: FieldId,
        key: String,
    },
    IdSpaceExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField {
                id: Some(id),
                source,
            } => write!(f, "invalid field {id}: {source}"),
            Self::InvalidField { id: None, source } => write!(f, "invalid field: {source}"),
            Self::InvalidMetadata(err) => write!(f, "invalid metadata: {err}"),
            Self::FieldNotFound(id) => write!(f, "field not found: {id}"),
            Self::UnknownFieldId(id) => write!(f, "field id {id} was never assigned"),
            Self::DuplicateFieldId(id) => write!(f, "field id {id} appears more than once"),
            Self::NonCanonicalKey { id, key } => {
                write!(f, "field {id} has key `{key}`, expected `field_{id}`")
            }
            Self::IdSpaceExhausted => write!(f, "field id counter exhausted"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField { source, .. } => Some(source),
            Self::InvalidMetadata(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MetadataValidationError> for StoreError {
    fn from(value: MetadataValidationError) -> Self {
        Self::InvalidMetadata(value)
    }
}

impl StoreError {
    /// Stable machine-readable code for envelopes and log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidField { .. } => "invalid_field",
            Self::InvalidMetadata(_) => "invalid_metadata",
            Self::FieldNotFound(_) => "field_not_found",
            Self::UnknownFieldId(_) => "unknown_field_id",
            Self::DuplicateFieldId(_) => "duplicate_field_id",
            Self::NonCanonicalKey { .. } => "non_canonical_key",
            Self::IdSpaceExhausted => "id_space_exhausted",
        }
    }
}

/// Pane shown by the playground.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaygroundTab {
    #[default]
    Form,
    Code,
}

/// Serializable view of the whole store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundSnapshot {
    pub form: Form,
    pub next_field_id: FieldId,
    pub revision: u64,
    pub current_tab: PlaygroundTab,
    pub compact_toolbar: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundStore {
    form: Form,
    next_field_id: FieldId,
    revision: u64,
    current_tab: PlaygroundTab,
    compact_toolbar: bool,
    payload_preview: Option<String>,
}

impl Default for PlaygroundStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaygroundStore {
    /// Empty form, counter at 0.
    pub fn new() -> Self {
        Self {
            form: Form::empty(),
            next_field_id: 0,
            revision: 0,
            current_tab: PlaygroundTab::default(),
            compact_toolbar: false,
            payload_preview: None,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn fields(&self) -> &[FieldWithIdAndKey] {
        &self.form.fields
    }

    pub fn metadata(&self) -> &FormMetadata {
        &self.form.metadata
    }

    pub fn next_field_id(&self) -> FieldId {
        self.next_field_id
    }

    /// Count of successful form mutations since construction.
    ///
    /// UI flag changes do not count; they are not part of the saved form.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldWithIdAndKey> {
        self.form.fields.iter().find(|field| field.id == id)
    }

    pub fn current_tab(&self) -> PlaygroundTab {
        self.current_tab
    }

    pub fn compact_toolbar(&self) -> bool {
        self.compact_toolbar
    }

    pub fn payload_preview(&self) -> Option<&str> {
        self.payload_preview.as_deref()
    }

    pub fn snapshot(&self) -> PlaygroundSnapshot {
        PlaygroundSnapshot {
            form: self.form.clone(),
            next_field_id: self.next_field_id,
            revision: self.revision,
            current_tab: self.current_tab,
            compact_toolbar: self.compact_toolbar,
            payload_preview: self.payload_preview.clone(),
        }
    }

    /// Appends `field` under a freshly minted id and returns the placed field.
    pub fn add_field(&mut self, field: Field) -> StoreResult<FieldWithIdAndKey> {
        if let Err(source) = field.validate() {
            return Err(rejected("add_field", StoreError::InvalidField { id: None, source }));
        }
        let id = self.next_field_id;
        let next = id
            .checked_add(1)
            .ok_or_else(|| rejected("add_field", StoreError::IdSpaceExhausted))?;

        let placed = FieldWithIdAndKey::new(id, field);
        self.form.fields.push(placed.clone());
        self.next_field_id = next;
        self.touch();

        debug!(
            "event=store_add_field module=store status=ok field_id={} field_type={} format={} revision={}",
            id,
            placed.field_type(),
            placed.format_name(),
            self.revision
        );
        Ok(placed)
    }

    pub fn remove_field(&mut self, id: FieldId) -> StoreResult<()> {
        let Some(index) = self.form.fields.iter().position(|field| field.id == id) else {
            return Err(rejected("remove_field", StoreError::FieldNotFound(id)));
        };
        self.form.fields.remove(index);
        self.touch();

        debug!(
            "event=store_remove_field module=store status=ok field_id={} revision={}",
            id, self.revision
        );
        Ok(())
    }

    /// Replaces the body of field `id`; its id and key are preserved.
    ///
    /// The field type may change (the editor's type switch does this).
    pub fn set_field(&mut self, id: FieldId, field: Field) -> StoreResult<()> {
        if let Err(source) = field.validate() {
            return Err(rejected(
                "set_field",
                StoreError::InvalidField {
                    id: Some(id),
                    source,
                },
            ));
        }
        let Some(slot) = self.form.fields.iter_mut().find(|slot| slot.id == id) else {
            return Err(rejected("set_field", StoreError::FieldNotFound(id)));
        };
        slot.field = field;
        self.touch();

        debug!(
            "event=store_set_field module=store status=ok field_id={} revision={}",
            id, self.revision
        );
        Ok(())
    }

    /// Replaces the whole field list (reorder, bulk edit, removal).
    ///
    /// Every entry must carry an id minted by this store, its canonical key
    /// and a valid body; ids may not repeat.
    pub fn set_fields(&mut self, fields: Vec<FieldWithIdAndKey>) -> StoreResult<()> {
        if let Err(err) = check_field_list(&fields, Some(self.next_field_id)) {
            return Err(rejected("set_fields", err));
        }
        self.form.fields = fields;
        self.touch();

        debug!(
            "event=store_set_fields module=store status=ok fields={} revision={}",
            self.form.fields.len(),
            self.revision
        );
        Ok(())
    }

    pub fn set_metadata(&mut self, metadata: FormMetadata) -> StoreResult<()> {
        if let Err(err) = metadata.validate() {
            return Err(rejected("set_metadata", err.into()));
        }
        self.form.metadata = metadata;
        self.touch();

        debug!(
            "event=store_set_metadata module=store status=ok revision={}",
            self.revision
        );
        Ok(())
    }

    /// Renames the form. The name feeds the generated component name.
    pub fn set_form_name(&mut self, name: impl Into<String>) -> StoreResult<()> {
        let candidate = Form {
            name: name.into(),
            metadata: self.form.metadata.clone(),
            fields: Vec::new(),
        };
        if let Err(err) = candidate.validate() {
            return Err(rejected("set_form_name", err.into()));
        }
        self.form.name = candidate.name;
        self.touch();
        Ok(())
    }

    pub fn set_background(&mut self, color: impl Into<String>, shade: u32) {
        self.form.metadata.background_color = color.into();
        self.form.metadata.background_shade = shade;
        self.touch();
    }

    pub fn set_show_background(&mut self, show: bool) {
        self.form.metadata.show_background = show;
        self.touch();
    }

    /// Back to the empty form with the counter at 0.
    pub fn reset_form(&mut self) {
        self.form = Form::empty();
        self.next_field_id = 0;
        self.payload_preview = None;
        self.touch();

        debug!(
            "event=store_reset module=store status=ok revision={}",
            self.revision
        );
    }

    /// Replaces the working form with a restored one.
    ///
    /// The counter becomes `max(stored_counter, max id + 1)` so restored ids
    /// are never minted again.
    pub fn load_form(&mut self, form: Form, stored_counter: Option<FieldId>) -> StoreResult<()> {
        if let Err(err) = check_form(&form) {
            return Err(rejected("load_form", err));
        }

        let after_max_id = match form.fields.iter().map(|field| field.id).max() {
            Some(max_id) => max_id
                .checked_add(1)
                .ok_or_else(|| rejected("load_form", StoreError::IdSpaceExhausted))?,
            None => 0,
        };

        self.next_field_id = stored_counter.unwrap_or(0).max(after_max_id);
        self.form = form;
        self.payload_preview = None;
        self.touch();

        debug!(
            "event=store_load module=store status=ok fields={} next_field_id={} revision={}",
            self.form.fields.len(),
            self.next_field_id,
            self.revision
        );
        Ok(())
    }

    pub fn set_current_tab(&mut self, tab: PlaygroundTab) {
        self.current_tab = tab;
    }

    pub fn set_compact_toolbar(&mut self, compact: bool) {
        self.compact_toolbar = compact;
    }

    pub fn set_payload_preview(&mut self, preview: Option<String>) {
        self.payload_preview = preview;
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Checks a whole form as the store would accept it on load: metadata caps
/// plus every rule of [`check_field_list`].
pub fn check_form(form: &Form) -> StoreResult<()> {
    form.validate()?;
    check_field_list(&form.fields, None)
}

/// Checks id uniqueness, key derivation, body validity and (when `minted_below`
/// is set) that every id was already assigned.
pub fn check_field_list(
    fields: &[FieldWithIdAndKey],
    minted_below: Option<FieldId>,
) -> StoreResult<()> {
    let mut seen: Vec<FieldId> = Vec::with_capacity(fields.len());
    for field in fields {
        if minted_below.is_some_and(|limit| field.id >= limit) {
            return Err(StoreError::UnknownFieldId(field.id));
        }
        if seen.contains(&field.id) {
            return Err(StoreError::DuplicateFieldId(field.id));
        }
        if !field.has_canonical_key() {
            return Err(StoreError::NonCanonicalKey {
                id: field.id,
                key: field.key.clone(),
            });
        }
        field
            .field
            .validate()
            .map_err(|source| StoreError::InvalidField {
                id: Some(field.id),
                source,
            })?;
        seen.push(field.id);
    }
    Ok(())
}

fn rejected(operation: &'static str, err: StoreError) -> StoreError {
    warn!(
        "event=store_{} module=store status=error error_code={}",
        operation,
        err.code()
    );
    err
}

#[cfg(test)]
mod tests {
    use super::{check_field_list, StoreError};
    use crate::model::field::{BooleanField, BooleanFormat, Field, FieldWithIdAndKey};

    fn switch() -> Field {
        Field::Boolean(BooleanField {
            format: BooleanFormat::Switch,
            label: None,
            description: None,
            as_card: false,
        })
    }

    #[test]
    fn field_list_check_reports_first_violation() {
        let fields = vec![
            FieldWithIdAndKey::new(0, switch()),
            FieldWithIdAndKey::new(0, switch()),
        ];
        assert_eq!(
            check_field_list(&fields, None),
            Err(StoreError::DuplicateFieldId(0))
        );
        assert_eq!(
            check_field_list(&fields[..1], Some(0)),
            Err(StoreError::UnknownFieldId(0))
        );
    }
}
