//! FFI use-case API for the Flutter playground shell.
//!
//! # Responsibility
//! - Expose the form-builder session (store, artifacts, autosave) to Dart
//!   via FRB as sync calls with JSON payloads.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One process-wide session lives behind a `Mutex`; every call locks it
//!   once and releases it before returning.
//! - Structured values cross the boundary as JSON strings inside envelopes.

use formsmith_core::db::{open_db, Connection};
use formsmith_core::{
    core_version as core_version_inner, derive_artifacts, field_sections, find_template,
    formats_for_type_name, init_logging as init_logging_inner, ping as ping_inner,
    preview_submission, AutoSaveOutcome, AutoSaveService, AutoSaveState, Field,
    FieldWithIdAndKey, FormMetadata, PlaygroundStore, SqliteFormRepository, StoreError,
};
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{Duration, Instant};

const PLAYGROUND_DB_FILE_NAME: &str = "formsmith_playground.sqlite3";
const DB_PATH_ENV: &str = "FORMSMITH_DB_PATH";
const AUTOSAVE_DELAY_ENV: &str = "FORMSMITH_AUTOSAVE_DELAY_MS";

static PLAYGROUND_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static AUTOSAVE_DELAY: OnceLock<Duration> = OnceLock::new();
static SESSION: OnceLock<Mutex<PlaygroundSession>> = OnceLock::new();

struct PlaygroundSession {
    store: PlaygroundStore,
    autosave: AutoSaveState,
    conn: Option<Connection>,
}

impl PlaygroundSession {
    fn new() -> Self {
        Self {
            store: PlaygroundStore::new(),
            autosave: AutoSaveState::new(resolve_autosave_delay()),
            conn: None,
        }
    }

    /// Restarts the debounce after a store mutation.
    fn note_mutation(&mut self) {
        self.autosave
            .note_revision(self.store.revision(), Instant::now());
    }
}

/// Opens the storage connection on first use and returns it.
fn ensure_storage(slot: &mut Option<Connection>) -> Result<&Connection, String> {
    if slot.is_none() {
        let path = resolve_playground_db_path();
        let conn = open_db(&path).map_err(|err| format!("storage open failed: {err}"))?;
        *slot = Some(conn);
    }
    slot.as_ref()
        .ok_or_else(|| "storage unavailable".to_string())
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; conflicting calls return an
///   error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic envelope for playground calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundResponse {
    pub ok: bool,
    /// Stable machine-readable code on failure (`invalid_field`, ...).
    pub error_code: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
    /// JSON payload on success; shape documented per function.
    pub payload_json: Option<String>,
}

impl PlaygroundResponse {
    fn success(message: impl Into<String>, payload_json: Option<String>) -> Self {
        Self {
            ok: true,
            error_code: None,
            message: message.into(),
            payload_json,
        }
    }

    fn failure(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error_code: Some(error_code.to_string()),
            message: message.into(),
            payload_json: None,
        }
    }

    fn from_store_error(operation: &str, err: &StoreError) -> Self {
        Self::failure(err.code(), format!("{operation} failed: {err}"))
    }
}

/// Generated artifacts of the current form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactsResponse {
    pub ok: bool,
    pub message: String,
    /// `const formSchema = z.object({ ... });`
    pub schema_source: String,
    /// Complete component source document.
    pub source_code: String,
    /// Default values keyed by field key.
    pub default_values_json: String,
    /// One line per skipped field or dropped check.
    pub diagnostics: Vec<String>,
}

/// One validation failure of a preview submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionIssueItem {
    /// Dotted key path (`field_3.start`).
    pub path: String,
    pub message: String,
}

/// Result of validating preview values against the live validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub ok: bool,
    pub message: String,
    /// Indented JSON of the accepted values.
    pub payload: Option<String>,
    pub issues: Vec<SubmissionIssueItem>,
}

/// Autosave tick result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSaveResponse {
    pub ok: bool,
    /// `idle|pending|saved|error`.
    pub status: String,
    /// Milliseconds until the pending save fires.
    pub remaining_ms: Option<u64>,
    pub message: String,
}

/// One selectable format of a field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFormatItem {
    pub format: String,
    pub label: String,
}

/// Returns the whole session state.
///
/// Payload: `{"form": Form, "nextFieldId": n, "revision": n, "currentTab":
/// "form"|"code", "compactToolbar": bool, "payloadPreview"?: string}`.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_snapshot() -> PlaygroundResponse {
    let session = lock_session();
    snapshot_response(&session, "Snapshot ready.")
}

/// Adds a field from its JSON body (`{"type": "string", "format": ...}`).
///
/// Payload: the placed field with `id` and `key`.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_add_field(field_json: String) -> PlaygroundResponse {
    let field: Field = match decode_json(&field_json, "field") {
        Ok(field) => field,
        Err(response) => return response,
    };
    add_field_to_session(field, "playground_add_field")
}

/// Adds the palette template for a type/format pair (`"enum"`, `"radio"`).
///
/// Payload: the placed field with `id` and `key`.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_add_template(field_type: String, format: String) -> PlaygroundResponse {
    let Some(template) = find_template(&field_type, &format) else {
        return PlaygroundResponse::failure(
            "unknown_template",
            format!("no template for {}/{}", field_type.trim(), format.trim()),
        );
    };
    add_field_to_session(template.field, "playground_add_template")
}

#[flutter_rust_bridge::frb(sync)]
pub fn playground_remove_field(id: u32) -> PlaygroundResponse {
    let mut session = lock_session();
    match session.store.remove_field(id) {
        Ok(()) => {
            session.note_mutation();
            snapshot_response(&session, "Field removed.")
        }
        Err(err) => PlaygroundResponse::from_store_error("playground_remove_field", &err),
    }
}

/// Replaces the body of field `id`; id and key are kept.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_set_field(id: u32, field_json: String) -> PlaygroundResponse {
    let field: Field = match decode_json(&field_json, "field") {
        Ok(field) => field,
        Err(response) => return response,
    };
    let mut session = lock_session();
    match session.store.set_field(id, field) {
        Ok(()) => {
            session.note_mutation();
            snapshot_response(&session, "Field updated.")
        }
        Err(err) => PlaygroundResponse::from_store_error("playground_set_field", &err),
    }
}

/// Replaces the field list (reorder/bulk edit) from a JSON array.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_set_fields(fields_json: String) -> PlaygroundResponse {
    let fields: Vec<FieldWithIdAndKey> = match decode_json(&fields_json, "fields") {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let mut session = lock_session();
    match session.store.set_fields(fields) {
        Ok(()) => {
            session.note_mutation();
            snapshot_response(&session, "Fields updated.")
        }
        Err(err) => PlaygroundResponse::from_store_error("playground_set_fields", &err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn playground_set_metadata(metadata_json: String) -> PlaygroundResponse {
    let metadata: FormMetadata = match decode_json(&metadata_json, "metadata") {
        Ok(metadata) => metadata,
        Err(response) => return response,
    };
    let mut session = lock_session();
    match session.store.set_metadata(metadata) {
        Ok(()) => {
            session.note_mutation();
            snapshot_response(&session, "Metadata updated.")
        }
        Err(err) => PlaygroundResponse::from_store_error("playground_set_metadata", &err),
    }
}

/// Resets to the empty form; the reset is autosaved like any edit.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_reset() -> PlaygroundResponse {
    let mut session = lock_session();
    session.store.reset_form();
    session.note_mutation();
    snapshot_response(&session, "Form reset.")
}

/// Derives schema text, defaults, diagnostics and component source.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_artifacts() -> ArtifactsResponse {
    let form = lock_session().store.form().clone();
    let artifacts = derive_artifacts(&form);
    let diagnostics = artifacts
        .schema
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    let message = if diagnostics.is_empty() {
        "Artifacts ready.".to_string()
    } else {
        format!("Artifacts ready with {} diagnostic(s).", diagnostics.len())
    };

    ArtifactsResponse {
        ok: true,
        message,
        schema_source: artifacts.schema.source_text,
        default_values_json: artifacts.schema.default_values.to_json().to_string(),
        source_code: artifacts.source_code,
        diagnostics,
    }
}

/// Validates preview values (`{"field_0": "..."}`) against the live validator.
///
/// On success the formatted payload is also kept as the session's payload
/// preview.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_preview_submission(values_json: String) -> SubmissionResponse {
    let values: serde_json::Value = match serde_json::from_str(&values_json) {
        Ok(values) => values,
        Err(err) => {
            return SubmissionResponse {
                ok: false,
                message: format!("values are not valid JSON: {err}"),
                payload: None,
                issues: Vec::new(),
            }
        }
    };

    let mut session = lock_session();
    let schema = formsmith_core::synthesize_schema(session.store.fields());
    match preview_submission(&schema.validator, &values) {
        Ok(preview) => {
            session
                .store
                .set_payload_preview(Some(preview.payload.clone()));
            SubmissionResponse {
                ok: true,
                message: "Submission accepted.".to_string(),
                payload: Some(preview.payload),
                issues: Vec::new(),
            }
        }
        Err(errors) => SubmissionResponse {
            ok: false,
            message: format!("Submission rejected with {} issue(s).", errors.issues.len()),
            payload: None,
            issues: errors
                .issues
                .into_iter()
                .map(|issue| SubmissionIssueItem {
                    path: issue.path.join("."),
                    message: issue.message,
                })
                .collect(),
        },
    }
}

/// Advances the autosave debounce to "now"; saves when the delay expired.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_autosave_tick() -> AutoSaveResponse {
    let mut guard = lock_session();
    let session = &mut *guard;
    let now = Instant::now();

    session.autosave.note_revision(session.store.revision(), now);
    let due = session
        .autosave
        .deadline()
        .is_some_and(|deadline| now >= deadline);
    if !due {
        return match session.autosave.deadline() {
            Some(deadline) => AutoSaveResponse {
                ok: true,
                status: "pending".to_string(),
                remaining_ms: Some(duration_ms(deadline - now)),
                message: "Save pending.".to_string(),
            },
            None => AutoSaveResponse {
                ok: true,
                status: "idle".to_string(),
                remaining_ms: None,
                message: "Nothing to save.".to_string(),
            },
        };
    }

    let conn = match ensure_storage(&mut session.conn) {
        Ok(conn) => conn,
        Err(message) => {
            warn!("event=ffi_autosave module=ffi status=error error_code=storage_open_failed");
            return AutoSaveResponse {
                ok: false,
                status: "error".to_string(),
                remaining_ms: None,
                message,
            };
        }
    };
    let state = std::mem::take(&mut session.autosave);
    let mut service = AutoSaveService::resume(SqliteFormRepository::new(conn), state);
    let result = service.tick(&session.store, now);
    session.autosave = service.into_state();

    match result {
        Ok(AutoSaveOutcome::Saved { revision }) => AutoSaveResponse {
            ok: true,
            status: "saved".to_string(),
            remaining_ms: None,
            message: format!("Saved revision {revision}."),
        },
        Ok(AutoSaveOutcome::Pending { remaining }) => AutoSaveResponse {
            ok: true,
            status: "pending".to_string(),
            remaining_ms: Some(duration_ms(remaining)),
            message: "Save pending.".to_string(),
        },
        Ok(AutoSaveOutcome::Idle) => AutoSaveResponse {
            ok: true,
            status: "idle".to_string(),
            remaining_ms: None,
            message: "Nothing to save.".to_string(),
        },
        Err(err) => AutoSaveResponse {
            ok: false,
            status: "error".to_string(),
            remaining_ms: None,
            message: format!("autosave failed: {err}"),
        },
    }
}

/// Restores the saved form into the session (session start).
///
/// Payload: the snapshot after loading. Nothing stored leaves the session
/// unchanged and still succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn playground_load() -> PlaygroundResponse {
    let mut guard = lock_session();
    let session = &mut *guard;

    let conn = match ensure_storage(&mut session.conn) {
        Ok(conn) => conn,
        Err(message) => return PlaygroundResponse::failure("storage_open_failed", message),
    };
    let state = std::mem::take(&mut session.autosave);
    let mut service = AutoSaveService::resume(SqliteFormRepository::new(conn), state);
    let result = service.restore(&mut session.store);
    session.autosave = service.into_state();

    match result {
        Ok(true) => {
            info!(
                "event=ffi_load module=ffi status=ok fields={}",
                session.store.fields().len()
            );
            snapshot_response(session, "Form restored.")
        }
        Ok(false) => snapshot_response(session, "Nothing stored."),
        Err(err) => {
            PlaygroundResponse::failure("load_failed", format!("playground_load failed: {err}"))
        }
    }
}

/// Allowed formats of a field type name; empty for unknown names.
#[flutter_rust_bridge::frb(sync)]
pub fn field_formats(field_type: String) -> Vec<FieldFormatItem> {
    formats_for_type_name(field_type.trim())
        .iter()
        .map(|option| FieldFormatItem {
            format: option.format.to_string(),
            label: option.label.to_string(),
        })
        .collect()
}

/// Palette sections as JSON: `[{"fieldType", "sectionName", "templates"}]`.
#[flutter_rust_bridge::frb(sync)]
pub fn field_palette() -> String {
    serde_json::to_string(&field_sections()).unwrap_or_else(|_| "[]".to_string())
}

fn add_field_to_session(field: Field, operation: &str) -> PlaygroundResponse {
    let mut session = lock_session();
    match session.store.add_field(field) {
        Ok(placed) => {
            session.note_mutation();
            PlaygroundResponse::success("Field added.", encode_json(&placed))
        }
        Err(err) => PlaygroundResponse::from_store_error(operation, &err),
    }
}

fn snapshot_response(session: &PlaygroundSession, message: &str) -> PlaygroundResponse {
    PlaygroundResponse::success(message, encode_json(&session.store.snapshot()))
}

fn decode_json<T: serde::de::DeserializeOwned>(
    raw: &str,
    what: &str,
) -> Result<T, PlaygroundResponse> {
    serde_json::from_str(raw).map_err(|err| {
        PlaygroundResponse::failure("invalid_json", format!("{what} JSON is not valid: {err}"))
    })
}

fn encode_json(value: &impl Serialize) -> Option<String> {
    serde_json::to_string(value).ok()
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn lock_session() -> MutexGuard<'static, PlaygroundSession> {
    SESSION
        .get_or_init(|| Mutex::new(PlaygroundSession::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn resolve_playground_db_path() -> PathBuf {
    PLAYGROUND_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(PLAYGROUND_DB_FILE_NAME)
        })
        .clone()
}

fn resolve_autosave_delay() -> Duration {
    *AUTOSAVE_DELAY.get_or_init(|| {
        std::env::var(AUTOSAVE_DELAY_ENV)
            .ok()
            .and_then(|raw| parse_delay_ms(&raw))
            .unwrap_or(formsmith_core::DEFAULT_AUTOSAVE_DELAY)
    })
}

fn parse_delay_ms(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, field_formats, field_palette, init_logging, parse_delay_ms,
        playground_add_field, playground_add_template, playground_artifacts,
        playground_preview_submission, playground_remove_field, playground_reset,
        playground_set_metadata, playground_snapshot, ping,
    };
    use std::sync::Mutex;
    use std::time::Duration;

    // Tests below share the process-wide session.
    static SESSION_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/formsmith-logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn delay_override_parses_milliseconds() {
        assert_eq!(parse_delay_ms(" 250 "), Some(Duration::from_millis(250)));
        assert_eq!(parse_delay_ms("soon"), None);
    }

    #[test]
    fn field_formats_lists_catalog_entries() {
        let formats = field_formats("boolean".to_string());
        let names = formats.iter().map(|item| item.format.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["checkbox", "switch"]);
        assert!(field_formats("color".to_string()).is_empty());
    }

    #[test]
    fn field_palette_is_json_array_of_sections() {
        let parsed: serde_json::Value =
            serde_json::from_str(&field_palette()).expect("palette should be JSON");
        let sections = parsed.as_array().expect("palette should be an array");
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[0]["fieldType"], "string");
    }

    #[test]
    fn session_flow_adds_fields_and_derives_artifacts() {
        let _guard = SESSION_GUARD.lock().unwrap_or_else(|err| err.into_inner());
        let reset = playground_reset();
        assert!(reset.ok, "{}", reset.message);

        let added = playground_add_field(
            r#"{"type":"string","format":"email","label":"Email","required":true}"#.to_string(),
        );
        assert!(added.ok, "{}", added.message);
        let placed: serde_json::Value =
            serde_json::from_str(added.payload_json.as_deref().expect("payload"))
                .expect("placed field JSON");
        assert_eq!(placed["key"], "field_0");

        let template = playground_add_template("enum".to_string(), "radio".to_string());
        assert!(template.ok, "{}", template.message);

        let artifacts = playground_artifacts();
        assert!(artifacts.schema_source.contains("field_0: z.string().email(),"));
        assert!(artifacts.source_code.contains("<RadioGroup"));
        assert!(artifacts.diagnostics.is_empty());

        let rejected = playground_preview_submission(r#"{"field_0":"nope"}"#.to_string());
        assert!(!rejected.ok);
        assert!(rejected.issues.iter().any(|issue| issue.path == "field_0"));

        let removed = playground_remove_field(1);
        assert!(removed.ok, "{}", removed.message);
        let accepted =
            playground_preview_submission(r#"{"field_0":"a@example.com"}"#.to_string());
        assert!(accepted.ok, "{}", accepted.message);
        assert!(accepted
            .payload
            .as_deref()
            .is_some_and(|payload| payload.contains("a@example.com")));

        let snapshot = playground_snapshot();
        let snapshot: serde_json::Value =
            serde_json::from_str(snapshot.payload_json.as_deref().expect("payload"))
                .expect("snapshot JSON");
        assert_eq!(snapshot["nextFieldId"], 2);
        assert_eq!(snapshot["form"]["fields"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn session_rejects_invalid_inputs_without_mutation() {
        let _guard = SESSION_GUARD.lock().unwrap_or_else(|err| err.into_inner());
        let bad_json = playground_add_field("{not json".to_string());
        assert_eq!(bad_json.error_code.as_deref(), Some("invalid_json"));

        let bad_enum = playground_add_field(
            r#"{"type":"enum","format":"select","options":[]}"#.to_string(),
        );
        assert_eq!(bad_enum.error_code.as_deref(), Some("invalid_field"));

        let long_title = "x".repeat(101);
        let bad_metadata = playground_set_metadata(
            serde_json::json!({
                "title": long_title,
                "description": "",
                "submitButtonLabel": "Submit",
                "submitButtonColor": "zinc",
                "submitButtonShade": 900,
                "buttonWidthFull": false,
                "showBackground": true,
                "backgroundColor": "amber",
                "backgroundShade": 500
            })
            .to_string(),
        );
        assert_eq!(bad_metadata.error_code.as_deref(), Some("invalid_metadata"));

        let missing = playground_remove_field(u32::MAX);
        assert_eq!(missing.error_code.as_deref(), Some("field_not_found"));
    }
}
