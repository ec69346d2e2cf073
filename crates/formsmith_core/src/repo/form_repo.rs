//! Local-storage repository for the working form.
//!
//! # Responsibility
//! - Persist the whole `Form` JSON under `current-form`.
//! - Persist the field-id counter under `playground` as
//!   `{"nextFieldId": N}`.
//!
//! # Invariants
//! - Writes overwrite the stored value wholesale.
//! - `save_state` commits the form and the counter in one transaction.
//! - Read paths reject undecodable or invalid payloads with `InvalidData`
//!   instead of masking them.
//!
//! # See also
//! - service/autosave.rs

use crate::db::DbError;
use crate::model::field::FieldId;
use crate::model::form::Form;
use crate::store::check_form;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the serialized working form.
pub const CURRENT_FORM_KEY: &str = "current-form";
/// Storage key of the playground state (field-id counter).
pub const PLAYGROUND_STATE_KEY: &str = "playground";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "serialization failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaygroundState {
    next_field_id: FieldId,
}

/// Repository interface for the persisted working form.
pub trait FormRepository {
    fn save_form(&self, form: &Form) -> RepoResult<()>;
    fn load_form(&self) -> RepoResult<Option<Form>>;
    fn save_next_field_id(&self, next_field_id: FieldId) -> RepoResult<()>;
    fn load_next_field_id(&self) -> RepoResult<Option<FieldId>>;
    /// Writes the form and the counter together: both land or neither does.
    fn save_state(&self, form: &Form, next_field_id: FieldId) -> RepoResult<()>;
    /// Removes both the form and the counter.
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed implementation over the `local_storage` table.
pub struct SqliteFormRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFormRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Raw value stored under `key`.
    pub fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Inserts or overwrites the value under `key`.
    pub fn set_item(&self, key: &str, value: &str) -> RepoResult<()> {
        upsert_item(self.conn, key, value)
    }

    pub fn remove_item(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1;", params![key])?;
        Ok(())
    }

    /// Millisecond timestamp of the last write under `key`.
    pub fn updated_at(&self, key: &str) -> RepoResult<Option<i64>> {
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM local_storage WHERE key = ?1;",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(updated_at)
    }
}

impl FormRepository for SqliteFormRepository<'_> {
    fn save_form(&self, form: &Form) -> RepoResult<()> {
        let payload = serde_json::to_string(form)?;
        self.set_item(CURRENT_FORM_KEY, &payload)
    }

    fn load_form(&self) -> RepoResult<Option<Form>> {
        let Some(payload) = self.get_item(CURRENT_FORM_KEY)? else {
            return Ok(None);
        };
        let form = decode_form(&payload)?;
        Ok(Some(form))
    }

    fn save_next_field_id(&self, next_field_id: FieldId) -> RepoResult<()> {
        let payload = serde_json::to_string(&PlaygroundState { next_field_id })?;
        self.set_item(PLAYGROUND_STATE_KEY, &payload)
    }

    fn load_next_field_id(&self) -> RepoResult<Option<FieldId>> {
        let Some(payload) = self.get_item(PLAYGROUND_STATE_KEY)? else {
            return Ok(None);
        };
        let state: PlaygroundState = serde_json::from_str(&payload).map_err(|err| {
            RepoError::InvalidData(format!("`{PLAYGROUND_STATE_KEY}` is not decodable: {err}"))
        })?;
        Ok(Some(state.next_field_id))
    }

    fn save_state(&self, form: &Form, next_field_id: FieldId) -> RepoResult<()> {
        let form_payload = serde_json::to_string(form)?;
        let state_payload = serde_json::to_string(&PlaygroundState { next_field_id })?;

        // The repository only borrows the connection; nested transactions are
        // rejected by SQLite itself.
        let tx = self.conn.unchecked_transaction()?;
        upsert_item(&tx, CURRENT_FORM_KEY, &form_payload)?;
        upsert_item(&tx, PLAYGROUND_STATE_KEY, &state_payload)?;
        tx.commit()?;
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        self.remove_item(CURRENT_FORM_KEY)?;
        self.remove_item(PLAYGROUND_STATE_KEY)
    }
}

fn upsert_item(conn: &Connection, key: &str, value: &str) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO local_storage (key, value, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![key, value, Utc::now().timestamp_millis()],
    )?;
    Ok(())
}

fn decode_form(payload: &str) -> RepoResult<Form> {
    let form: Form = serde_json::from_str(payload).map_err(|err| {
        RepoError::InvalidData(format!("`{CURRENT_FORM_KEY}` is not decodable: {err}"))
    })?;

    check_form(&form)
        .map_err(|err| RepoError::InvalidData(format!("stored form rejected: {err}")))?;
    Ok(form)
}
