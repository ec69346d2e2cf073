//! Default values derived alongside the validator.

use crate::model::field::DateRange;
use serde::Serialize;
use serde_json::{Map, Value};

/// Default value of one field.
///
/// Number fields are skipped by synthesis, so there is no numeric default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Text(String),
    Boolean(bool),
    Range(DateRange),
}

impl DefaultValue {
    pub fn empty_text() -> Self {
        Self::Text(String::new())
    }

    pub fn empty_range() -> Self {
        Self::Range(DateRange::default())
    }
}

/// Ordered `key -> default` mapping.
///
/// A key may be present with no value (radio enums): the record has the key
/// but nothing is prefilled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultValues {
    entries: Vec<(String, Option<DefaultValue>)>,
}

impl DefaultValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: impl Into<String>, value: Option<DefaultValue>) {
        self.entries.push((key.into(), value));
    }

    /// Returns the default of `key`; `None` when absent or unspecified.
    pub fn get(&self, key: &str) -> Option<&DefaultValue> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(candidate, _)| candidate == key)
    }

    /// Keys in field order, including keys with unspecified defaults.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries with a specified default, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DefaultValue)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|value| (key.as_str(), value)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the record as a JSON object, omitting unspecified defaults.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in self.iter() {
            let json = match value {
                DefaultValue::Text(text) => Value::String(text.clone()),
                DefaultValue::Boolean(flag) => Value::Bool(*flag),
                DefaultValue::Range(range) => {
                    let mut object = Map::new();
                    object.insert("start".to_string(), Value::String(range.start.clone()));
                    object.insert("end".to_string(), Value::String(range.end.clone()));
                    Value::Object(object)
                }
            };
            map.insert(key.to_string(), json);
        }
        Value::Object(map)
    }
}
