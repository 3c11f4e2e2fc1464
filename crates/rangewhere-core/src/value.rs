use crate::{key::KeyPart, types::Float64};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Value
///
/// Document value stored against a key. Closed shape: scans, pattern
/// evaluation, and projection all match on these variants and nothing else.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Float64),
    Text(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Build a map value from `(name, value)` pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a list value.
    pub fn list<V: Into<Self>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Field lookup; `None` for non-map values and missing fields.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Map(map) => map.get(name),
            _ => None,
        }
    }

    /// Insert a field into a map value; ignored on non-map values.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Self>) {
        if let Self::Map(map) = self {
            map.insert(name.into(), value.into());
        }
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<Float64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(Float64::new(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(Float64::from(value))
    }
}

impl From<Float64> for Value {
    fn from(value: Float64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self::Map(value)
    }
}

impl From<KeyPart> for Value {
    fn from(part: KeyPart) -> Self {
        match part {
            KeyPart::Null => Self::Null,
            KeyPart::Bool(value) => Self::Bool(value),
            KeyPart::Number(value) => Self::Number(value),
            KeyPart::Text(value) => Self::Text(value),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_reads_map_fields_only() {
        let value = Value::map([("message", "my world")]);

        assert_eq!(value.get("message"), Some(&Value::from("my world")));
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::from("scalar").get("message"), None);
    }

    #[test]
    fn insert_is_a_noop_on_non_map_values() {
        let mut value = Value::from(1.5);
        value.insert("field", true);

        assert_eq!(value, Value::from(1.5));
    }

    #[test]
    fn serializes_untagged() {
        let value = Value::map([
            ("flag", Value::Bool(true)),
            ("name", Value::from("hello")),
            ("rank", Value::from(2.0)),
        ]);

        let json = serde_json::to_string(&value).expect("value serializes");
        assert_eq!(json, r#"{"flag":true,"name":"hello","rank":2.0}"#);
    }
}
