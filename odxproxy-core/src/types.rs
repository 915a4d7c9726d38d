// Adapters for Odoo's irregular field encodings.
//
// Odoo serializes an empty many2one as `false` and a set one as `[id, "Name"]`,
// and uses `false` for "no value" on otherwise typed scalar fields (char, date,
// selection, ...). These adapters absorb both conventions so record types can
// be derived with plain `#[derive(Deserialize)]`.
//
// Both adapters decode through `Option<Value>`, which makes serde treat a
// missing struct field the same way it treats `null`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

/// A many2one relation: `[id, display_name]`, or unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Many2One {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Many2One {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Many2One {
            id: Some(id),
            name: Some(name.into()),
        }
    }

    pub fn unset() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.id.is_some()
    }

    /// Interpret an already parsed JSON value. Never fails: anything that is
    /// not an array led by an integer id (or its decimal text) is an unset
    /// relation, label included.
    pub fn from_json(value: &Value) -> Self {
        let Value::Array(items) = value else {
            return Self::unset();
        };
        let Some(id) = items.first().and_then(relation_id) else {
            return Self::unset();
        };
        Many2One {
            id: Some(id),
            name: items.get(1).and_then(Value::as_str).map(str::to_string),
        }
    }

    pub fn to_json(&self) -> Value {
        match self.id {
            None => Value::Null,
            Some(id) => Value::Array(vec![
                Value::from(id),
                self.name.clone().map_or(Value::Null, Value::String),
            ]),
        }
    }
}

fn relation_id(value: &Value) -> Option<i64> {
    match value {
        Value::String(text) => text.trim().parse().ok(),
        other => other.as_i64(),
    }
}

impl Serialize for Many2One {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.id {
            None => serializer.serialize_none(),
            Some(id) => (id, &self.name).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Many2One {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map_or_else(Many2One::unset, Many2One::from_json))
    }
}

/// A scalar field that Odoo reports as `false` when it has no value.
///
/// `OptionalField<String>` decodes `"x"` as present and `false`, `null`, a
/// missing key or a value of the wrong shape as unset. The wrong-shape case
/// is deliberately lossy so one bad field cannot fail a whole record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionalField<T>(pub Option<T>);

impl<T> OptionalField<T> {
    pub fn new(value: T) -> Self {
        OptionalField(Some(value))
    }

    pub fn unset() -> Self {
        OptionalField(None)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn value(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }
}

impl<T: DeserializeOwned> OptionalField<T> {
    /// Interpret an already parsed JSON value, degrading to unset.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => OptionalField(None),
            other => match serde_json::from_value(other) {
                Ok(v) => OptionalField(Some(v)),
                Err(err) => {
                    trace!("discarding malformed optional field: {}", err);
                    OptionalField(None)
                }
            },
        }
    }
}

impl<T> Default for OptionalField<T> {
    fn default() -> Self {
        OptionalField(None)
    }
}

impl<T> From<Option<T>> for OptionalField<T> {
    fn from(value: Option<T>) -> Self {
        OptionalField(value)
    }
}

impl<T> From<OptionalField<T>> for Option<T> {
    fn from(value: OptionalField<T>) -> Self {
        value.0
    }
}

impl<T: Serialize> Serialize for OptionalField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            None => serializer.serialize_none(),
            Some(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OptionalField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.map_or_else(OptionalField::unset, OptionalField::from_json))
    }
}
