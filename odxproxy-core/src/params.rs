// Positional parameter payloads.
// Odoo methods take loosely typed positional arguments: domains are nested
// lists of strings and scalars, `create`/`write` take field maps, and some
// values only have a textual form on the caller side. `Param` captures all of
// these without forcing every caller to build `serde_json::Value` by hand.

use serde_json::{Map, Number, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single positional argument, possibly nested.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<Param>),
    Map(Vec<(String, Param)>),
    /// Already structured JSON, passed through untouched.
    Json(Value),
}

impl Param {
    /// Fallback for types with no JSON mapping: send their display form.
    pub fn display(value: impl fmt::Display) -> Self {
        Param::String(value.to_string())
    }

    /// Build a map parameter from key/value pairs, keys rendered with `Display`.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: Into<Param>,
    {
        Param::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }

    pub fn to_json(&self) -> Value {
        match self {
            Param::Null => Value::Null,
            Param::Bool(b) => Value::Bool(*b),
            Param::Int(i) => Value::Number(Number::from(*i)),
            Param::UInt(u) => Value::Number(Number::from(*u)),
            // NaN and infinities have no JSON form
            Param::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string())),
            Param::String(s) => Value::String(s.clone()),
            Param::List(items) => Value::Array(items.iter().map(Param::to_json).collect()),
            Param::Map(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (k, v) in entries {
                    map.insert(k.clone(), v.to_json());
                }
                Value::Object(map)
            }
            Param::Json(value) => value.clone(),
        }
    }
}

/// Encode a positional parameter list as the JSON array sent in `params`.
pub fn encode_params(params: &[Param]) -> Value {
    Value::Array(params.iter().map(Param::to_json).collect())
}

impl From<Param> for Value {
    fn from(param: Param) -> Self {
        param.to_json()
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Param {
            fn from(value: $t) -> Self {
                Param::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Param {
            fn from(value: $t) -> Self {
                Param::UInt(u64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Param {
    fn from(value: isize) -> Self {
        Param::Int(value as i64)
    }
}

impl From<usize> for Param {
    fn from(value: usize) -> Self {
        Param::UInt(value as u64)
    }
}

impl From<f32> for Param {
    fn from(value: f32) -> Self {
        Param::Float(f64::from(value))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::String(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::String(value)
    }
}

impl From<&String> for Param {
    fn from(value: &String) -> Self {
        Param::String(value.clone())
    }
}

impl From<char> for Param {
    fn from(value: char) -> Self {
        Param::String(value.to_string())
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Param::Json(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

impl<T: Into<Param>> From<Vec<T>> for Param {
    fn from(value: Vec<T>) -> Self {
        Param::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Param> + Clone> From<&[T]> for Param {
    fn from(value: &[T]) -> Self {
        Param::List(value.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Param>, const N: usize> From<[T; N]> for Param {
    fn from(value: [T; N]) -> Self {
        Param::List(value.into_iter().map(Into::into).collect())
    }
}

impl<K: fmt::Display, V: Into<Param>> From<BTreeMap<K, V>> for Param {
    fn from(value: BTreeMap<K, V>) -> Self {
        Param::map(value)
    }
}

impl<K: fmt::Display, V: Into<Param>, S> From<HashMap<K, V, S>> for Param {
    fn from(value: HashMap<K, V, S>) -> Self {
        Param::map(value)
    }
}

/// Build a `Vec<Param>` from heterogeneous values.
///
/// ```
/// use odxproxy_core::{params, encode_params};
/// let domain = params![params![params!["is_company", "=", true]]];
/// assert_eq!(encode_params(&domain).to_string(), r#"[[["is_company","=",true]]]"#);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Param>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Param::from($value)),+]
    };
}
