//! Bound values: the dynamic result of binding a schema.
//!
//! The walker produces a [`Record`] whose entries mirror the schema's fields in
//! declaration order. Typed loading turns that record into the caller's struct
//! through `serde_json::Value`; declared defaults travel the other way, from any
//! `Serialize` value into a [`Value`] (see [`to_value`]).

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value as Json};
use thiserror::Error;

/// One bound field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An absent optional field.
    None,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Record(Record),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(u) => Some(*u),
            Value::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "<none>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Record(r) => write!(f, "{r}"),
        }
    }
}

/// Field values of one bound record, in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Look up a value by dotted path through nested records, e.g. `"cache.ttl"`.
    pub fn get_path(&self, dotted: &str) -> Option<&Value> {
        let (head, rest) = match dotted.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (dotted, None),
        };
        let value = self.get(head)?;
        match rest {
            None => Some(value),
            Some(rest) => value.as_record()?.get_path(rest),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        write!(f, "}}")
    }
}

macro_rules! value_from {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

value_from!(Bool: bool);
value_from!(Int: i8, i16, i32, i64);
value_from!(UInt: u8, u16, u32, u64);
value_from!(Float: f32, f64);
value_from!(String: String, &str);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

/// Error raised while converting between Rust values and bound [`Value`]s.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct ValueError(pub(crate) String);

impl From<serde_json::Error> for ValueError {
    fn from(e: serde_json::Error) -> Self {
        ValueError(e.to_string())
    }
}

/// Convert a `Serialize` value into a bound [`Value`].
///
/// Structs and maps become [`Record`]s, `None` and unit become [`Value::None`].
/// Sequences have no bound representation and are rejected.
pub fn to_value<T: Serialize + ?Sized>(source: &T) -> Result<Value, ValueError> {
    Value::try_from(serde_json::to_value(source)?)
}

/// Build a `T` from a bound record.
///
/// serde narrows numbers with range checks, so a `3000` bound for a `u8`
/// field is an error rather than a truncation.
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, ValueError> {
    Ok(serde_json::from_value(Json::from(Value::Record(record)))?)
}

impl TryFrom<Json> for Value {
    type Error = ValueError;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        match json {
            Json::Null => Ok(Value::None),
            Json::Bool(b) => Ok(Value::Bool(b)),
            Json::Number(n) => number(&n),
            Json::String(s) => Ok(Value::String(s)),
            Json::Array(_) => Err(ValueError(
                "a sequence cannot be used as a configuration value".into(),
            )),
            Json::Object(map) => {
                let mut record = Record::with_capacity(map.len());
                for (key, value) in map {
                    let value =
                        Value::try_from(value).map_err(|e| ValueError(format!("{key}: {e}")))?;
                    record.insert(key, value);
                }
                Ok(Value::Record(record))
            }
        }
    }
}

fn number(n: &Number) -> Result<Value, ValueError> {
    if let Some(u) = n.as_u64() {
        Ok(Value::UInt(u))
    } else if let Some(i) = n.as_i64() {
        Ok(Value::Int(i))
    } else {
        n.as_f64()
            .map(Value::Float)
            .ok_or_else(|| ValueError(format!("{n} is not a representable number")))
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        match value {
            Value::None => Json::Null,
            Value::Bool(b) => Json::Bool(b),
            Value::Int(i) => Json::Number(i.into()),
            Value::UInt(u) => Json::Number(u.into()),
            // Coerced floats are always finite.
            Value::Float(f) => Number::from_f64(f).map_or(Json::Null, Json::Number),
            Value::String(s) => Json::String(s),
            Value::Record(r) => Json::Object(
                r.into_iter()
                    .map(|(k, v)| (k, Json::from(v)))
                    .collect::<Map<String, Json>>(),
            ),
        }
    }
}
