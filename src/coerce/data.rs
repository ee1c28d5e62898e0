//! Untyped input data.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::instance::Instance;

/// A loosely typed scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Input to instance construction.
///
/// Maps and lists own their children, so any `Data` value is a finite tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Null,
    Scalar(Scalar),
    /// Field name to value
    Map(BTreeMap<String, Data>),
    List(Vec<Data>),
    /// An instance built earlier, used as-is for a reference or collection element
    Instance(Box<Instance>),
}

impl Data {
    /// Build a map from `(key, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Data>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list from anything convertible into `Data`.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Data>,
        I: IntoIterator<Item = V>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(s) => s.type_name(),
            Self::Map(_) => "object",
            Self::List(_) => "list",
            Self::Instance(_) => "instance",
        }
    }

    /// Short rendering used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Scalar(Scalar::Str(s)) => format!("\"{}\"", s),
            Self::Scalar(s) => s.to_string(),
            Self::Map(map) => format!("object with {} field(s)", map.len()),
            Self::List(items) => format!("list of {} item(s)", items.len()),
            Self::Instance(instance) => format!("instance of {}", instance.class_name()),
        }
    }
}

impl From<serde_json::Value> for Data {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Scalar(Scalar::Int(i)),
                None => Self::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Json::String(s) => Self::Scalar(Scalar::Str(s)),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl From<Scalar> for Data {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::Str(s.to_string()))
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::Str(s))
    }
}

impl From<i64> for Data {
    fn from(i: i64) -> Self {
        Self::Scalar(Scalar::Int(i))
    }
}

impl From<i32> for Data {
    fn from(i: i32) -> Self {
        Self::Scalar(Scalar::Int(i64::from(i)))
    }
}

impl From<f64> for Data {
    fn from(x: f64) -> Self {
        Self::Scalar(Scalar::Float(x))
    }
}

impl From<bool> for Data {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<Instance> for Data {
    fn from(instance: Instance) -> Self {
        Self::Instance(Box::new(instance))
    }
}

impl From<Vec<Data>> for Data {
    fn from(items: Vec<Data>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Data>> for Data {
    fn from(map: BTreeMap<String, Data>) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Data>> From<Option<T>> for Data {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
