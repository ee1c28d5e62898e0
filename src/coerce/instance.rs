//! Typed instances produced by construction.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::data::Scalar;

/// A coerced attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Short(i16),
    Integer(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    Boolean(bool),
    Date(NaiveDate),
    /// Untyped attribute, stored as given
    Any(Scalar),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Short(_) => "short",
            Self::Integer(_) => "integer",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Date(_) => "date",
            Self::Any(_) => "any",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Any(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Any integer kind, widened.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Short(i) => Some(i64::from(*i)),
            Self::Integer(i) => Some(i64::from(*i)),
            Self::Long(i) | Self::Any(Scalar::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Any numeric kind, widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(x) | Self::Any(Scalar::Float(x)) => Some(*x),
            Self::Float(x) => Some(f64::from(*x)),
            _ => self.as_i64().map(|i| i as f64),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) | Self::Any(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// The state of one field on an instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Never supplied, or supplied as null
    Unset,
    Attribute(Value),
    Reference(Box<Instance>),
    Collection(Vec<Instance>),
}

impl FieldValue {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// An object of a model class.
///
/// Holds an entry for every field visible on its class, set or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    class: String,
    fields: BTreeMap<String, FieldValue>,
}

impl Instance {
    pub(crate) fn new(class: &str, fields: BTreeMap<String, FieldValue>) -> Self {
        Self {
            class: class.to_string(),
            fields,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn is_set(&self, field: &str) -> bool {
        self.get(field).is_some_and(FieldValue::is_set)
    }

    pub fn attribute(&self, field: &str) -> Option<&Value> {
        match self.get(field)? {
            FieldValue::Attribute(value) => Some(value),
            _ => None,
        }
    }

    pub fn reference(&self, field: &str) -> Option<&Instance> {
        match self.get(field)? {
            FieldValue::Reference(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn collection(&self, field: &str) -> Option<&[Instance]> {
        match self.get(field)? {
            FieldValue::Collection(items) => Some(items),
            _ => None,
        }
    }

    /// Shorthand for a string attribute.
    pub fn str(&self, field: &str) -> Option<&str> {
        self.attribute(field).and_then(Value::as_str)
    }
}
