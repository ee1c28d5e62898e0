//! Field descriptors.
//!
//! A field is one named member of a class. The set of field kinds is closed:
//! scalar attributes, single-valued references and ordered collections.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::class::ClassId;

/// Scalar type carried by an attribute field.
///
/// Declared type names are matched on their last dotted segment, so both
/// `java.lang.Integer` and `int` map to [`ValueType::Integer`]. Anything
/// unrecognized becomes [`ValueType::Any`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Text
    String,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// 64-bit floating point
    Double,
    /// 32-bit floating point
    Float,
    /// true/false
    Boolean,
    /// ISO-8601 calendar date
    Date,
    /// Untyped fallback, accepts any scalar
    Any,
}

impl ValueType {
    /// Map a declared type name onto a value type.
    pub fn from_declared(declared: &str) -> Self {
        let short = declared.rsplit('.').next().unwrap_or(declared);
        match short.to_ascii_lowercase().as_str() {
            "string" | "str" | "text" => Self::String,
            "short" | "i16" => Self::Short,
            "integer" | "int" | "i32" => Self::Integer,
            "long" | "i64" => Self::Long,
            "double" | "f64" => Self::Double,
            "float" | "f32" => Self::Float,
            "boolean" | "bool" => Self::Boolean,
            "date" => Self::Date,
            _ => Self::Any,
        }
    }

    /// Lowercase name used in messages and output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Short => "short",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Double => "double",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Any => "any",
        }
    }

    /// Whether values of this type are numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Short | Self::Integer | Self::Long | Self::Double | Self::Float
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Link from a reference or collection field to another class.
///
/// The target is kept by name and only resolved against the model when
/// needed, so classes may refer to each other in a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub referenced_class: String,
    pub reverse_field: Option<String>,
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A scalar value
    Attribute {
        value_type: ValueType,
        /// Type name exactly as declared
        declared_type: String,
    },
    /// Exactly one related object
    Reference(Link),
    /// An ordered list of related objects
    Collection(Link),
}

/// One declared field of a class.
///
/// Owned by the class that declares it. Subclasses see it through their
/// merged field map, which stores a [`FieldId`] rather than a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    declaring_class: ClassId,
    kind: FieldKind,
}

impl FieldDescriptor {
    pub fn attribute(name: &str, declared_type: &str, declaring_class: ClassId) -> Self {
        Self {
            name: name.to_string(),
            declaring_class,
            kind: FieldKind::Attribute {
                value_type: ValueType::from_declared(declared_type),
                declared_type: declared_type.to_string(),
            },
        }
    }

    pub fn reference(
        name: &str,
        referenced_class: &str,
        reverse_field: Option<&str>,
        declaring_class: ClassId,
    ) -> Self {
        Self {
            name: name.to_string(),
            declaring_class,
            kind: FieldKind::Reference(Link {
                referenced_class: referenced_class.to_string(),
                reverse_field: reverse_field.map(str::to_string),
            }),
        }
    }

    pub fn collection(
        name: &str,
        referenced_class: &str,
        reverse_field: Option<&str>,
        declaring_class: ClassId,
    ) -> Self {
        Self {
            name: name.to_string(),
            declaring_class,
            kind: FieldKind::Collection(Link {
                referenced_class: referenced_class.to_string(),
                reverse_field: reverse_field.map(str::to_string),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_class(&self) -> ClassId {
        self.declaring_class
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Short label for the kind: `attribute`, `reference` or `collection`.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            FieldKind::Attribute { .. } => "attribute",
            FieldKind::Reference(_) => "reference",
            FieldKind::Collection(_) => "collection",
        }
    }

    pub fn value_type(&self) -> Option<ValueType> {
        match &self.kind {
            FieldKind::Attribute { value_type, .. } => Some(*value_type),
            _ => None,
        }
    }

    pub fn link(&self) -> Option<&Link> {
        match &self.kind {
            FieldKind::Attribute { .. } => None,
            FieldKind::Reference(link) | FieldKind::Collection(link) => Some(link),
        }
    }

    /// Name of the class this field points at, if it is a reference or collection.
    pub fn referenced_class(&self) -> Option<&str> {
        self.link().map(|link| link.referenced_class.as_str())
    }

    pub fn reverse_field(&self) -> Option<&str> {
        self.link().and_then(|link| link.reverse_field.as_deref())
    }

    /// Declared type for attributes, referenced class for the other kinds.
    pub fn type_label(&self) -> &str {
        match &self.kind {
            FieldKind::Attribute { declared_type, .. } => declared_type,
            FieldKind::Reference(link) | FieldKind::Collection(link) => &link.referenced_class,
        }
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.kind, FieldKind::Attribute { .. })
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, FieldKind::Reference(_))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.kind, FieldKind::Collection(_))
    }
}

/// Address of a field: the declaring class plus the position in its own fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    pub class: ClassId,
    pub index: usize,
}
