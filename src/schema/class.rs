//! Class descriptors.

use std::collections::BTreeMap;
use std::fmt;

use super::field::{FieldDescriptor, FieldId};

/// Position of a class in the model registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

impl ClassId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Metadata for one class.
///
/// Starts life as a shell holding its name, declared parent names and own
/// fields. The model's fix-up pass fills in `parents`, `ancestors` and
/// `all_fields` exactly once; after that the descriptor is never mutated.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    id: ClassId,
    name: String,
    parent_names: Vec<String>,
    own_fields: Vec<FieldDescriptor>,
    builtin: bool,
    pub(crate) parents: Vec<ClassId>,
    pub(crate) ancestors: Vec<ClassId>,
    pub(crate) all_fields: BTreeMap<String, FieldId>,
}

impl ClassDescriptor {
    pub(crate) fn new(id: ClassId, name: &str, parent_names: Vec<String>) -> Self {
        Self {
            id,
            name: name.to_string(),
            parent_names,
            own_fields: Vec::new(),
            builtin: false,
            parents: Vec::new(),
            ancestors: Vec::new(),
            all_fields: BTreeMap::new(),
        }
    }

    /// A pseudo-class with no parents and no fields.
    pub(crate) fn builtin(id: ClassId, name: &str) -> Self {
        Self {
            builtin: true,
            ..Self::new(id, name, Vec::new())
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_names(&self) -> &[String] {
        &self.parent_names
    }

    pub fn own_fields(&self) -> &[FieldDescriptor] {
        &self.own_fields
    }

    pub fn own_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.own_fields.iter().find(|f| f.name() == name)
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    pub(crate) fn add_parent_name(&mut self, parent: &str) {
        if !self.parent_names.iter().any(|p| p == parent) {
            self.parent_names.push(parent.to_string());
        }
    }

    pub(crate) fn push_field(&mut self, field: FieldDescriptor) -> FieldId {
        let index = self.own_fields.len();
        self.own_fields.push(field);
        FieldId {
            class: self.id,
            index,
        }
    }
}
