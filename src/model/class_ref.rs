//! Borrowed view of one class inside a built model.

use std::fmt;

use super::Model;
use crate::schema::{ClassDescriptor, ClassId, FieldDescriptor, FieldId};

/// A class together with the model it belongs to.
///
/// Cheap to copy. All navigation (parents, ancestors, inherited fields)
/// goes through the model's registry by id.
#[derive(Clone, Copy)]
pub struct ClassRef<'m> {
    model: &'m Model,
    class: &'m ClassDescriptor,
}

impl<'m> ClassRef<'m> {
    pub(super) fn new(model: &'m Model, class: &'m ClassDescriptor) -> Self {
        Self { model, class }
    }

    pub fn id(&self) -> ClassId {
        self.class.id()
    }

    pub fn name(&self) -> &'m str {
        self.class.name()
    }

    /// Name with the model namespace stripped.
    pub fn display_name(&self) -> &'m str {
        self.model.display_name(self.class.name())
    }

    pub fn descriptor(&self) -> &'m ClassDescriptor {
        self.class
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    pub fn is_builtin(&self) -> bool {
        self.class.is_builtin()
    }

    pub fn parent_names(&self) -> &'m [String] {
        self.class.parent_names()
    }

    /// Resolved direct parents, in declared order.
    pub fn parents(&self) -> impl Iterator<Item = ClassRef<'m>> + 'm {
        let model = self.model;
        self.class.parents.iter().map(move |&id| model.class_at(id))
    }

    /// Ancestor chain: this class first, then parents depth-first.
    pub fn ancestors(&self) -> impl Iterator<Item = ClassRef<'m>> + 'm {
        let model = self.model;
        self.class.ancestors.iter().map(move |&id| model.class_at(id))
    }

    /// Fields declared directly on this class.
    pub fn own_fields(&self) -> &'m [FieldDescriptor] {
        self.class.own_fields()
    }

    /// Look up a visible field, own or inherited.
    pub fn field(&self, name: &str) -> Option<&'m FieldDescriptor> {
        self.class
            .all_fields
            .get(name)
            .map(|&id| self.model.field_at(id))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.class.all_fields.contains_key(name)
    }

    pub fn field_count(&self) -> usize {
        self.class.all_fields.len()
    }

    /// Names of every visible field, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &'m str> + 'm {
        self.class.all_fields.keys().map(String::as_str)
    }

    /// Every visible field: own fields first in declared order, then each
    /// ancestor's surviving fields in chain order.
    pub fn fields(&self) -> impl Iterator<Item = &'m FieldDescriptor> + 'm {
        let model = self.model;
        let class = self.class;
        class.ancestors.iter().flat_map(move |&ancestor| {
            model.classes[ancestor.index()]
                .own_fields()
                .iter()
                .enumerate()
                .filter(move |(index, field)| {
                    class.all_fields.get(field.name())
                        == Some(&FieldId {
                            class: ancestor,
                            index: *index,
                        })
                })
                .map(|(_, field)| field)
        })
    }

    pub fn attributes(&self) -> impl Iterator<Item = &'m FieldDescriptor> + 'm {
        self.fields().filter(|f| f.is_attribute())
    }

    pub fn references(&self) -> impl Iterator<Item = &'m FieldDescriptor> + 'm {
        self.fields().filter(|f| f.is_reference())
    }

    pub fn collections(&self) -> impl Iterator<Item = &'m FieldDescriptor> + 'm {
        self.fields().filter(|f| f.is_collection())
    }

    /// The class that declared a field.
    pub fn declaring_class_of(&self, field: &FieldDescriptor) -> ClassRef<'m> {
        self.model.class_at(field.declaring_class())
    }

    /// True if `other` is this class or one of its ancestors.
    pub fn is_subclass_of(&self, other: &ClassRef<'_>) -> bool {
        std::ptr::eq(self.model, other.model) && self.class.ancestors.contains(&other.id())
    }
}

impl PartialEq for ClassRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.class.id() == other.class.id()
    }
}

impl Eq for ClassRef<'_> {}

impl fmt::Debug for ClassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRef")
            .field("id", &self.class.id())
            .field("name", &self.class.name())
            .finish()
    }
}
