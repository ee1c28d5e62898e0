//! The class registry.
//!
//! A [`Model`] owns every class descriptor and is built in one go from a
//! [`RawSchema`]:
//!
//! 1. built-in pseudo-classes are seeded,
//! 2. parent names are resolved into class ids,
//! 3. ancestor chains are computed with cycle detection,
//! 4. inherited fields are flattened into each class,
//! 5. reference targets are checked.
//!
//! After that the model is read-only. It holds no interior mutability, so a
//! shared `&Model` can be used from any number of threads.

mod class_ref;
mod resolve;

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::coerce::{self, CoercionError, Data, Instance};
use crate::schema::{
    ClassDescriptor, ClassId, Declaration, FieldDescriptor, FieldId, RawSchema, SchemaBuilder,
    SchemaError,
};

pub use class_ref::ClassRef;

/// Pseudo-classes every model resolves, whatever the schema declares.
pub const BUILTIN_CLASSES: [&str; 2] = ["Integer", "Long"];

/// Structural problems found while building a model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Class '{class}' extends unknown class '{parent}'")]
    UnresolvedParent { class: String, parent: String },

    #[error("Cyclic inheritance involving class '{class}': {cycle}")]
    CyclicInheritance { class: String, cycle: String },

    #[error("Field '{class}.{field}' refers to unknown class '{referenced}'")]
    UnresolvedReference {
        class: String,
        field: String,
        referenced: String,
    },

    #[error("Class name '{name}' is reserved for a built-in class")]
    ReservedClassName { name: String },
}

/// Lookup of a class the model does not know.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown class '{name}'")]
    UnknownClass { name: String },
}

/// Immutable, fully linked class registry.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    namespace: Option<String>,
    classes: Vec<ClassDescriptor>,
    by_name: HashMap<String, ClassId>,
}

impl Model {
    /// Link and flatten the output of a [`SchemaBuilder`].
    pub fn build(raw: RawSchema) -> Result<Self, BuildError> {
        let (name, namespace, mut classes) = raw.into_parts();

        let mut by_name = HashMap::with_capacity(classes.len() + BUILTIN_CLASSES.len());
        for class in &classes {
            if BUILTIN_CLASSES.contains(&class.name()) {
                return Err(BuildError::ReservedClassName {
                    name: class.name().to_string(),
                });
            }
            if by_name.insert(class.name().to_string(), class.id()).is_some() {
                return Err(SchemaError::DuplicateClass {
                    name: class.name().to_string(),
                }
                .into());
            }
        }

        for builtin in BUILTIN_CLASSES {
            let id = ClassId::new(classes.len());
            classes.push(ClassDescriptor::builtin(id, builtin));
            by_name.insert(builtin.to_string(), id);
        }

        let mut model = Self {
            name,
            namespace,
            classes,
            by_name,
        };

        resolve::link_parents(&mut model)?;
        resolve::compute_ancestors(&mut model)?;
        resolve::flatten_fields(&mut model);
        resolve::check_references(&model)?;

        debug!(
            model = %model.name,
            classes = model.classes.len() - BUILTIN_CLASSES.len(),
            "model built"
        );
        Ok(model)
    }

    /// Run a single declaration pass through a builder and build the result.
    pub fn from_declarations<I>(
        name: &str,
        namespace: Option<&str>,
        declarations: I,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let mut builder = SchemaBuilder::new(name, namespace);
        builder.apply_all(declarations)?;
        Self::build(builder.finish()?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Look a class up by name.
    ///
    /// Tries the name as given, then qualified with the model namespace, then
    /// with the namespace prefix stripped. The first match wins.
    pub fn get_class(&self, name: &str) -> Result<ClassRef<'_>, LookupError> {
        self.resolve_name(name)
            .map(|id| self.class_at(id))
            .ok_or_else(|| LookupError::UnknownClass {
                name: name.to_string(),
            })
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.resolve_name(name).is_some()
    }

    /// Class for an id handed out by this model.
    pub fn class_by_id(&self, id: ClassId) -> Option<ClassRef<'_>> {
        self.classes
            .get(id.index())
            .map(|class| ClassRef::new(self, class))
    }

    /// Every class the schema declared, in declaration order. Built-ins are
    /// not included.
    pub fn all_classes(&self) -> impl Iterator<Item = ClassRef<'_>> {
        self.classes
            .iter()
            .filter(|class| !class.is_builtin())
            .map(move |class| ClassRef::new(self, class))
    }

    /// Number of schema-declared classes.
    pub fn class_count(&self) -> usize {
        self.classes.iter().filter(|class| !class.is_builtin()).count()
    }

    /// Classes whose own fields (not inherited ones) include `field_name`.
    pub fn find_classes_declaring_field(&self, field_name: &str) -> Vec<ClassRef<'_>> {
        self.all_classes()
            .filter(|class| class.descriptor().own_field(field_name).is_some())
            .collect()
    }

    /// Some class with a reference field whose reverse link is `field_name`.
    ///
    /// When several classes match, which one is returned is unspecified.
    pub fn find_class_by_reverse_reference(&self, field_name: &str) -> Option<ClassRef<'_>> {
        self.all_classes().find(|class| {
            class
                .own_fields()
                .iter()
                .any(|field| field.is_reference() && field.reverse_field() == Some(field_name))
        })
    }

    /// True if `class` is `ancestor` or inherits from it.
    pub fn is_subclass_of(&self, class: &str, ancestor: &str) -> Result<bool, LookupError> {
        let class = self.get_class(class)?;
        let ancestor = self.get_class(ancestor)?;
        Ok(class.is_subclass_of(&ancestor))
    }

    /// Every class that is `name` or inherits from it.
    pub fn subclasses_of(&self, name: &str) -> Result<Vec<ClassRef<'_>>, LookupError> {
        let ancestor = self.get_class(name)?;
        Ok(self
            .classes
            .iter()
            .map(|class| ClassRef::new(self, class))
            .filter(|class| class.is_subclass_of(&ancestor))
            .collect())
    }

    /// Build a typed instance of `class_name` from untyped data.
    pub fn construct(&self, class_name: &str, data: impl Into<Data>) -> Result<Instance, CoercionError> {
        coerce::construct(self, class_name, data.into())
    }

    /// Class name with the namespace prefix removed.
    pub fn display_name<'a>(&self, name: &'a str) -> &'a str {
        self.namespace
            .as_deref()
            .and_then(|ns| name.strip_prefix(ns))
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(name)
    }

    fn resolve_name(&self, name: &str) -> Option<ClassId> {
        if let Some(&id) = self.by_name.get(name) {
            return Some(id);
        }
        let namespace = self.namespace.as_deref()?;
        if let Some(&id) = self.by_name.get(&format!("{namespace}.{name}")) {
            return Some(id);
        }
        let short = self.display_name(name);
        if short == name {
            return None;
        }
        self.by_name.get(short).copied()
    }

    fn class_at(&self, id: ClassId) -> ClassRef<'_> {
        ClassRef::new(self, &self.classes[id.index()])
    }

    fn field_at(&self, id: FieldId) -> &FieldDescriptor {
        &self.classes[id.class.index()].own_fields()[id.index]
    }
}
