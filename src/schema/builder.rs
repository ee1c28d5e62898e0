//! Declaration events and the builder that folds them into class shells.
//!
//! Events arrive as a flat sequence: a class opens, its fields follow, the
//! class closes. Classes never nest.
//!
//! Events may be split into declaration passes, one per schema document.
//! Re-opening a class from an earlier pass extends it, and a field already
//! declared in an earlier pass is skipped so re-registering the same
//! document changes nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::class::{ClassDescriptor, ClassId};
use super::field::FieldDescriptor;

/// Malformed declaration sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Field '{field}' declared outside of any class")]
    FieldOutsideClass { field: String },

    #[error("Class '{name}' is declared more than once")]
    DuplicateClass { name: String },

    #[error("Field '{field}' is declared more than once in class '{class}'")]
    DuplicateField { class: String, field: String },

    #[error("Class '{name}' opened while class '{open}' is still open")]
    NestedClass { name: String, open: String },

    #[error("Class close without a matching class open")]
    UnmatchedClose,

    #[error("Class '{name}' was never closed")]
    UnclosedClass { name: String },
}

/// Kind of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredKind {
    Attribute,
    Reference,
    Collection,
}

/// A field declaration as produced by a schema source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub kind: DeclaredKind,
    pub name: String,
    /// Declared scalar type for attributes, referenced class otherwise
    pub type_name: String,
    pub reverse_field: Option<String>,
}

/// One schema declaration event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    ClassOpen { name: String, parents: Vec<String> },
    Field(FieldDeclaration),
    ClassClose,
}

impl Declaration {
    pub fn class_open(name: &str, parents: &[&str]) -> Self {
        Self::ClassOpen {
            name: name.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn attribute(name: &str, declared_type: &str) -> Self {
        Self::field(DeclaredKind::Attribute, name, declared_type, None)
    }

    pub fn reference(name: &str, referenced_class: &str, reverse_field: Option<&str>) -> Self {
        Self::field(DeclaredKind::Reference, name, referenced_class, reverse_field)
    }

    pub fn collection(name: &str, referenced_class: &str, reverse_field: Option<&str>) -> Self {
        Self::field(DeclaredKind::Collection, name, referenced_class, reverse_field)
    }

    pub fn class_close() -> Self {
        Self::ClassClose
    }

    fn field(kind: DeclaredKind, name: &str, type_name: &str, reverse_field: Option<&str>) -> Self {
        Self::Field(FieldDeclaration {
            kind,
            name: name.to_string(),
            type_name: type_name.to_string(),
            reverse_field: reverse_field.map(str::to_string),
        })
    }
}

/// Output of the builder: class shells not yet linked or flattened.
///
/// Each class sits at the position its id names. Only the builder creates
/// one, so that holds for every `RawSchema` a model is built from.
#[derive(Debug, Clone)]
pub struct RawSchema {
    name: String,
    namespace: Option<String>,
    classes: Vec<ClassDescriptor>,
}

impl RawSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Class shells in id order.
    pub fn classes(&self) -> &[ClassDescriptor] {
        &self.classes
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>, Vec<ClassDescriptor>) {
        (self.name, self.namespace, self.classes)
    }
}

struct Shell {
    class: ClassDescriptor,
    opened_in: u32,
    field_passes: HashMap<String, u32>,
}

/// Folds declaration events into class shells.
pub struct SchemaBuilder {
    name: String,
    namespace: Option<String>,
    pass: u32,
    shells: Vec<Shell>,
    by_name: HashMap<String, usize>,
    open: Option<usize>,
}

impl SchemaBuilder {
    pub fn new(name: &str, namespace: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            pass: 0,
            shells: Vec::new(),
            by_name: HashMap::new(),
            open: None,
        }
    }

    /// Current declaration pass, starting at 0.
    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Start the next declaration pass.
    pub fn begin_pass(&mut self) -> Result<(), SchemaError> {
        if let Some(open) = self.open {
            return Err(SchemaError::UnclosedClass {
                name: self.shells[open].class.name().to_string(),
            });
        }
        self.pass += 1;
        debug!(pass = self.pass, "starting declaration pass");
        Ok(())
    }

    /// Feed a whole sequence of events.
    pub fn apply_all<I>(&mut self, declarations: I) -> Result<(), SchemaError>
    where
        I: IntoIterator<Item = Declaration>,
    {
        for declaration in declarations {
            self.apply(declaration)?;
        }
        Ok(())
    }

    /// Feed one event.
    pub fn apply(&mut self, declaration: Declaration) -> Result<(), SchemaError> {
        match declaration {
            Declaration::ClassOpen { name, parents } => self.open_class(&name, parents),
            Declaration::Field(field) => self.declare_field(field),
            Declaration::ClassClose => self.close_class(),
        }
    }

    /// Finish building. Fails if a class is still open.
    pub fn finish(self) -> Result<RawSchema, SchemaError> {
        if let Some(open) = self.open {
            return Err(SchemaError::UnclosedClass {
                name: self.shells[open].class.name().to_string(),
            });
        }

        debug!(
            model = %self.name,
            classes = self.shells.len(),
            passes = self.pass + 1,
            "schema declarations complete"
        );

        Ok(RawSchema {
            name: self.name,
            namespace: self.namespace,
            classes: self.shells.into_iter().map(|shell| shell.class).collect(),
        })
    }

    fn open_class(&mut self, name: &str, parents: Vec<String>) -> Result<(), SchemaError> {
        if let Some(open) = self.open {
            return Err(SchemaError::NestedClass {
                name: name.to_string(),
                open: self.shells[open].class.name().to_string(),
            });
        }

        if let Some(&index) = self.by_name.get(name) {
            let shell = &mut self.shells[index];
            if shell.opened_in == self.pass {
                return Err(SchemaError::DuplicateClass {
                    name: name.to_string(),
                });
            }
            debug!(class = name, pass = self.pass, "reopening class");
            shell.opened_in = self.pass;
            for parent in &parents {
                shell.class.add_parent_name(parent);
            }
            self.open = Some(index);
            return Ok(());
        }

        let index = self.shells.len();
        debug!(class = name, parents = ?parents, "declaring class");
        self.shells.push(Shell {
            class: ClassDescriptor::new(ClassId::new(index), name, parents),
            opened_in: self.pass,
            field_passes: HashMap::new(),
        });
        self.by_name.insert(name.to_string(), index);
        self.open = Some(index);
        Ok(())
    }

    fn declare_field(&mut self, field: FieldDeclaration) -> Result<(), SchemaError> {
        let Some(open) = self.open else {
            return Err(SchemaError::FieldOutsideClass { field: field.name });
        };
        let shell = &mut self.shells[open];
        let class_name = shell.class.name().to_string();

        if let Some(&declared_in) = shell.field_passes.get(&field.name) {
            if declared_in == self.pass {
                return Err(SchemaError::DuplicateField {
                    class: class_name,
                    field: field.name,
                });
            }
            warn!(
                class = %class_name,
                field = %field.name,
                "ignoring field already declared in an earlier pass"
            );
            return Ok(());
        }

        let id = shell.class.id();
        let reverse = field.reverse_field.as_deref();
        let descriptor = match field.kind {
            DeclaredKind::Attribute => FieldDescriptor::attribute(&field.name, &field.type_name, id),
            DeclaredKind::Reference => {
                FieldDescriptor::reference(&field.name, &field.type_name, reverse, id)
            }
            DeclaredKind::Collection => {
                FieldDescriptor::collection(&field.name, &field.type_name, reverse, id)
            }
        };
        trace!(class = %class_name, field = %field.name, kind = descriptor.kind_name(), "declaring field");

        shell.field_passes.insert(field.name, self.pass);
        shell.class.push_field(descriptor);
        Ok(())
    }

    fn close_class(&mut self) -> Result<(), SchemaError> {
        match self.open.take() {
            Some(_) => Ok(()),
            None => Err(SchemaError::UnmatchedClose),
        }
    }
}
