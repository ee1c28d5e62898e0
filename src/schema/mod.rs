//! Schema declarations and descriptors.
//!
//! # Overview
//!
//! 1. **Fields** (`field.rs`):
//!    - `FieldDescriptor` - one declared attribute, reference or collection
//!    - `ValueType` - the scalar type of an attribute
//!
//! 2. **Classes** (`class.rs`):
//!    - `ClassDescriptor` - name, parents, own fields and, after fix-up,
//!      the merged field map and ancestor chain
//!
//! 3. **Builder** (`builder.rs`):
//!    - `Declaration` - the class-open / field / class-close event stream
//!    - `SchemaBuilder` - folds events into a `RawSchema`
//!
//! 4. **Sources** (`source.rs`):
//!    - `SchemaDocument` - JSON schema documents turned into declarations
//!
//! The `RawSchema` is handed to [`crate::model::Model::build`], which links
//! and flattens it.

mod builder;
mod class;
mod field;
pub mod source;

pub use builder::{Declaration, DeclaredKind, FieldDeclaration, RawSchema, SchemaBuilder, SchemaError};
pub use class::{ClassDescriptor, ClassId};
pub use field::{FieldDescriptor, FieldId, FieldKind, Link, ValueType};
