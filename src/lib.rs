//! schema_model library - class models built from schema declarations
//!
//! Provides the declaration builder, the linked and flattened class model,
//! construction of typed instances from untyped data, and the command and
//! output layers behind the `schema_model` binary.

pub mod cli;
pub mod coerce;
pub mod commands;
pub mod config;
pub mod model;
pub mod output;
pub mod schema;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
pub mod test_utils;

use thiserror::Error;

pub use coerce::{CoercionError, Data, FieldValue, Instance, Scalar, Value};
pub use model::{BuildError, ClassRef, LookupError, Model};
pub use schema::source::{SchemaDocument, SourceError, build_model, load_model};
pub use schema::{Declaration, SchemaBuilder, SchemaError};

/// Any error raised by the library.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
