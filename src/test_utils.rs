//! Shared test utilities for execute and integration tests.
//!
//! This module provides common helpers used across command execute tests.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::fixtures;
use crate::model::Model;
use crate::schema::source::{SchemaDocument, build_model};

/// Create a temporary file containing the given content.
///
/// Used to create schema and data files for loading tests.
pub fn create_temp_json_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Build a model from schema documents given as JSON strings, one pass each.
pub fn model_from_json(documents: &[&str]) -> Model {
    let documents: Vec<SchemaDocument> = documents
        .iter()
        .map(|json| SchemaDocument::from_json(json).expect("Fixture should parse"))
        .collect();
    build_model(&documents).expect("Fixture should build")
}

// =============================================================================
// Fixture-based helpers
// =============================================================================

/// The base company model.
///
/// Use for: classes, describe, subclass, reverse, construct
pub fn company_model() -> Model {
    model_from_json(&[fixtures::COMPANY])
}
