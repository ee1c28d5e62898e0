//! JSON schema documents.
//!
//! A document lists classes with their parents and fields. Each document is
//! replayed as one declaration pass, so a later document can extend classes
//! from an earlier one.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::builder::{Declaration, DeclaredKind, FieldDeclaration, SchemaBuilder};
use crate::model::{BuildError, Model};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read schema file '{path}': {message}")]
    FileReadFailed { path: String, message: String },

    #[error("Failed to parse schema JSON in '{path}': {message}")]
    JsonParseFailed { path: String, message: String },

    #[error("No schema documents given")]
    NoSchemaFiles,

    #[error(transparent)]
    Build(#[from] BuildError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDocument {
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDocument>,
}

/// Field entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldDocument {
    Attribute {
        name: String,
        #[serde(rename = "type")]
        value_type: String,
    },
    Reference {
        name: String,
        referenced_type: String,
        #[serde(default)]
        reverse_reference: Option<String>,
    },
    Collection {
        name: String,
        referenced_type: String,
        #[serde(default)]
        reverse_reference: Option<String>,
    },
}

impl FieldDocument {
    fn declaration(&self) -> FieldDeclaration {
        let (kind, name, type_name, reverse_field) = match self {
            Self::Attribute { name, value_type } => (DeclaredKind::Attribute, name, value_type, None),
            Self::Reference {
                name,
                referenced_type,
                reverse_reference,
            } => (DeclaredKind::Reference, name, referenced_type, reverse_reference.clone()),
            Self::Collection {
                name,
                referenced_type,
                reverse_reference,
            } => (DeclaredKind::Collection, name, referenced_type, reverse_reference.clone()),
        };
        FieldDeclaration {
            kind,
            name: name.clone(),
            type_name: type_name.clone(),
            reverse_field,
        }
    }
}

impl SchemaDocument {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Read and parse one document from disk.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path).map_err(|e| SourceError::FileReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| SourceError::JsonParseFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// The declaration events for this document, in document order.
    pub fn declarations(&self) -> Vec<Declaration> {
        let mut events = Vec::new();
        for class in &self.classes {
            events.push(Declaration::ClassOpen {
                name: class.name.clone(),
                parents: class.extends.clone(),
            });
            events.extend(class.fields.iter().map(|f| Declaration::Field(f.declaration())));
            events.push(Declaration::ClassClose);
        }
        events
    }
}

/// Build a model from documents, one declaration pass per document.
///
/// The first document names the model.
pub fn build_model(documents: &[SchemaDocument]) -> Result<Model, SourceError> {
    let (first, rest) = documents.split_first().ok_or(SourceError::NoSchemaFiles)?;

    let mut builder = SchemaBuilder::new(&first.name, first.namespace.as_deref());
    builder.apply_all(first.declarations()).map_err(BuildError::from)?;
    for document in rest {
        builder.begin_pass().map_err(BuildError::from)?;
        builder.apply_all(document.declarations()).map_err(BuildError::from)?;
    }

    let raw = builder.finish().map_err(BuildError::from)?;
    Ok(Model::build(raw)?)
}

/// Read schema files and build a model from them, in the given order.
pub fn load_model<P: AsRef<Path>>(paths: &[P]) -> Result<Model, SourceError> {
    let documents = paths
        .iter()
        .map(|path| SchemaDocument::load(path.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(files = documents.len(), "schema documents loaded");
    build_model(&documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASE: &str = r#"{
        "name": "company",
        "namespace": "org.example",
        "classes": [
            {
                "name": "Employee",
                "fields": [
                    { "kind": "attribute", "name": "name", "type": "java.lang.String" },
                    { "kind": "attribute", "name": "age", "type": "java.lang.Integer" },
                    { "kind": "reference", "name": "department",
                      "referenced_type": "Department", "reverse_reference": "employees" }
                ]
            },
            {
                "name": "Department",
                "fields": [
                    { "kind": "attribute", "name": "name", "type": "java.lang.String" },
                    { "kind": "collection", "name": "employees", "referenced_type": "Employee" }
                ]
            }
        ]
    }"#;

    const ADDITIONS: &str = r#"{
        "name": "additions",
        "classes": [
            {
                "name": "Manager",
                "extends": ["Employee"],
                "fields": [
                    { "kind": "collection", "name": "reports",
                      "referenced_type": "Employee", "reverse_reference": "manager" }
                ]
            },
            {
                "name": "Employee",
                "fields": [
                    { "kind": "attribute", "name": "name", "type": "java.lang.String" },
                    { "kind": "attribute", "name": "email", "type": "String" }
                ]
            }
        ]
    }"#;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_declarations_follow_document_order() {
        let doc = SchemaDocument::from_json(BASE).unwrap();
        let events = doc.declarations();
        assert_eq!(events.len(), 9);
        assert_eq!(events[0], Declaration::class_open("Employee", &[]));
        assert_eq!(events[1], Declaration::attribute("name", "java.lang.String"));
        assert_eq!(
            events[3],
            Declaration::reference("department", "Department", Some("employees"))
        );
        assert_eq!(events[4], Declaration::class_close());
        assert_eq!(events[7], Declaration::collection("employees", "Employee", None));
    }

    #[test]
    fn test_missing_optional_keys() {
        let doc = SchemaDocument::from_json(r#"{"name": "empty"}"#).unwrap();
        assert_eq!(doc.namespace, None);
        assert!(doc.classes.is_empty());
        assert!(doc.declarations().is_empty());
    }

    #[test]
    fn test_unknown_field_kind_rejected() {
        let json = r#"{"name": "m", "classes": [{"name": "A", "fields": [{"kind": "map", "name": "x"}]}]}"#;
        assert!(SchemaDocument::from_json(json).is_err());
    }

    #[test]
    fn test_build_model_single_document() {
        let doc = SchemaDocument::from_json(BASE).unwrap();
        let model = build_model(&[doc]).unwrap();
        assert_eq!(model.name(), "company");
        assert_eq!(model.namespace(), Some("org.example"));
        assert_eq!(model.class_count(), 2);
        assert_eq!(
            model.find_class_by_reverse_reference("employees").map(|c| c.name()),
            Some("Employee")
        );
    }

    #[test]
    fn test_later_document_extends_classes() {
        let docs = [
            SchemaDocument::from_json(BASE).unwrap(),
            SchemaDocument::from_json(ADDITIONS).unwrap(),
        ];
        let model = build_model(&docs).unwrap();

        assert_eq!(model.name(), "company");
        let employee = model.get_class("Employee").unwrap();
        let names: Vec<_> = employee.field_names().collect();
        assert_eq!(names, vec!["age", "department", "email", "name"]);

        let manager = model.get_class("Manager").unwrap();
        assert!(manager.has_field("email"));
        assert!(model.is_subclass_of("Manager", "Employee").unwrap());
    }

    #[test]
    fn test_same_document_twice_is_idempotent() {
        let doc = SchemaDocument::from_json(BASE).unwrap();
        let once = build_model(std::slice::from_ref(&doc)).unwrap();
        let twice = build_model(&[doc.clone(), doc]).unwrap();

        let fields = |m: &Model| -> Vec<String> {
            m.get_class("Employee").unwrap().field_names().map(str::to_string).collect()
        };
        assert_eq!(fields(&once), fields(&twice));
        assert_eq!(once.class_count(), twice.class_count());
    }

    #[test]
    fn test_no_documents() {
        assert!(matches!(build_model(&[]), Err(SourceError::NoSchemaFiles)));
    }

    #[test]
    fn test_duplicate_class_in_one_document() {
        let json = r#"{"name": "m", "classes": [{"name": "A"}, {"name": "A"}]}"#;
        let doc = SchemaDocument::from_json(json).unwrap();
        let err = build_model(&[doc]).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Build(BuildError::Schema(SchemaError::DuplicateClass { .. }))
        ));
    }

    #[test]
    fn test_load_model_from_files() {
        let base = temp_file(BASE);
        let additions = temp_file(ADDITIONS);
        let model = load_model(&[base.path(), additions.path()]).unwrap();
        assert!(model.has_class("Manager"));
        assert_eq!(model.class_count(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_model(&["/nonexistent/schema.json"]).unwrap_err();
        match err {
            SourceError::FileReadFailed { path, .. } => assert_eq!(path, "/nonexistent/schema.json"),
            other => panic!("Expected FileReadFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_json() {
        let file = temp_file("{ not json }");
        let err = load_model(&[file.path()]).unwrap_err();
        assert!(matches!(err, SourceError::JsonParseFailed { .. }));
        assert!(err.to_string().contains("Failed to parse schema JSON"));
    }
}
