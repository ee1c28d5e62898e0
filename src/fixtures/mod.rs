//! Test fixtures for schema and command tests.
//!
//! Schema documents are loaded at compile time using `include_str!`.
//!
//! ## Available Fixtures
//!
//! - [`COMPANY`] - Base company schema
//! - [`COMPANY_ADDITIONS`] - A second document that extends the base

/// Company schema in the `org.example` namespace.
///
/// Contains:
/// - `Named` with a `name` attribute
/// - `Employee` and `Department`, both extending `Named`
/// - `Manager` extending `Employee`, with a `reports` collection
/// - References `department`, `manager` and `head`, with reverse links
///   `employees` and `reports`
pub const COMPANY: &str = include_str!("company.json");

/// Additions layered over [`COMPANY`] as a second declaration pass.
///
/// Contains:
/// - `Contractor` extending `Employee`
/// - `Employee` re-opened: `age` repeated (ignored), `active` added
pub const COMPANY_ADDITIONS: &str = include_str!("company_additions.json");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::source::SchemaDocument;

    #[test]
    fn test_company_is_valid_document() {
        let doc = SchemaDocument::from_json(COMPANY).expect("COMPANY should parse");
        assert_eq!(doc.classes.len(), 4);
    }

    #[test]
    fn test_additions_is_valid_document() {
        let doc = SchemaDocument::from_json(COMPANY_ADDITIONS).expect("COMPANY_ADDITIONS should parse");
        assert_eq!(doc.classes.len(), 2);
    }
}
