//! Output formatting tests for classes command.

#[cfg(test)]
mod tests {
    use super::super::execute::{ClassSummary, ClassesResult};
    use rstest::{fixture, rstest};

    // =========================================================================
    // Expected outputs
    // =========================================================================

    const EMPTY_TABLE: &str = "\
Classes declaring 'salary' in company

No classes found.";

    const LISTING_TABLE: &str = "\
Classes in company

Found 2 class(es):
  Employee (2 fields)
  Manager extends Employee (3 fields)";

    // =========================================================================
    // Fixtures
    // =========================================================================

    #[fixture]
    fn empty_result() -> ClassesResult {
        ClassesResult {
            model: "company".to_string(),
            declaring: Some("salary".to_string()),
            classes: vec![],
        }
    }

    #[fixture]
    fn listing_result() -> ClassesResult {
        ClassesResult {
            model: "company".to_string(),
            declaring: None,
            classes: vec![
                ClassSummary {
                    name: "Employee".to_string(),
                    parents: vec![],
                    field_count: 2,
                },
                ClassSummary {
                    name: "Manager".to_string(),
                    parents: vec!["Employee".to_string()],
                    field_count: 3,
                },
            ],
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: ClassesResult,
        expected: EMPTY_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_listing,
        fixture: listing_result,
        fixture_type: ClassesResult,
        expected: LISTING_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: listing_result,
        fixture_type: ClassesResult,
        assertions: {
            "model": "company",
            "classes": serde_json::json!([
                {"name": "Employee", "parents": [], "field_count": 2},
                {"name": "Manager", "parents": ["Employee"], "field_count": 3}
            ]),
        },
    }

    #[rstest]
    fn test_json_omits_missing_filter(listing_result: ClassesResult) {
        use crate::output::{OutputFormat, Outputable};
        let parsed: serde_json::Value =
            serde_json::from_str(&listing_result.format(OutputFormat::Json)).unwrap();
        assert!(parsed.get("declaring").is_none());
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: listing_result,
        fixture_type: ClassesResult,
        contains: ["model: company", "Manager"],
    }
}
