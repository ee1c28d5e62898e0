//! Construction of typed instances from untyped data.
//!
//! [`construct`] walks a [`Data`] tree against a model class and returns an
//! [`Instance`] in which every visible field is either coerced or unset.
//! Nothing is written to the model, so any number of constructions can run
//! against one shared model at once.
//!
//! Input is strict: a key that names no field of the class is an error, and
//! so is a value that cannot be coerced to its field's declared type.

mod data;
mod engine;
mod instance;
mod scalar;

pub use data::{Data, Scalar};
pub use engine::{CLASS_KEY, construct};
pub use instance::{FieldValue, Instance, Value};

use thiserror::Error;

use crate::model::LookupError;

/// Failure while constructing one instance tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Class '{class}' has no field '{field}'")]
    UnknownField { class: String, field: String },

    #[error("Field '{class}.{field}' expects {expected}, got {value}")]
    TypeMismatch {
        class: String,
        field: String,
        expected: String,
        value: String,
    },

    #[error("Class '{class}' must be built from an object, got {found}")]
    ExpectedObject { class: String, found: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::schema::Declaration;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn company() -> Model {
        Model::from_declarations(
            "company",
            None,
            vec![
                Declaration::class_open("Employee", &[]),
                Declaration::attribute("name", "java.lang.String"),
                Declaration::attribute("age", "java.lang.Integer"),
                Declaration::attribute("hired", "java.util.Date"),
                Declaration::reference("department", "Department", Some("employees")),
                Declaration::class_close(),
                Declaration::class_open("Manager", &["Employee"]),
                Declaration::attribute("age", "java.lang.String"),
                Declaration::collection("reports", "Employee", None),
                Declaration::class_close(),
                Declaration::class_open("Department", &[]),
                Declaration::attribute("name", "java.lang.String"),
                Declaration::attribute("budget", "java.lang.Double"),
                Declaration::reference("head", "Manager", None),
                Declaration::collection("employees", "Employee", Some("department")),
                Declaration::class_close(),
                Declaration::class_open("Note", &[]),
                Declaration::attribute("class", "java.lang.String"),
                Declaration::attribute("payload", "java.lang.Object"),
                Declaration::class_close(),
            ],
        )
        .expect("company model should build")
    }

    #[rstest]
    fn test_manager_with_reports(company: Model) {
        let manager = company
            .construct(
                "Manager",
                json!({"name": "Asha", "reports": [{"name": "Bo"}, {"name": "Cy"}]}),
            )
            .unwrap();

        assert_eq!(manager.class_name(), "Manager");
        assert_eq!(manager.str("name"), Some("Asha"));
        let reports = manager.collection("reports").unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].class_name(), "Employee");
        assert_eq!(reports[0].str("name"), Some("Bo"));
        assert_eq!(reports[1].str("name"), Some("Cy"));
    }

    #[rstest]
    fn test_unknown_field(company: Model) {
        let err = company.construct("Employee", json!({"nickname": "Bo"})).unwrap_err();
        assert_eq!(
            err,
            CoercionError::UnknownField {
                class: "Employee".to_string(),
                field: "nickname".to_string()
            }
        );
    }

    #[rstest]
    fn test_unknown_class(company: Model) {
        let err = company.construct("Intern", json!({})).unwrap_err();
        assert!(matches!(err, CoercionError::Lookup(LookupError::UnknownClass { .. })));
    }

    #[rstest]
    fn test_every_field_present(company: Model) {
        let employee = company.construct("Employee", json!({"name": "Bo"})).unwrap();
        let names: Vec<_> = employee.fields().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["age", "department", "hired", "name"]);
        assert!(!employee.is_set("age"));
        assert_eq!(employee.get("department"), Some(&FieldValue::Unset));
    }

    #[rstest]
    fn test_declared_type_coercion(company: Model) {
        let employee = company
            .construct("Employee", json!({"name": "Bo", "age": "42", "hired": "2021-06-01"}))
            .unwrap();
        assert_eq!(employee.attribute("age"), Some(&Value::Integer(42)));
        assert_eq!(
            employee.attribute("hired").and_then(Value::as_date).map(|d| d.to_string()),
            Some("2021-06-01".to_string())
        );
    }

    #[rstest]
    fn test_own_field_definition_used(company: Model) {
        let manager = company.construct("Manager", json!({"age": 42})).unwrap();
        assert_eq!(manager.attribute("age"), Some(&Value::String("42".to_string())));

        let employee = company.construct("Employee", json!({"age": 42})).unwrap();
        assert_eq!(employee.attribute("age"), Some(&Value::Integer(42)));
    }

    #[rstest]
    fn test_type_mismatch_names_field(company: Model) {
        let err = company
            .construct("Employee", json!({"hired": "yesterday"}))
            .unwrap_err();
        assert_eq!(
            err,
            CoercionError::TypeMismatch {
                class: "Employee".to_string(),
                field: "hired".to_string(),
                expected: "date".to_string(),
                value: "\"yesterday\"".to_string()
            }
        );
    }

    #[rstest]
    fn test_attribute_rejects_object(company: Model) {
        let err = company
            .construct("Employee", json!({"name": {"first": "Bo"}}))
            .unwrap_err();
        assert!(matches!(err, CoercionError::TypeMismatch { ref field, .. } if field == "name"));
    }

    #[rstest]
    fn test_nested_reference(company: Model) {
        let employee = company
            .construct(
                "Employee",
                json!({"name": "Bo", "department": {"name": "R&D", "budget": 1000}}),
            )
            .unwrap();
        let department = employee.reference("department").unwrap();
        assert_eq!(department.class_name(), "Department");
        assert_eq!(department.attribute("budget"), Some(&Value::Double(1000.0)));
    }

    #[rstest]
    fn test_nested_errors_name_inner_class(company: Model) {
        let err = company
            .construct("Employee", json!({"department": {"name": "R&D", "floor": 3}}))
            .unwrap_err();
        assert_eq!(
            err,
            CoercionError::UnknownField {
                class: "Department".to_string(),
                field: "floor".to_string()
            }
        );
    }

    #[rstest]
    fn test_reference_rejects_list(company: Model) {
        let err = company
            .construct("Employee", json!({"department": [{"name": "R&D"}]}))
            .unwrap_err();
        assert!(matches!(err, CoercionError::TypeMismatch { ref field, .. } if field == "department"));
    }

    #[rstest]
    fn test_collection_rejects_single_object(company: Model) {
        let err = company
            .construct("Manager", json!({"reports": {"name": "Bo"}}))
            .unwrap_err();
        match err {
            CoercionError::TypeMismatch { class, field, expected, .. } => {
                assert_eq!(class, "Manager");
                assert_eq!(field, "reports");
                assert_eq!(expected, "list of Employee");
            }
            other => panic!("Expected TypeMismatch, got {other:?}"),
        }
    }

    #[rstest]
    fn test_collection_rejects_scalar_elements(company: Model) {
        let err = company
            .construct("Manager", json!({"reports": ["Bo"]}))
            .unwrap_err();
        assert!(matches!(err, CoercionError::TypeMismatch { ref field, .. } if field == "reports"));
    }

    #[rstest]
    fn test_empty_collection_and_nulls(company: Model) {
        let manager = company
            .construct("Manager", json!({"name": null, "reports": [], "department": null}))
            .unwrap();
        assert_eq!(manager.collection("reports"), Some(&[][..]));
        assert!(!manager.is_set("name"));
        assert!(!manager.is_set("department"));
    }

    #[rstest]
    fn test_collection_keeps_order_and_duplicates(company: Model) {
        let manager = company
            .construct(
                "Manager",
                json!({"reports": [{"name": "Cy"}, {"name": "Bo"}, {"name": "Cy"}]}),
            )
            .unwrap();
        let names: Vec<_> = manager
            .collection("reports")
            .unwrap()
            .iter()
            .filter_map(|e| e.str("name"))
            .collect();
        assert_eq!(names, vec!["Cy", "Bo", "Cy"]);
    }

    #[rstest]
    fn test_class_override_to_subclass(company: Model) {
        let department = company
            .construct(
                "Department",
                json!({"employees": [{"name": "Bo"}, {"class": "Manager", "name": "Asha", "reports": []}]}),
            )
            .unwrap();
        let employees = department.collection("employees").unwrap();
        assert_eq!(employees[0].class_name(), "Employee");
        assert_eq!(employees[1].class_name(), "Manager");
        assert!(employees[1].collection("reports").is_some());
    }

    #[rstest]
    fn test_class_override_to_unrelated_class_rejected(company: Model) {
        let err = company
            .construct("Department", json!({"head": {"class": "Employee", "name": "Bo"}}))
            .unwrap_err();
        assert_eq!(
            err,
            CoercionError::TypeMismatch {
                class: "Manager".to_string(),
                field: "class".to_string(),
                expected: "subclass of Manager".to_string(),
                value: "Employee".to_string()
            }
        );
    }

    #[rstest]
    fn test_class_override_at_top_level(company: Model) {
        let instance = company
            .construct("Employee", json!({"class": "Manager", "name": "Asha"}))
            .unwrap();
        assert_eq!(instance.class_name(), "Manager");
    }

    #[rstest]
    fn test_class_override_unknown_class(company: Model) {
        let err = company
            .construct("Employee", json!({"class": "Robot"}))
            .unwrap_err();
        assert!(matches!(err, CoercionError::Lookup(_)));
    }

    #[rstest]
    #[case(json!(3))]
    #[case(json!(["Manager"]))]
    #[case(json!({"name": "Manager"}))]
    fn test_class_override_must_be_a_name(company: Model, #[case] requested: serde_json::Value) {
        let err = company
            .construct("Employee", json!({"class": requested, "name": "Bo"}))
            .unwrap_err();
        assert!(matches!(
            err,
            CoercionError::TypeMismatch { ref class, ref field, ref expected, .. }
                if class == "Employee" && field == "class" && expected == "class name"
        ));
    }

    #[rstest]
    fn test_class_key_is_data_when_declared(company: Model) {
        let note = company
            .construct("Note", json!({"class": "Manager", "payload": [1, 2]}))
            .unwrap_err();
        // `payload` is an untyped attribute, so a list is still not a scalar.
        assert!(matches!(note, CoercionError::TypeMismatch { ref field, .. } if field == "payload"));

        let note = company.construct("Note", json!({"class": "Manager", "payload": 7})).unwrap();
        assert_eq!(note.class_name(), "Note");
        assert_eq!(note.str("class"), Some("Manager"));
        assert_eq!(note.attribute("payload"), Some(&Value::Any(Scalar::Int(7))));
    }

    #[rstest]
    fn test_existing_instance_as_reference(company: Model) {
        let head = company.construct("Manager", json!({"name": "Asha"})).unwrap();
        let department = company
            .construct(
                "Department",
                Data::map([("name", Data::from("R&D")), ("head", Data::from(head.clone()))]),
            )
            .unwrap();
        assert_eq!(department.reference("head"), Some(&head));
    }

    #[rstest]
    fn test_existing_instance_of_wrong_class_rejected(company: Model) {
        let employee = company.construct("Employee", json!({"name": "Bo"})).unwrap();
        let err = company
            .construct("Department", Data::map([("head", Data::from(employee))]))
            .unwrap_err();
        assert_eq!(
            err,
            CoercionError::TypeMismatch {
                class: "Department".to_string(),
                field: "head".to_string(),
                expected: "instance of Manager".to_string(),
                value: "instance of Employee".to_string()
            }
        );
    }

    #[rstest]
    fn test_top_level_must_be_object(company: Model) {
        let err = company.construct("Employee", json!([{"name": "Bo"}])).unwrap_err();
        assert_eq!(
            err,
            CoercionError::ExpectedObject {
                class: "Employee".to_string(),
                found: "list of 1 item(s)".to_string()
            }
        );
    }

    #[rstest]
    fn test_round_trip_values(company: Model) {
        let input = json!({
            "name": "R&D",
            "budget": 2.5,
            "head": {"name": "Asha", "age": "lead"},
            "employees": [{"name": "Bo", "age": 30, "hired": "2020-01-15"}]
        });
        let department = company.construct("Department", input).unwrap();
        let json = serde_json::to_value(&department).unwrap();

        assert_eq!(json["fields"]["name"], "R&D");
        assert_eq!(json["fields"]["budget"], 2.5);
        assert_eq!(json["fields"]["head"]["fields"]["age"], "lead");
        assert_eq!(json["fields"]["employees"][0]["fields"]["age"], 30);
        assert_eq!(json["fields"]["employees"][0]["fields"]["hired"], "2020-01-15");
    }

    #[rstest]
    fn test_concurrent_construction(company: Model) {
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let model = &company;
                    scope.spawn(move || {
                        model
                            .construct("Employee", json!({"name": format!("E{i}"), "age": i}))
                            .unwrap()
                    })
                })
                .collect();
            for (i, handle) in handles.into_iter().enumerate() {
                let employee = handle.join().unwrap();
                assert_eq!(employee.str("name"), Some(format!("E{i}").as_str()));
            }
        });
    }
}
