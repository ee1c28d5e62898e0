//! Output formatting for construct command results.
//!
//! Instances render as an indented tree: attributes inline, references and
//! collection elements as nested blocks.

use super::execute::ConstructResult;
use crate::coerce::{FieldValue, Instance, Value};
use crate::output::Outputable;

impl Outputable for ConstructResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();
        if self.instance.class_name() == self.requested {
            lines.push(format!("Instance of {}", self.requested));
        } else {
            lines.push(format!(
                "Instance of {} (requested {})",
                self.instance.class_name(),
                self.requested
            ));
        }
        lines.push(String::new());
        render_fields(&self.instance, 1, &mut lines);
        lines.join("\n")
    }
}

fn render_fields(instance: &Instance, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for (name, value) in instance.fields() {
        match value {
            FieldValue::Unset => lines.push(format!("{indent}{name}: -")),
            FieldValue::Attribute(value) => {
                lines.push(format!("{indent}{name}: {}", render_value(value)));
            }
            FieldValue::Reference(target) => {
                lines.push(format!("{indent}{name}: {}", target.class_name()));
                render_fields(target, depth + 1, lines);
            }
            FieldValue::Collection(items) => {
                lines.push(format!("{indent}{name}: [{}]", items.len()));
                for (index, item) in items.iter().enumerate() {
                    lines.push(format!("{indent}  [{index}] {}", item.class_name()));
                    render_fields(item, depth + 2, lines);
                }
            }
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        Value::Date(d) => d.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
