//! Output formatting for classes command results.

use super::execute::ClassesResult;
use crate::output::Outputable;

impl Outputable for ClassesResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        let header = match &self.declaring {
            Some(field) => format!("Classes declaring '{}' in {}", field, self.model),
            None => format!("Classes in {}", self.model),
        };
        lines.push(header);
        lines.push(String::new());

        if self.classes.is_empty() {
            lines.push("No classes found.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Found {} class(es):", self.classes.len()));
        for class in &self.classes {
            let extends = if class.parents.is_empty() {
                String::new()
            } else {
                format!(" extends {}", class.parents.join(", "))
            };
            lines.push(format!("  {}{} ({} fields)", class.name, extends, class.field_count));
        }

        lines.join("\n")
    }
}
