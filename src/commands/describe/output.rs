//! Output formatting for describe command results.

use super::execute::ClassDescription;
use crate::output::{Outputable, join_or_dash};

impl Outputable for ClassDescription {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        match &self.namespace {
            Some(ns) => lines.push(format!("Class: {} ({})", self.name, ns)),
            None => lines.push(format!("Class: {}", self.name)),
        }
        lines.push(String::new());
        lines.push(format!("Parents:    {}", join_or_dash(&self.parents)));
        lines.push(format!("Ancestors:  {}", join_or_dash(&self.ancestors)));
        lines.push(format!("Subclasses: {}", join_or_dash(&self.subclasses)));
        lines.push(String::new());

        if self.fields.is_empty() {
            lines.push("No fields.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Fields ({}):", self.fields.len()));
        let name_width = self.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
        let kind_width = self.fields.iter().map(|f| f.kind.len()).max().unwrap_or(0);
        for field in &self.fields {
            let mut line = format!(
                "  {:<name_width$}  {:<kind_width$}  {}",
                field.name, field.kind, field.type_name
            );
            if let Some(reverse) = &field.reverse {
                line.push_str(&format!(" <-> {}", reverse));
            }
            if field.declared_in != self.name {
                line.push_str(&format!("  [from {}]", field.declared_in));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}
