//! Output formatting for reverse command results.

use super::execute::ReverseResult;
use crate::output::Outputable;

impl Outputable for ReverseResult {
    fn to_table(&self) -> String {
        let header = format!("Reverse reference: {}", self.reverse_field);
        let Some(class) = &self.class else {
            return format!("{}\n\nNo reference declares this reverse field.", header);
        };

        let mut lines = vec![header, String::new(), format!("Declared on: {}", class)];
        if let (Some(reference), Some(target)) = (&self.reference, &self.referenced_class) {
            lines.push(format!("  {}.{} -> {}", class, reference, target));
        }
        lines.join("\n")
    }
}
