//! Output formatting for subclass command results.

use super::execute::SubclassResult;
use crate::output::Outputable;

impl Outputable for SubclassResult {
    fn to_table(&self) -> String {
        if !self.is_subclass {
            return format!("{} is not a subclass of {}", self.class, self.ancestor);
        }
        let mut lines = vec![format!("{} is a subclass of {}", self.class, self.ancestor)];
        if self.path.len() > 1 {
            lines.push(format!("  {}", self.path.join(" -> ")));
        }
        lines.join("\n")
    }
}
