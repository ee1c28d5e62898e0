use std::error::Error;

use serde::Serialize;

use super::SubclassCmd;
use crate::commands::Execute;
use crate::model::{ClassRef, Model};

/// Result of the subclass command execution
#[derive(Debug, Default, Serialize)]
pub struct SubclassResult {
    pub class: String,
    pub ancestor: String,
    pub is_subclass: bool,
    /// Inheritance path from `class` up to `ancestor`, when one exists
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl Execute for SubclassCmd {
    type Output = SubclassResult;

    fn execute(self, model: &Model) -> Result<Self::Output, Box<dyn Error>> {
        let class = model.get_class(&self.class)?;
        let ancestor = model.get_class(&self.ancestor)?;
        let is_subclass = class.is_subclass_of(&ancestor);

        let path = if is_subclass {
            inheritance_path(class, ancestor)
        } else {
            Vec::new()
        };

        Ok(SubclassResult {
            class: class.name().to_string(),
            ancestor: ancestor.name().to_string(),
            is_subclass,
            path,
        })
    }
}

/// Walk up through the first parent that still reaches `ancestor`.
fn inheritance_path(class: ClassRef<'_>, ancestor: ClassRef<'_>) -> Vec<String> {
    let mut path = vec![class.name().to_string()];
    let mut current = class;
    while current != ancestor {
        let Some(next) = current.parents().find(|p| p.is_subclass_of(&ancestor)) else {
            break;
        };
        path.push(next.name().to_string());
        current = next;
    }
    path
}
