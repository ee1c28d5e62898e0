use std::error::Error;

use serde::Serialize;

use super::ClassesCmd;
use crate::commands::Execute;
use crate::model::{ClassRef, Model};

/// One class in a listing
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub name: String,
    pub parents: Vec<String>,
    pub field_count: usize,
}

impl ClassSummary {
    fn from_class(class: ClassRef<'_>) -> Self {
        Self {
            name: class.name().to_string(),
            parents: class.parent_names().to_vec(),
            field_count: class.field_count(),
        }
    }
}

/// Result of the classes command execution
#[derive(Debug, Default, Serialize)]
pub struct ClassesResult {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaring: Option<String>,
    pub classes: Vec<ClassSummary>,
}

impl Execute for ClassesCmd {
    type Output = ClassesResult;

    fn execute(self, model: &Model) -> Result<Self::Output, Box<dyn Error>> {
        let classes = match &self.declaring {
            Some(field) => model.find_classes_declaring_field(field),
            None => model.all_classes().collect(),
        };

        Ok(ClassesResult {
            model: model.name().to_string(),
            declaring: self.declaring,
            classes: classes.into_iter().map(ClassSummary::from_class).collect(),
        })
    }
}
