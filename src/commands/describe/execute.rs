use std::error::Error;

use serde::Serialize;

use super::DescribeCmd;
use crate::commands::Execute;
use crate::model::{ClassRef, Model};
use crate::schema::FieldDescriptor;

/// One visible field of a described class
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub kind: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub declared_in: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<String>,
}

impl FieldSummary {
    fn new(class: ClassRef<'_>, field: &FieldDescriptor) -> Self {
        Self {
            name: field.name().to_string(),
            kind: field.kind_name().to_string(),
            type_name: field.type_label().to_string(),
            declared_in: class.declaring_class_of(field).name().to_string(),
            reverse: field.reverse_field().map(str::to_string),
        }
    }
}

/// Result of the describe command execution
#[derive(Debug, Default, Serialize)]
pub struct ClassDescription {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub parents: Vec<String>,
    /// This class first, then every ancestor depth-first
    pub ancestors: Vec<String>,
    /// Classes inheriting from this one, excluding itself
    pub subclasses: Vec<String>,
    pub fields: Vec<FieldSummary>,
}

impl Execute for DescribeCmd {
    type Output = ClassDescription;

    fn execute(self, model: &Model) -> Result<Self::Output, Box<dyn Error>> {
        let class = model.get_class(&self.class)?;

        let subclasses = model
            .subclasses_of(class.name())?
            .into_iter()
            .filter(|sub| *sub != class)
            .map(|sub| sub.name().to_string())
            .collect();

        Ok(ClassDescription {
            name: class.name().to_string(),
            namespace: model.namespace().map(str::to_string),
            parents: class.parents().map(|p| p.name().to_string()).collect(),
            ancestors: class.ancestors().map(|a| a.name().to_string()).collect(),
            subclasses,
            fields: class.fields().map(|f| FieldSummary::new(class, f)).collect(),
        })
    }
}
