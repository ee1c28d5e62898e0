use std::error::Error;

use serde::Serialize;

use super::ReverseCmd;
use crate::commands::Execute;
use crate::model::Model;

/// Result of the reverse command execution
#[derive(Debug, Default, Serialize)]
pub struct ReverseResult {
    pub reverse_field: String,
    /// Class declaring the matching reference
    pub class: Option<String>,
    /// Name of the matching reference field
    pub reference: Option<String>,
    /// Class the reference points to
    pub referenced_class: Option<String>,
}

impl Execute for ReverseCmd {
    type Output = ReverseResult;

    fn execute(self, model: &Model) -> Result<Self::Output, Box<dyn Error>> {
        let mut result = ReverseResult {
            reverse_field: self.field.clone(),
            ..Default::default()
        };

        let Some(class) = model.find_class_by_reverse_reference(&self.field) else {
            return Ok(result);
        };
        let reference = class
            .own_fields()
            .iter()
            .find(|f| f.is_reference() && f.reverse_field() == Some(self.field.as_str()));

        result.class = Some(class.name().to_string());
        result.reference = reference.map(|f| f.name().to_string());
        result.referenced_class = reference
            .and_then(|f| f.referenced_class())
            .map(str::to_string);
        Ok(result)
    }
}
