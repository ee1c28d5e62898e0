use std::error::Error;
use std::fs;

use serde::Serialize;
use thiserror::Error;

use super::ConstructCmd;
use crate::coerce::Instance;
use crate::commands::Execute;
use crate::model::Model;

#[derive(Error, Debug)]
pub enum ConstructError {
    #[error("Failed to read data file '{path}': {message}")]
    FileReadFailed { path: String, message: String },

    #[error("Failed to parse data JSON: {message}")]
    JsonParseFailed { message: String },

    #[error("No input data given, pass --data or --json")]
    MissingInput,
}

/// Result of the construct command execution
#[derive(Debug, Serialize)]
pub struct ConstructResult {
    pub requested: String,
    pub instance: Instance,
}

impl Execute for ConstructCmd {
    type Output = ConstructResult;

    fn execute(self, model: &Model) -> Result<Self::Output, Box<dyn Error>> {
        let content = match (&self.data, self.json) {
            (Some(path), _) => fs::read_to_string(path).map_err(|e| ConstructError::FileReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?,
            (None, Some(json)) => json,
            (None, None) => return Err(ConstructError::MissingInput.into()),
        };

        let data: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| ConstructError::JsonParseFailed {
                message: e.to_string(),
            })?;

        let instance = model.construct(&self.class, data)?;
        Ok(ConstructResult {
            requested: self.class,
            instance,
        })
    }
}
