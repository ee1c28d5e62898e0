//! Configuration file handling for schema sources.
//!
//! This module provides loading and parsing of `.schema_model.json`
//! configuration files, which list the schema documents to load when no
//! `--schema` flag is given.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".schema_model.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Schema sources
    pub schema: SchemaConfig,
}

/// Schema documents to load, in declaration-pass order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl ConfigFile {
    /// Load configuration from `.schema_model.json` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file doesn't exist
    /// - The file cannot be read
    /// - The JSON is invalid
    /// - No schema files are listed
    pub fn load() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load configuration from an explicit path.
    ///
    /// Relative schema paths are resolved against the config file's directory.
    pub fn load_from(config_path: &Path) -> Result<Self, Box<dyn Error>> {
        if !config_path.exists() {
            return Err(format!(
                "Configuration file not found: {}\n\n\
                 Pass --schema <FILE> or create a {} file in the current directory.\n\n\
                 Example:\n\
                 {{\n  \
                   \"schema\": {{\n    \
                     \"files\": [\"base.json\", \"additions.json\"]\n  \
                   }}\n\
                 }}\n",
                config_path.display(),
                CONFIG_FILE_NAME
            )
            .into());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| format!("Failed to read {}: {}", config_path.display(), e))?;

        let mut config: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid JSON in {}: {}", config_path.display(), e))?;

        if config.schema.files.is_empty() {
            return Err(format!("No schema files listed in {}", config_path.display()).into());
        }

        if let Some(base) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.schema.files = config
                .schema
                .files
                .into_iter()
                .map(|file| if file.is_relative() { base.join(file) } else { file })
                .collect();
        }

        Ok(config)
    }
}
