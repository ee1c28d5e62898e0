//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use tracing::debug;

use crate::commands::Command;
use crate::config::ConfigFile;
use crate::model::Model;
use crate::output::OutputFormat;
use crate::schema::source;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Schema document to load, one declaration pass per file
    ///
    /// Repeat to layer documents in order. If not specified, the files
    /// listed in .schema_model.json are used.
    #[arg(short, long, global = true)]
    pub schema: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Resolve the schema files to load: explicit flags first, then the config file.
pub fn resolve_schema_files(explicit: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }
    let config = ConfigFile::load()?;
    Ok(config.schema.files)
}

/// Load and build the model for a CLI invocation.
pub fn load_model(explicit: &[PathBuf]) -> Result<Model, Box<dyn Error>> {
    let files = resolve_schema_files(explicit)?;
    debug!(files = files.len(), "loading schema files");
    Ok(source::load_model(&files)?)
}
