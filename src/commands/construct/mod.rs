mod execute;
mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::commands::{CommandRunner, Execute};
use crate::model::Model;
use crate::output::{OutputFormat, Outputable};

/// Build a typed instance of a class from JSON data
#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("input").required(true).args(["data", "json"])))]
#[command(after_help = "\
Examples:
  schema_model construct Manager --json '{\"name\": \"Asha\", \"reports\": [{\"name\": \"Bo\"}]}'
  schema_model construct Department --data department.json -o json
")]
pub struct ConstructCmd {
    /// Class to build
    pub class: String,

    /// Read the object from a JSON file
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Take the object as inline JSON text
    #[arg(long)]
    pub json: Option<String>,
}

impl CommandRunner for ConstructCmd {
    fn run(self, model: &Model, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(model)?;
        Ok(result.format(format))
    }
}
