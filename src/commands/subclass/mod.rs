mod cli_tests;
mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute};
use crate::model::Model;
use crate::output::{OutputFormat, Outputable};

/// Check whether a class is, or inherits from, another class
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schema_model subclass Manager Employee     # true
  schema_model subclass Employee Manager     # false
  schema_model subclass Manager Manager      # true, a class is its own subclass
")]
pub struct SubclassCmd {
    /// Class to test
    pub class: String,

    /// Candidate ancestor
    pub ancestor: String,
}

impl CommandRunner for SubclassCmd {
    fn run(self, model: &Model, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(model)?;
        Ok(result.format(format))
    }
}
