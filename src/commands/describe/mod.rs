mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute};
use crate::model::Model;
use crate::output::{OutputFormat, Outputable};

/// Show a class with its inheritance and every visible field
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schema_model describe Manager                  # By simple name
  schema_model describe org.example.Manager      # Qualified names work too
  schema_model describe Manager -o json          # As JSON
")]
pub struct DescribeCmd {
    /// Class name, simple or namespace-qualified
    pub class: String,
}

impl CommandRunner for DescribeCmd {
    fn run(self, model: &Model, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(model)?;
        Ok(result.format(format))
    }
}
