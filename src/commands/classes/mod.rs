mod execute;
mod output;
mod output_tests;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute};
use crate::model::Model;
use crate::output::{OutputFormat, Outputable};

/// List the classes of the model
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schema_model classes                     # Every declared class
  schema_model classes --declaring name    # Classes that declare their own `name` field
")]
pub struct ClassesCmd {
    /// Only classes declaring this field themselves (inherited copies do not count)
    #[arg(short, long)]
    pub declaring: Option<String>,
}

impl CommandRunner for ClassesCmd {
    fn run(self, model: &Model, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(model)?;
        Ok(result.format(format))
    }
}
