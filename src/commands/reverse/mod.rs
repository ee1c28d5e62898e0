mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Execute};
use crate::model::Model;
use crate::output::{OutputFormat, Outputable};

/// Find the class holding a reference whose reverse link has the given name
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  schema_model reverse employees     # Class whose reference points back via `employees`
")]
pub struct ReverseCmd {
    /// Reverse field name
    pub field: String,
}

impl CommandRunner for ReverseCmd {
    fn run(self, model: &Model, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(model)?;
        Ok(result.format(format))
    }
}
