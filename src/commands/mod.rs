//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs` building a serializable result from the model
//! - `output.rs` rendering that result as a table
//! - `*_tests.rs` for parsing, execution and output

mod classes;
mod construct;
mod describe;
mod reverse;
mod subclass;

pub use classes::ClassesCmd;
pub use construct::ConstructCmd;
pub use describe::DescribeCmd;
pub use reverse::ReverseCmd;
pub use subclass::SubclassCmd;

use clap::Subcommand;
use enum_dispatch::enum_dispatch;
use std::error::Error;

use crate::model::Model;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, model: &Model) -> Result<Self::Output, Box<dyn Error>>;
}

/// Runs a parsed command and renders its result.
#[enum_dispatch]
pub trait CommandRunner {
    fn run(self, model: &Model, format: OutputFormat) -> Result<String, Box<dyn Error>>;
}

#[enum_dispatch(CommandRunner)]
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List classes, or the classes declaring a field
    Classes(ClassesCmd),

    /// Show a class with its parents, ancestors, subclasses and fields
    Describe(DescribeCmd),

    /// Check whether one class inherits from another
    Subclass(SubclassCmd),

    /// Find the class whose reference declares a reverse field
    Reverse(ReverseCmd),

    /// Build a typed instance of a class from JSON data
    Construct(ConstructCmd),
}
