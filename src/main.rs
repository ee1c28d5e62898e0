use clap::Parser;

use schema_model::cli::{self, Args};
use schema_model::commands::CommandRunner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let model = cli::load_model(&args.schema)?;
    let output = args.command.run(&model, args.format)?;
    println!("{}", output);
    Ok(())
}
