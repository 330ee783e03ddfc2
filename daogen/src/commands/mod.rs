mod check;
mod completions;
mod generate;

use std::path::Path;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use daogen_schema::SchemaDescriptor;
use eyre::Result;
use generate::GenerateCommand;

/// Read the schema file, exiting with a rendered report when it is invalid.
pub(crate) fn open_schema(path: &Path) -> SchemaDescriptor {
    match daogen_schema::parse_file(path) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(*e));
            std::process::exit(1);
        }
    }
}

#[derive(Parser)]
#[command(name = "daogen")]
#[command(version)]
#[command(about = "Generate entities and DAOs from a table schema")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust sources from a schema file
    Generate(GenerateCommand),

    /// Validate a schema file and list what generation would skip
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["daogen", "generate"]).unwrap();
        match cli.command {
            Commands::Generate(cmd) => {
                assert_eq!(cmd.schema, Path::new("daogen.toml"));
                assert_eq!(cmd.output, Path::new("src/generated"));
                assert!(!cmd.dry_run);
            }
            _ => panic!("expected generate"),
        }
    }
}
