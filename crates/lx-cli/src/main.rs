use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod emit;
mod logging;

#[cfg(test)]
mod tests;

#[derive(Debug, Parser)]
#[command(name = "lexpack", version, about = "Compile word lists into compact nibble-coded dictionaries")]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile word lists into a dictionary.
    Compile(commands::CompileArgs),
    /// Reconstruct the word list from a dictionary.
    Decode(commands::DecodeArgs),
    /// Describe a dictionary.
    Stats(commands::StatsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    match &cli.command {
        Command::Compile(args) => {
            commands::compile(args)?;
        }
        Command::Decode(args) => {
            commands::decode(args)?;
        }
        Command::Stats(args) => {
            commands::stats(args)?;
        }
    }
    Ok(())
}
