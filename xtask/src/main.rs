use std::path::PathBuf;

#[cfg(not(test))]
use anyhow::Result;
use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for dwt-precision")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    Analyze,
    Bench,
    /// Generate, transform at every precision, and compare
    Experiment {
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
        #[arg(long, default_value = "data")]
        data: PathBuf,
    },
}

#[cfg(not(test))]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let commands = match cli.command {
        Commands::Build => vec![build_command()],
        Commands::Test => vec![test_command()],
        Commands::Clippy => vec![clippy_command()],
        Commands::Fmt => vec![fmt_command()],
        Commands::Analyze => vec![fmt_command(), clippy_command()],
        Commands::Bench => vec![bench_command()],
        Commands::Experiment { config, data } => experiment_commands(&config, &data),
    };
    run_all(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_experiment_command() {
        let cli = Cli::parse_from(["xtask", "experiment", "--data", "/tmp/run"]);
        match cli.command {
            Commands::Experiment { config, data } => {
                assert_eq!(config, PathBuf::from("config.toml"));
                assert_eq!(data, PathBuf::from("/tmp/run"));
            }
            _ => panic!("parsed wrong command"),
        }
    }
}
