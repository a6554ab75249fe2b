use crate::processors::Strategy;
use crate::writers::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brc-processor")]
#[command(about = "Per-station min/mean/max over semicolon-delimited temperature measurements")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Engine config file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a measurements file and print one line per station
    Process {
        #[arg(short, long, help = "Measurements file, or '-' for stdin")]
        input: PathBuf,

        #[arg(short, long, help = "Worker threads [default: available parallelism]")]
        workers: Option<usize>,

        #[arg(short, long, value_enum, default_value_t = Strategy::Parallel)]
        strategy: Strategy,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[arg(short, long, help = "Hide the progress bar")]
        quiet: bool,
    },

    /// Check every record without printing results
    Validate {
        #[arg(short, long, help = "Measurements file, or '-' for stdin")]
        input: PathBuf,

        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Run the optimized engine and the naive reference and compare outputs
    Compare {
        #[arg(short, long, help = "Measurements file")]
        input: PathBuf,

        #[arg(short, long)]
        workers: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::parse_from([
            "brc-processor",
            "process",
            "-i",
            "measurements.txt",
            "--workers",
            "4",
            "--strategy",
            "naive",
            "--format",
            "json",
        ]);

        match cli.command {
            Commands::Process {
                input,
                workers,
                strategy,
                format,
                quiet,
            } => {
                assert_eq!(input, PathBuf::from("measurements.txt"));
                assert_eq!(workers, Some(4));
                assert_eq!(strategy, Strategy::Naive);
                assert_eq!(format, OutputFormat::Json);
                assert!(!quiet);
            }
            _ => panic!("expected process command"),
        }
    }
}
