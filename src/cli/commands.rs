use crate::cli::args::{Cli, Commands};
use crate::config::EngineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::ResultEntry;
use crate::processors::{NaiveProcessor, ParallelProcessor, Processor, Strategy, StreamProcessor};
use crate::readers::MeasurementSource;
use crate::utils::progress::ProgressReporter;
use crate::writers::{OutputFormat, ResultWriter};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{info, warn, Level};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    let base_config = EngineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Process {
            input,
            workers,
            strategy,
            format,
            quiet,
        } => {
            let config = apply_overrides(base_config, workers);
            let entries = aggregate(&input, strategy, &config, quiet)?;

            let stdout = io::stdout();
            ResultWriter::new(format).write(&entries, stdout.lock())?;
        }

        Commands::Validate { input, workers } => {
            let config = apply_overrides(base_config, workers);
            eprintln!("Validating {}...", input.display());

            let entries = aggregate(&input, Strategy::Parallel, &config, true)?;
            let records: u64 = entries.iter().map(|e| e.count).sum();

            eprintln!("✅ {} records across {} stations passed validation", records, entries.len());
        }

        Commands::Compare { input, workers } => {
            let config = apply_overrides(base_config, workers);
            let source = MeasurementSource::open(&input)?;

            let optimized = timed(&ParallelProcessor::new(), &source, &config)?;
            let reference = timed(&NaiveProcessor::new(), &source, &config)?;

            let optimized = ResultWriter::new(OutputFormat::Text).to_string(&optimized)?;
            let reference = ResultWriter::new(OutputFormat::Text).to_string(&reference)?;

            if optimized == reference {
                eprintln!("✅ Optimized output matches the reference implementation");
            } else {
                let first_difference = optimized
                    .lines()
                    .zip(reference.lines())
                    .find(|(a, b)| a != b);
                eprintln!("⚠️  Outputs differ");
                if let Some((a, b)) = first_difference {
                    eprintln!("  optimized: {}", a);
                    eprintln!("  reference: {}", b);
                }
                return Err(ProcessingError::InvalidFormat(
                    "optimized output differs from reference".to_string(),
                ));
            }
        }
    }

    Ok(())
}

fn apply_overrides(config: EngineConfig, workers: Option<usize>) -> EngineConfig {
    match workers {
        Some(workers) if workers != config.worker_count => {
            warn!(from = config.worker_count, to = workers, "worker count overridden");
            config.with_worker_count(workers)
        }
        _ => config,
    }
}

/// Run `strategy` over a file, or over stdin when `input` is `-`
fn aggregate(
    input: &Path,
    strategy: Strategy,
    config: &EngineConfig,
    quiet: bool,
) -> Result<Vec<ResultEntry>> {
    if input == Path::new("-") {
        info!("reading measurements from stdin");
        let progress = ProgressReporter::new_spinner("Reading stdin...", quiet);
        let stdin = io::stdin();
        return StreamProcessor::new().process_reader(stdin.lock(), config, Some(&progress));
    }

    let source = MeasurementSource::open(input)?;
    match strategy {
        Strategy::Parallel => {
            let progress = ProgressReporter::new(source.len() as u64, "Scanning measurements...", quiet);
            ParallelProcessor::new().process_with_progress(&source, config, Some(&progress))
        }
        other => timed(other.processor().as_ref(), &source, config),
    }
}

fn timed(processor: &dyn Processor, source: &MeasurementSource, config: &EngineConfig) -> Result<Vec<ResultEntry>> {
    let started = Instant::now();
    let entries = processor.process(source, config)?;
    info!(
        processor = processor.name(),
        stations = entries.len(),
        elapsed = ?started.elapsed(),
        "processing finished"
    );
    Ok(entries)
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .ok();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(io::stderr)
                .try_init()
                .ok();
        }
    }

    Ok(())
}
