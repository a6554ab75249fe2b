use crate::config::EngineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::ResultEntry;
use crate::processors::{AccumulatorMap, MergeReducer, Processor, ScanWorker};
use crate::readers::{plan_chunks, MeasurementSource};
use crate::utils::progress::ProgressReporter;
use crate::writers::ResultFormatter;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};
use validator::Validate;

/// Chunked, multi-threaded aggregation over an in-memory or mapped source
pub struct ParallelProcessor;

impl ParallelProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate `source`, reporting scanned bytes to `progress` as chunks finish
    pub fn process_with_progress(
        &self,
        source: &MeasurementSource,
        config: &EngineConfig,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<ResultEntry>> {
        config.validate()?;

        let data = source.as_bytes();
        let chunks = plan_chunks(data, config.worker_count, config.chunk_alignment());
        debug!(
            bytes = data.len(),
            workers = config.worker_count,
            chunks = chunks.len(),
            "planned chunks"
        );

        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        // Configure Rayon thread pool
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_count)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let scan_started = Instant::now();
        let maps: Vec<AccumulatorMap> = pool.install(|| {
            chunks
                .par_iter()
                .map(|range| {
                    let map = ScanWorker::new(range.start as u64)
                        .with_terminator(config.chunk_alignment())
                        .scan(&data[range.clone()]);

                    if let Some(p) = progress {
                        p.increment(range.len() as u64);
                    }

                    map
                })
                .collect::<Result<Vec<_>>>()
        })?;
        debug!(elapsed = ?scan_started.elapsed(), "scan phase complete");

        let reducer = MergeReducer::new();
        let merged = if config.parallel_merge {
            pool.install(|| reducer.reduce_pairwise(maps))
        } else {
            reducer.reduce(maps)
        };

        let entries = ResultFormatter::summarize(merged.drain())?;
        info!(stations = entries.len(), "aggregation complete");

        if let Some(p) = progress {
            p.finish_with_message(&format!("Aggregated {} stations", entries.len()));
        }

        Ok(entries)
    }
}

impl Processor for ParallelProcessor {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn process(&self, source: &MeasurementSource, config: &EngineConfig) -> Result<Vec<ResultEntry>> {
        self.process_with_progress(source, config, None)
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new()
    }
}
