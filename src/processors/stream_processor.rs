use crate::config::EngineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::ResultEntry;
use crate::processors::{AccumulatorMap, MergeReducer, Processor, ScanWorker};
use crate::readers::MeasurementSource;
use crate::utils::progress::ProgressReporter;
use crate::writers::ResultFormatter;
use rayon::prelude::*;
use std::io::{BufRead, BufReader, Read};
use tracing::{debug, info};
use validator::Validate;

/// A block of input that ends on a record boundary, tagged with its absolute offset
struct Block {
    offset: u64,
    bytes: Vec<u8>,
}

/// Aggregates any `Read` in bounded memory.
///
/// Input is read in blocks of `block_size` bytes, each extended to the next
/// terminator. Up to `worker_count` blocks are scanned in parallel, then
/// folded into a running total before the next batch is read.
pub struct StreamProcessor;

impl StreamProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process_reader<R: Read>(
        &self,
        reader: R,
        config: &EngineConfig,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<ResultEntry>> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_count)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let terminator = config.chunk_alignment();
        let reducer = MergeReducer::new();
        let mut reader = BufReader::with_capacity(config.block_size, reader);
        let mut totals = AccumulatorMap::new();
        let mut offset = 0u64;
        let mut batches = 0usize;

        loop {
            let mut batch = Vec::with_capacity(config.worker_count);
            while batch.len() < config.worker_count {
                let bytes = read_block(&mut reader, config.block_size, terminator)?;
                if bytes.is_empty() {
                    break;
                }

                if config.require_terminated && bytes.last() != Some(&terminator) {
                    let record_start = bytes
                        .iter()
                        .rposition(|&b| b == terminator)
                        .map_or(0, |pos| pos + 1);
                    return Err(ProcessingError::Truncation {
                        offset: offset + record_start as u64,
                    });
                }

                let block = Block { offset, bytes };
                offset += block.bytes.len() as u64;
                batch.push(block);
            }

            if batch.is_empty() {
                break;
            }

            let maps: Vec<AccumulatorMap> = pool.install(|| {
                batch
                    .par_iter()
                    .map(|block| {
                        ScanWorker::new(block.offset)
                            .with_terminator(terminator)
                            .scan(&block.bytes)
                    })
                    .collect::<Result<Vec<_>>>()
            })?;

            for map in maps {
                reducer.merge_into(&mut totals, map);
            }

            batches += 1;
            if let Some(p) = progress {
                p.set_message(&format!("Scanned {} bytes", offset));
            }
            debug!(batch = batches, blocks = batch.len(), bytes = offset, "batch merged");
        }

        let entries = ResultFormatter::summarize(totals.drain())?;
        info!(stations = entries.len(), bytes = offset, "stream aggregation complete");

        if let Some(p) = progress {
            p.finish_with_message(&format!("Aggregated {} stations", entries.len()));
        }

        Ok(entries)
    }
}

/// Read up to `block_size` bytes, then continue to the next terminator (or EOF)
fn read_block<R: BufRead>(reader: &mut R, block_size: usize, terminator: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(block_size + 128);
    reader.by_ref().take(block_size as u64).read_to_end(&mut bytes)?;

    if !bytes.is_empty() && bytes.last() != Some(&terminator) {
        reader.read_until(terminator, &mut bytes)?;
    }

    Ok(bytes)
}

impl Processor for StreamProcessor {
    fn name(&self) -> &'static str {
        "stream"
    }

    fn process(&self, source: &MeasurementSource, config: &EngineConfig) -> Result<Vec<ResultEntry>> {
        self.process_reader(source.as_bytes(), config, None)
    }
}

impl Default for StreamProcessor {
    fn default() -> Self {
        Self::new()
    }
}
