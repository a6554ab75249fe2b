use crate::config::EngineConfig;
use crate::error::{ProcessingError, RecordDefect, Result};
use crate::models::{Accumulator, ResultEntry};
use crate::processors::Processor;
use crate::readers::{parse_record, MeasurementSource};
use crate::writers::ResultFormatter;
use std::collections::HashMap;
use std::io::{BufRead, BufReader};

/// Single-threaded, line-by-line reference implementation.
///
/// Used as a correctness oracle for the optimized processors; it ignores the
/// worker count.
pub struct NaiveProcessor;

impl NaiveProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for NaiveProcessor {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn process(&self, source: &MeasurementSource, config: &EngineConfig) -> Result<Vec<ResultEntry>> {
        let reader = BufReader::new(source.as_bytes());
        let mut stations: HashMap<String, Accumulator> = HashMap::new();
        let mut offset = 0u64;

        for line_result in reader.split(config.chunk_alignment()) {
            let line = line_result?;
            let start = offset;
            let end = start + line.len() as u64;
            offset = end + 1;

            let malformed = |defect| ProcessingError::MalformedRecord {
                offset: start,
                end,
                defect,
            };

            let (name, temperature) = parse_record(&line).map_err(malformed)?;
            let name = std::str::from_utf8(name)
                .map_err(|_| malformed(RecordDefect::InvalidUtf8Name))?;

            stations
                .entry(name.to_string())
                .and_modify(|acc| acc.record(temperature))
                .or_insert_with(|| Accumulator::new(temperature));
        }

        ResultFormatter::summarize(stations)
    }
}

impl Default for NaiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}
