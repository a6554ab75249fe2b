use crate::error::{ProcessingError, Result};
use crate::processors::AccumulatorMap;
use crate::readers::parse_record;
use crate::utils::constants::LINE_TERMINATOR;

/// Scans one chunk into a private accumulator map
pub struct ScanWorker {
    base_offset: u64,
    terminator: u8,
}

impl ScanWorker {
    /// `base_offset` is the absolute position of the chunk in the source and
    /// is only used to report malformed records.
    pub fn new(base_offset: u64) -> Self {
        Self {
            base_offset,
            terminator: LINE_TERMINATOR,
        }
    }

    pub fn with_terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    /// Parse every line of `chunk`. The last line may be unterminated.
    pub fn scan(&self, chunk: &[u8]) -> Result<AccumulatorMap> {
        let mut map = AccumulatorMap::new();
        let mut start = 0;

        while start < chunk.len() {
            let end = chunk[start..]
                .iter()
                .position(|&b| b == self.terminator)
                .map_or(chunk.len(), |pos| start + pos);
            let line = &chunk[start..end];

            parse_record(line)
                .and_then(|(name, temperature)| map.upsert(name, temperature))
                .map_err(|defect| ProcessingError::MalformedRecord {
                    offset: self.base_offset + start as u64,
                    end: self.base_offset + end as u64,
                    defect,
                })?;

            start = end + 1;
        }

        Ok(map)
    }
}
