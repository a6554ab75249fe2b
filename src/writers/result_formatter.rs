use crate::error::{ProcessingError, Result};
use crate::models::{Accumulator, ResultEntry};

/// Turns merged accumulators into sorted, rounded result entries
pub struct ResultFormatter;

impl ResultFormatter {
    /// Sort by station name bytes and compute each station's rounded mean.
    ///
    /// Accepts anything yielding `(name bytes, accumulator)`, e.g. a drained
    /// `AccumulatorMap` or a plain `HashMap<String, Accumulator>`.
    pub fn summarize<K, I>(entries: I) -> Result<Vec<ResultEntry>>
    where
        K: AsRef<[u8]>,
        I: IntoIterator<Item = (K, Accumulator)>,
    {
        let mut entries: Vec<(K, Accumulator)> = entries.into_iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));

        entries
            .into_iter()
            .map(|(name, acc)| {
                let name = std::str::from_utf8(name.as_ref()).map_err(|e| {
                    ProcessingError::InvalidFormat(format!("Station name is not UTF-8: {}", e))
                })?;
                Ok(ResultEntry::new(
                    name.to_string(),
                    acc.min,
                    acc.mean(),
                    acc.max,
                    acc.count,
                ))
            })
            .collect()
    }

    /// One `name;min;mean;max` line per entry, without terminators
    pub fn render_lines(entries: &[ResultEntry]) -> Vec<String> {
        entries.iter().map(ResultEntry::render).collect()
    }
}
