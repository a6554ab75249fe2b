pub mod accumulator_map;
pub mod merge_reducer;
pub mod naive_processor;
pub mod parallel_processor;
pub mod scan_worker;
pub mod stream_processor;

pub use accumulator_map::{AccumulatorMap, Upsert};
pub use merge_reducer::MergeReducer;
pub use naive_processor::NaiveProcessor;
pub use parallel_processor::ParallelProcessor;
pub use scan_worker::ScanWorker;
pub use stream_processor::StreamProcessor;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::ResultEntry;
use crate::readers::MeasurementSource;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A strategy that turns measurements into sorted per-station statistics.
///
/// Every implementation must produce identical entries for the same input.
pub trait Processor: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, source: &MeasurementSource, config: &EngineConfig) -> Result<Vec<ResultEntry>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Parallel,
    Stream,
    Naive,
}

impl Strategy {
    pub fn processor(self) -> Box<dyn Processor> {
        match self {
            Strategy::Parallel => Box::new(ParallelProcessor::new()),
            Strategy::Stream => Box::new(StreamProcessor::new()),
            Strategy::Naive => Box::new(NaiveProcessor::new()),
        }
    }

    pub fn all() -> [Strategy; 3] {
        [Strategy::Parallel, Strategy::Stream, Strategy::Naive]
    }
}
