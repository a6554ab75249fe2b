//! # brc-processor
//!
//! Aggregates `station;temperature` measurement files into per-station
//! minimum, mean and maximum, sorted by station name.
//!
//! ```
//! use brc_processor::{EngineConfig, MeasurementSource, ParallelProcessor, Processor};
//!
//! let source = MeasurementSource::from_bytes("Hamburg;12.0\nHamburg;34.2\nHamburg;8.9");
//! let entries = ParallelProcessor::new()
//!     .process(&source, &EngineConfig::new(2))
//!     .unwrap();
//!
//! assert_eq!(entries[0].render(), "Hamburg;8.9;18.4;34.2");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use config::EngineConfig;
pub use error::{ProcessingError, RecordDefect, Result};
pub use models::ResultEntry;
pub use processors::{NaiveProcessor, ParallelProcessor, Processor, Strategy, StreamProcessor};
pub use readers::MeasurementSource;
