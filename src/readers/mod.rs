pub mod chunker;
pub mod measurement_reader;
pub mod record_parser;

pub use chunker::plan_chunks;
pub use measurement_reader::MeasurementSource;
pub use record_parser::{parse_record, parse_temperature};
