pub mod result_formatter;
pub mod result_writer;

pub use result_formatter::ResultFormatter;
pub use result_writer::{OutputFormat, ResultWriter};
