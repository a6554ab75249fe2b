use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Why a single measurement line was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDefect {
    #[error("missing ';' separator")]
    MissingSeparator,

    #[error("station name is empty")]
    EmptyName,

    #[error("station name is {0} bytes, maximum is 100")]
    NameTooLong(usize),

    #[error("station name is not valid UTF-8")]
    InvalidUtf8Name,

    #[error("temperature does not match -?D?D.D")]
    InvalidTemperature,
}

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at bytes {offset}..{end}: {defect}")]
    MalformedRecord {
        offset: u64,
        end: u64,
        defect: RecordDefect,
    },

    #[error("Truncated input: record at byte {offset} has no line terminator")]
    Truncation { offset: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    /// Absolute byte offset of the offending input, when the error has one
    pub fn offset(&self) -> Option<u64> {
        match self {
            ProcessingError::MalformedRecord { offset, .. } => Some(*offset),
            ProcessingError::Truncation { offset } => Some(*offset),
            _ => None,
        }
    }
}
