/// Record layout
pub const FIELD_SEPARATOR: u8 = b';';
pub const LINE_TERMINATOR: u8 = b'\n';
pub const MAX_STATION_NAME_LEN: usize = 100;

/// Temperature constraints, in tenths of a degree
pub const MIN_TEMPERATURE_TENTHS: i16 = -999;
pub const MAX_TEMPERATURE_TENTHS: i16 = 999;

/// Accumulator map sizing
pub const MIN_MAP_CAPACITY: usize = 16_384;
pub const MAX_LOAD_FACTOR_PERCENT: usize = 70;

/// Processing defaults
pub const DEFAULT_BLOCK_SIZE: usize = 8 * 1024 * 1024; // 8MB
pub const MIN_BLOCK_SIZE: usize = 4096;
pub const MAX_WORKERS: usize = 4096;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "BRC";

/// Line terminator used when rendering text output
#[cfg(windows)]
pub const OUTPUT_LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const OUTPUT_LINE_ENDING: &str = "\n";
