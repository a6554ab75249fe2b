//! Engine tuning parameters.
//!
//! Values come from built-in defaults, then an optional config file, then
//! `BRC_*` environment variables; CLI flags are applied on top by the caller.

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_BLOCK_SIZE, ENV_PREFIX, LINE_TERMINATOR, MAX_WORKERS, MIN_BLOCK_SIZE,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    /// Number of scan workers (and chunks)
    #[validate(range(min = 1, max = 4096))]
    pub worker_count: usize,

    /// Bytes read per block when the input is a stream
    #[validate(range(min = 4096))]
    pub block_size: usize,

    /// Reject a streamed input whose last record has no terminator
    pub require_terminated: bool,

    /// Merge worker maps as a parallel pairwise tree instead of sequentially
    pub parallel_merge: bool,
}

impl EngineConfig {
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count,
            ..Self::default()
        }
    }

    /// Load defaults, then `path` if given, then `BRC_*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("worker_count", num_cpus::get() as i64)
            .and_then(|b| b.set_default("block_size", DEFAULT_BLOCK_SIZE as i64))
            .and_then(|b| b.set_default("require_terminated", false))
            .and_then(|b| b.set_default("parallel_merge", false))
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        if let Some(path) = path {
            debug!(path = %path.display(), "loading engine config file");
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: EngineConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_require_terminated(mut self, require_terminated: bool) -> Self {
        self.require_terminated = require_terminated;
        self
    }

    pub fn with_parallel_merge(mut self, parallel_merge: bool) -> Self {
        self.parallel_merge = parallel_merge;
        self
    }

    /// Records are always split on `\n`
    pub fn chunk_alignment(&self) -> u8 {
        LINE_TERMINATOR
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: num_cpus::get().clamp(1, MAX_WORKERS),
            block_size: DEFAULT_BLOCK_SIZE.max(MIN_BLOCK_SIZE),
            require_terminated: false,
            parallel_merge: false,
        }
    }
}
