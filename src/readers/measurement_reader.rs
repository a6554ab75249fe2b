use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Read-only bytes of a measurements file.
///
/// Files are memory-mapped so inputs larger than RAM are paged in by the
/// kernel rather than loaded; in-memory buffers are supported for tests and
/// small inputs.
pub enum MeasurementSource {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl MeasurementSource {
    /// Memory-map a measurements file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        if len == 0 {
            debug!(path = %path.display(), "empty measurements file");
            return Ok(Self::Owned(Vec::new()));
        }

        let mmap = unsafe { Mmap::map(&file)? };
        #[cfg(unix)]
        mmap.advise(memmap2::Advice::Sequential)?;

        debug!(path = %path.display(), bytes = len, "mapped measurements file");
        Ok(Self::Mapped(mmap))
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Owned(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Owned(bytes) => bytes.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

impl std::fmt::Debug for MeasurementSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasurementSource")
            .field("mapped", &self.is_mapped())
            .field("len", &self.len())
            .finish()
    }
}
