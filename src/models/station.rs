use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::RecordDefect;
use crate::utils::constants::MAX_STATION_NAME_LEN;

/// Station name stored inline, so map slots never point at heap memory.
///
/// Equality and ordering compare the raw bytes; the bytes are checked to be
/// UTF-8 once, on construction.
#[derive(Clone, Copy)]
pub struct StationKey {
    len: u8,
    bytes: [u8; MAX_STATION_NAME_LEN],
}

impl StationKey {
    pub fn new(name: &[u8]) -> std::result::Result<Self, RecordDefect> {
        if name.is_empty() {
            return Err(RecordDefect::EmptyName);
        }
        if name.len() > MAX_STATION_NAME_LEN {
            return Err(RecordDefect::NameTooLong(name.len()));
        }
        if std::str::from_utf8(name).is_err() {
            return Err(RecordDefect::InvalidUtf8Name);
        }

        let mut bytes = [0u8; MAX_STATION_NAME_LEN];
        bytes[..name.len()].copy_from_slice(name);

        Ok(Self {
            len: name.len() as u8,
            bytes,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn as_str(&self) -> &str {
        // Validated in `new`
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for StationKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for StationKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for StationKey {}

impl PartialOrd for StationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for StationKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StationKey").field(&self.as_str()).finish()
    }
}

impl fmt::Display for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
