use crate::error::RecordDefect;
use crate::models::{Accumulator, StationKey, Temperature};
use crate::utils::constants::{MAX_LOAD_FACTOR_PERCENT, MIN_MAP_CAPACITY};

/// Outcome of [`AccumulatorMap::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

#[derive(Clone, Copy)]
struct Slot {
    hash: u64,
    key: StationKey,
    acc: Accumulator,
}

/// Open-addressed station table with linear probing.
///
/// Capacity is a power of two, at least 16,384 slots, and doubles once the
/// load factor would pass 70%. Keys live inline in their slot, so a record for
/// an already-seen station touches no heap memory.
pub struct AccumulatorMap {
    slots: Vec<Option<Slot>>,
    mask: usize,
    len: usize,
}

impl AccumulatorMap {
    pub fn new() -> Self {
        Self::with_capacity(MIN_MAP_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_MAP_CAPACITY).next_power_of_two();
        Self {
            slots: vec![None; capacity],
            mask: capacity - 1,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Fold one observation into the station's accumulator, creating it on
    /// first sight. New names are validated (length, UTF-8) before insertion.
    #[inline]
    pub fn upsert(&mut self, key: &[u8], value: Temperature) -> Result<Upsert, RecordDefect> {
        let hash = hash_key(key);
        let index = self.probe(hash, key);

        if let Some(slot) = &mut self.slots[index] {
            slot.acc.record(value);
            return Ok(Upsert::Updated);
        }

        let key = StationKey::new(key)?;
        self.occupy(index, Slot {
            hash,
            key,
            acc: Accumulator::new(value),
        });
        Ok(Upsert::Inserted)
    }

    /// Combine a whole accumulator into the entry for `key`
    pub fn merge(&mut self, key: &StationKey, acc: &Accumulator) {
        let hash = hash_key(key.as_bytes());
        let index = self.probe(hash, key.as_bytes());

        if let Some(slot) = &mut self.slots[index] {
            slot.acc.merge(acc);
            return;
        }

        self.occupy(index, Slot {
            hash,
            key: *key,
            acc: *acc,
        });
    }

    pub fn get(&self, key: &[u8]) -> Option<&Accumulator> {
        let index = self.probe(hash_key(key), key);
        self.slots[index].as_ref().map(|slot| &slot.acc)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StationKey, &Accumulator)> {
        self.slots
            .iter()
            .flatten()
            .map(|slot| (&slot.key, &slot.acc))
    }

    /// Consume the map, yielding every entry in table order
    pub fn drain(self) -> impl Iterator<Item = (StationKey, Accumulator)> {
        self.slots
            .into_iter()
            .flatten()
            .map(|slot| (slot.key, slot.acc))
    }

    /// Index of the slot holding `key`, or of the empty slot where it belongs
    #[inline]
    fn probe(&self, hash: u64, key: &[u8]) -> usize {
        let mut index = hash as usize & self.mask;
        loop {
            match &self.slots[index] {
                None => return index,
                Some(slot) if slot.hash == hash && slot.key.as_bytes() == key => return index,
                Some(_) => index = (index + 1) & self.mask,
            }
        }
    }

    fn occupy(&mut self, index: usize, slot: Slot) {
        self.slots[index] = Some(slot);
        self.len += 1;

        if self.len * 100 > self.slots.len() * MAX_LOAD_FACTOR_PERCENT {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let capacity = self.slots.len() * 2;
        let old = std::mem::replace(&mut self.slots, vec![None; capacity]);
        self.mask = capacity - 1;

        // Keys are already distinct, so each one takes the first free slot
        for slot in old.into_iter().flatten() {
            let mut index = slot.hash as usize & self.mask;
            while self.slots[index].is_some() {
                index = (index + 1) & self.mask;
            }
            self.slots[index] = Some(slot);
        }
    }
}

impl Default for AccumulatorMap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AccumulatorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// 64-bit hash over station name bytes.
///
/// Eight bytes at a time through an FNV-style multiply, then a murmur3
/// finalizer so the low bits used for slot selection depend on every byte.
#[inline]
pub fn hash_key(key: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS ^ key.len() as u64;
    let mut words = key.chunks_exact(8);
    for word in &mut words {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(word);
        hash = (hash ^ u64::from_le_bytes(bytes)).wrapping_mul(PRIME);
    }

    let tail = words.remainder();
    if !tail.is_empty() {
        let mut bytes = [0u8; 8];
        bytes[..tail.len()].copy_from_slice(tail);
        hash = (hash ^ u64::from_le_bytes(bytes)).wrapping_mul(PRIME);
    }

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51_afd7_ed55_8ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    hash ^ (hash >> 33)
}
