//! Shared-access Bloom filter: bytes are `AtomicU8` and bits are set with
//! `fetch_or`, so `add` works through `&self` from many threads.
//!
//! A `check` racing an `add` of the same item may see only part of its bits
//! and answer `false`. Items whose `add` has returned are always found.
use crate::bits::{locate, BitArray};
use crate::errors::Result;
use crate::filter::BloomFilter;
use crate::hashing::indices;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::debug;

#[derive(Debug)]
pub struct AtomicBloomFilter {
    size: u64,
    hash_count: u32,
    bytes: Box<[AtomicU8]>,
}

impl AtomicBloomFilter {
    pub fn new(size: u64, hash_count: u32) -> Result<Self> {
        let f = Self::from(BloomFilter::new(size, hash_count)?);
        debug!(size, hash_count, "atomic bloom filter allocated");
        Ok(f)
    }

    pub fn size(&self) -> u64 { self.size }
    pub fn hash_count(&self) -> u32 { self.hash_count }

    pub fn add(&self, item: impl AsRef<[u8]>) {
        self.insert(item);
    }

    /// Adds `item`; `true` if this call flipped at least one bit.
    pub fn insert(&self, item: impl AsRef<[u8]>) -> bool {
        let mut fresh = false;
        for pos in indices(item.as_ref(), self.size, self.hash_count) {
            let (idx, mask) = locate(pos);
            let prev = self.bytes[idx].fetch_or(mask, Ordering::AcqRel);
            fresh |= prev & mask == 0;
        }
        fresh
    }

    pub fn check(&self, item: impl AsRef<[u8]>) -> bool {
        indices(item.as_ref(), self.size, self.hash_count).all(|pos| {
            let (idx, mask) = locate(pos);
            self.bytes[idx].load(Ordering::Acquire) & mask != 0
        })
    }

    pub fn count_ones(&self) -> u64 {
        self.bytes
            .iter()
            .map(|b| b.load(Ordering::Relaxed).count_ones() as u64)
            .sum()
    }

    /// Plain copy of the current bits.
    pub fn snapshot(&self) -> BloomFilter {
        let bytes: Box<[u8]> = self.bytes.iter().map(|b| b.load(Ordering::Acquire)).collect();
        BloomFilter::from_bits(self.hash_count, BitArray::from_parts(self.size, bytes))
    }

    pub fn into_filter(self) -> BloomFilter {
        let bytes: Box<[u8]> = self.bytes.into_vec().into_iter().map(AtomicU8::into_inner).collect();
        BloomFilter::from_bits(self.hash_count, BitArray::from_parts(self.size, bytes))
    }
}

impl From<BloomFilter> for AtomicBloomFilter {
    fn from(f: BloomFilter) -> Self {
        let (hash_count, bits) = f.into_parts();
        let size = bits.len_bits();
        let bytes = bits.into_bytes().into_vec().into_iter().map(AtomicU8::new).collect();
        Self { size, hash_count, bytes }
    }
}
