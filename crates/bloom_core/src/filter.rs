//! In-process Bloom filter: `size` bits, `hash_count` rounds per item.
use crate::bits::BitArray;
use crate::errors::{FilterError, Result};
use crate::hashing::{indices, Indices};
use crate::sizing::{expected_fpr, optimal_num_bits, optimal_num_hashes};
use tracing::{debug, trace};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    hash_count: u32,
    bits: BitArray,
}

impl BloomFilter {
    /// Empty filter of `size` bits using `hash_count` rounds per item.
    pub fn new(size: u64, hash_count: u32) -> Result<Self> {
        if hash_count == 0 {
            return Err(FilterError::Configuration("hash_count must be at least 1".into()));
        }
        let bits = BitArray::new(size)?;
        debug!(size, hash_count, bytes = bits.as_bytes().len(), "bloom filter allocated");
        Ok(Self { hash_count, bits })
    }

    /// Sized for `capacity` distinct items at roughly `error_rate` false positives.
    pub fn with_accuracy(capacity: u64, error_rate: f64) -> Result<Self> {
        let size = optimal_num_bits(capacity, error_rate)?;
        let hash_count = optimal_num_hashes(capacity, size);
        debug!(capacity, error_rate, size, hash_count, "sized from accuracy target");
        Self::new(size, hash_count)
    }

    pub(crate) fn from_bits(hash_count: u32, bits: BitArray) -> Self {
        Self { hash_count, bits }
    }

    pub(crate) fn into_parts(self) -> (u32, BitArray) {
        (self.hash_count, self.bits)
    }

    pub fn size(&self) -> u64 { self.bits.len_bits() }
    pub fn hash_count(&self) -> u32 { self.hash_count }
    pub fn bits(&self) -> &BitArray { &self.bits }
    pub fn as_bytes(&self) -> &[u8] { self.bits.as_bytes() }

    /// Bit positions `item` maps to in this filter.
    pub fn indices<'a>(&self, item: &'a [u8]) -> Indices<'a> {
        indices(item, self.size(), self.hash_count)
    }

    pub fn add(&mut self, item: impl AsRef<[u8]>) {
        self.insert(item);
    }

    /// Adds `item`; `true` if at least one of its bits was clear beforehand,
    /// i.e. the item was definitely not present.
    pub fn insert(&mut self, item: impl AsRef<[u8]>) -> bool {
        let mut fresh = false;
        for pos in indices(item.as_ref(), self.bits.len_bits(), self.hash_count) {
            fresh |= self.bits.set_unchecked(pos);
        }
        fresh
    }

    pub fn check(&self, item: impl AsRef<[u8]>) -> bool {
        self.indices(item.as_ref()).all(|pos| self.bits.get_unchecked(pos))
    }

    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.size() == other.size() && self.hash_count == other.hash_count
    }

    /// ORs `other` into this filter. Both must share size and hash count.
    pub fn union(&mut self, other: &BloomFilter) -> Result<()> {
        if !self.is_compatible(other) {
            return Err(FilterError::Incompatible);
        }
        self.bits.or_assign(&other.bits);
        trace!(ones = self.bits.count_ones(), "union applied");
        Ok(())
    }

    pub fn count_ones(&self) -> u64 { self.bits.count_ones() }

    pub fn is_empty(&self) -> bool {
        self.bits.as_bytes().iter().all(|&b| b == 0)
    }

    /// Fraction of bits set.
    pub fn load_factor(&self) -> f64 {
        self.count_ones() as f64 / self.size() as f64
    }

    /// False-positive probability implied by the current fill.
    pub fn estimated_fpr(&self) -> f64 {
        self.load_factor().powf(f64::from(self.hash_count))
    }

    /// Approximate number of distinct items added, from the fill ratio.
    /// Saturated filters report `u64::MAX`.
    pub fn estimated_len(&self) -> u64 {
        let m = self.size() as f64;
        let x = self.count_ones() as f64;
        if x >= m {
            return u64::MAX;
        }
        let n = -(m / self.hash_count as f64) * (1.0 - x / m).ln();
        n.round() as u64
    }

    /// Theoretical false-positive rate once `items` distinct items are in.
    pub fn expected_fpr(&self, items: u64) -> f64 {
        expected_fpr(self.size(), self.hash_count, items)
    }
}
