use crate::consts::{DEFAULT_HASH_COUNT, DEFAULT_SIZE};
use crate::errors::Result;
use crate::filter::BloomFilter;
use crate::sizing::{optimal_num_bits, optimal_num_hashes};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct FilterConfig {
    pub size: u64,
    pub hash_count: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            hash_count: DEFAULT_HASH_COUNT,
        }
    }
}

impl FilterConfig {
    /// Shape for `capacity` items at about `error_rate` false positives.
    pub fn for_capacity(capacity: u64, error_rate: f64) -> Result<Self> {
        let size = optimal_num_bits(capacity, error_rate)?;
        Ok(Self {
            size,
            hash_count: optimal_num_hashes(capacity, size),
        })
    }

    pub fn build(&self) -> Result<BloomFilter> {
        BloomFilter::new(self.size, self.hash_count)
    }
}
