// crates/bloom_core/src/consts.rs

/// Seed for every XXH64 round. Changing it invalidates populated filters.
pub const HASH_SEED: u64 = 0;

pub const DEFAULT_SIZE: u64 = 10_000;
pub const DEFAULT_HASH_COUNT: u32 = 3;

/// Longest decimal rendering of a `u32` round index.
pub const MAX_ROUND_DIGITS: usize = 10;

