//! Probabilistic set membership: a fixed bit array plus salted XXH64 rounds.
//! `check` never misses an added item; it may report items never added.
pub mod consts;
pub mod errors;
pub mod bits;
pub mod hashing;
pub mod sizing;
pub mod filter;
pub mod atomic;
pub mod membership;
pub mod config;

pub use atomic::AtomicBloomFilter;
pub use bits::BitArray;
pub use config::FilterConfig;
pub use errors::{FilterError, Result};
pub use filter::BloomFilter;
pub use hashing::indices;
pub use membership::MembershipFilter;
pub use sizing::{expected_fpr, optimal_num_bits, optimal_num_hashes};
