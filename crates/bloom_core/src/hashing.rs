//! Per-item bit index derivation.
//!
//! Round `i` hashes `item || decimal(i)` with XXH64 and reduces the digest
//! modulo the filter size, so k rounds of one hash stand in for k hash
//! functions. Both filter variants share this code; any change to it breaks
//! every filter populated before the change.
use crate::consts::{HASH_SEED, MAX_ROUND_DIGITS};
use std::ops::Range;
use xxhash_rust::xxh64::Xxh64;

/// ASCII decimal digits of `round`, written right-aligned into `buf`.
fn round_suffix(round: u32, buf: &mut [u8; MAX_ROUND_DIGITS]) -> &[u8] {
    let mut n = round;
    let mut at = buf.len();
    loop {
        at -= 1;
        buf[at] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    &buf[at..]
}

/// 64-bit digest of `item` salted with the decimal round number.
#[inline]
pub fn round_digest(item: &[u8], round: u32) -> u64 {
    let mut buf = [0u8; MAX_ROUND_DIGITS];
    let mut h = Xxh64::new(HASH_SEED);
    h.update(item);
    h.update(round_suffix(round, &mut buf));
    h.digest()
}

/// Iterator over the `hash_count` bit positions of one item.
#[derive(Clone, Debug)]
pub struct Indices<'a> {
    item: &'a [u8],
    size: u64,
    rounds: Range<u32>,
}

impl Iterator for Indices<'_> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        self.rounds.next().map(|r| round_digest(self.item, r) % self.size)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rounds.size_hint()
    }
}

impl ExactSizeIterator for Indices<'_> {}

/// Bit positions in `[0, size)` for `item`. `size` must be non-zero.
pub fn indices(item: &[u8], size: u64, hash_count: u32) -> Indices<'_> {
    debug_assert!(size > 0);
    Indices { item, size, rounds: 0..hash_count }
}
