//! Fixed-length bit array over an owned byte buffer.
//!
//! Layout: bit `pos` lives in byte `pos / 8`, at bit `pos % 8` counted from
//! the least-significant end (bit 0 is the value-1 bit).
use crate::errors::{FilterError, Result};
use std::collections::TryReserveError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    len_bits: u64,
    bytes: Box<[u8]>,
}

#[inline]
pub(crate) fn locate(pos: u64) -> (usize, u8) {
    ((pos / 8) as usize, 1u8 << (pos % 8))
}

/// Byte length needed for `len_bits` bits, or `None` if it does not fit in memory.
pub(crate) fn byte_len(len_bits: u64) -> Option<usize> {
    usize::try_from(len_bits.div_ceil(8)).ok()
}

/// Zeroed buffer of `n` bytes; allocation failure is an error, not an abort.
fn zeroed(n: usize) -> std::result::Result<Box<[u8]>, TryReserveError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(n)?;
    buf.resize(n, 0u8);
    Ok(buf.into_boxed_slice())
}

impl BitArray {
    pub fn new(len_bits: u64) -> Result<Self> {
        if len_bits == 0 {
            return Err(FilterError::Configuration("size must be greater than 0".into()));
        }
        let n = byte_len(len_bits).ok_or_else(|| {
            FilterError::Configuration(format!("size {len_bits} is not addressable"))
        })?;
        let bytes = zeroed(n).map_err(|e| {
            FilterError::Configuration(format!("size {len_bits} cannot be allocated: {e}"))
        })?;
        Ok(Self { len_bits, bytes })
    }

    pub(crate) fn from_parts(len_bits: u64, bytes: Box<[u8]>) -> Self {
        debug_assert_eq!(Some(bytes.len()), byte_len(len_bits));
        Self { len_bits, bytes }
    }

    pub(crate) fn into_bytes(self) -> Box<[u8]> {
        self.bytes
    }

    pub fn len_bits(&self) -> u64 { self.len_bits }

    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    pub fn set(&mut self, pos: u64) -> Result<()> {
        self.check_range(pos)?;
        self.set_unchecked(pos);
        Ok(())
    }

    pub fn get(&self, pos: u64) -> Result<bool> {
        self.check_range(pos)?;
        Ok(self.get_unchecked(pos))
    }

    /// Sets `pos` and reports whether it was previously clear. Caller guarantees `pos < len_bits`.
    #[inline]
    pub(crate) fn set_unchecked(&mut self, pos: u64) -> bool {
        let (idx, mask) = locate(pos);
        let was_clear = self.bytes[idx] & mask == 0;
        self.bytes[idx] |= mask;
        was_clear
    }

    #[inline]
    pub(crate) fn get_unchecked(&self, pos: u64) -> bool {
        let (idx, mask) = locate(pos);
        self.bytes[idx] & mask != 0
    }

    pub fn count_ones(&self) -> u64 {
        self.bytes.iter().map(|b| b.count_ones() as u64).sum()
    }

    /// ORs `other` into `self`. Lengths must already match.
    pub(crate) fn or_assign(&mut self, other: &BitArray) {
        for (dst, src) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *dst |= *src;
        }
    }

    fn check_range(&self, pos: u64) -> Result<()> {
        if pos >= self.len_bits {
            return Err(FilterError::OutOfRange { pos, size: self.len_bits });
        }
        Ok(())
    }
}
