//! Parameter selection from an expected item count and target error rate.
//!
//! m = -n * ln(p) / ln(2)^2, k = (m / n) * ln(2), fpr = (1 - e^(-k n / m))^k
use crate::errors::{FilterError, Result};
use std::f64::consts::LN_2;

fn validate(capacity: u64, error_rate: f64) -> Result<()> {
    if capacity == 0 {
        return Err(FilterError::Configuration("capacity must be greater than 0".into()));
    }
    if !(error_rate > 0.0 && error_rate < 1.0) {
        return Err(FilterError::Configuration(format!(
            "error rate must be in (0, 1), got {error_rate}"
        )));
    }
    Ok(())
}

pub fn optimal_num_bits(capacity: u64, error_rate: f64) -> Result<u64> {
    validate(capacity, error_rate)?;
    let n = capacity as f64;
    let bits = (-n * error_rate.ln() / (LN_2 * LN_2)).ceil();
    if !bits.is_finite() || bits >= u64::MAX as f64 {
        return Err(FilterError::Configuration(format!(
            "capacity {capacity} at error rate {error_rate} needs too many bits"
        )));
    }
    Ok((bits as u64).max(1))
}

pub fn optimal_num_hashes(capacity: u64, num_bits: u64) -> u32 {
    let n = capacity.max(1) as f64;
    let k = (num_bits as f64 / n * LN_2).round();
    k.clamp(1.0, u32::MAX as f64) as u32
}

/// Theoretical false-positive rate after `items` distinct inserts.
pub fn expected_fpr(size: u64, hash_count: u32, items: u64) -> f64 {
    if size == 0 {
        return 1.0;
    }
    let k = hash_count as f64;
    let exponent = -k * items as f64 / size as f64;
    (1.0 - exponent.exp()).powf(k)
}
