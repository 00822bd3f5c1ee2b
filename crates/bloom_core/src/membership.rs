//! Backend-neutral add/check capability.
//!
//! Shaped like a remote filter client (every call can fail, `add` answers
//! whether the item was new) so callers can be written once and pointed at
//! either the in-process filters here or a networked implementation.
use crate::atomic::AtomicBloomFilter;
use crate::errors::FilterError;
use crate::filter::BloomFilter;
use std::sync::Arc;

pub trait MembershipFilter {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Records `item`; `Ok(true)` if it was definitely not present before.
    fn add(&mut self, item: &[u8]) -> Result<bool, Self::Error>;

    /// `Ok(false)` only if `item` was never added.
    fn check(&self, item: &[u8]) -> Result<bool, Self::Error>;
}

impl MembershipFilter for BloomFilter {
    type Error = FilterError;

    fn add(&mut self, item: &[u8]) -> Result<bool, FilterError> {
        Ok(self.insert(item))
    }

    fn check(&self, item: &[u8]) -> Result<bool, FilterError> {
        Ok(BloomFilter::check(self, item))
    }
}

impl MembershipFilter for AtomicBloomFilter {
    type Error = FilterError;

    fn add(&mut self, item: &[u8]) -> Result<bool, FilterError> {
        Ok(self.insert(item))
    }

    fn check(&self, item: &[u8]) -> Result<bool, FilterError> {
        Ok(AtomicBloomFilter::check(self, item))
    }
}

/// Shared handle: every clone adds into the same bits.
impl MembershipFilter for Arc<AtomicBloomFilter> {
    type Error = FilterError;

    fn add(&mut self, item: &[u8]) -> Result<bool, FilterError> {
        Ok(self.insert(item))
    }

    fn check(&self, item: &[u8]) -> Result<bool, FilterError> {
        Ok(AtomicBloomFilter::check(self, item))
    }
}

impl<F: MembershipFilter + ?Sized> MembershipFilter for Box<F> {
    type Error = F::Error;

    fn add(&mut self, item: &[u8]) -> Result<bool, F::Error> {
        (**self).add(item)
    }

    fn check(&self, item: &[u8]) -> Result<bool, F::Error> {
        (**self).check(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_and_probe<F: MembershipFilter>(f: &mut F) -> Result<(usize, bool), F::Error> {
        let mut fresh = 0;
        for item in ["apple", "banana", "apple"] {
            if f.add(item.as_bytes())? {
                fresh += 1;
            }
        }
        Ok((fresh, f.check(b"banana")?))
    }

    #[test]
    fn backends_are_interchangeable() {
        let mut plain = BloomFilter::new(10000, 3).unwrap();
        let mut atomic = AtomicBloomFilter::new(10000, 3).unwrap();
        assert_eq!(load_and_probe(&mut plain).unwrap(), (2, true));
        assert_eq!(load_and_probe(&mut atomic).unwrap(), (2, true));
    }

    #[test]
    fn shared_atomic_handles_through_trait() {
        let shared = Arc::new(AtomicBloomFilter::new(50_000, 3).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let mut h = Arc::clone(&shared);
                std::thread::spawn(move || {
                    for i in 0..250 {
                        let key = format!("t{t}-{i}");
                        MembershipFilter::add(&mut h, key.as_bytes()).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let mut mine = Arc::clone(&shared);
        let (_, found) = load_and_probe(&mut mine).unwrap();
        assert!(found);
        for t in 0..4 {
            for i in 0..250 {
                assert!(MembershipFilter::check(&shared, format!("t{t}-{i}").as_bytes()).unwrap());
            }
        }
    }

    #[test]
    fn trait_objects_work() {
        let mut boxed: Box<dyn MembershipFilter<Error = FilterError>> =
            Box::new(BloomFilter::new(1000, 3).unwrap());
        assert!(boxed.add(b"x").unwrap());
        assert!(boxed.check(b"x").unwrap());
        assert!(!boxed.check(b"y").unwrap());
    }
}
