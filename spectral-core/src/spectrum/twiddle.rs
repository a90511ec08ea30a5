//! Memoized twiddle-factor tables
//!
//! Entry `k` of the table for size `N` is `exp(-i·2π·k/N)`. A table is built once,
//! either directly (bootstrap) or by doubling the next smaller cached table, and is
//! immutable afterwards.

use crate::error::{check_transform_length, Result};
use crate::trig;
use num_complex::Complex64;
use once_cell::sync::OnceCell;
use std::f64::consts::PI;

/// Size seeded by [`TwiddleCache::with_default_seed`]
pub const DEFAULT_SEED_SIZE: usize = 1024;

const SLOTS: usize = usize::BITS as usize;

/// Cache of twiddle tables, one slot per power-of-two size
///
/// The first caller for a size builds the table while concurrent callers for
/// the same size wait; reads of a published table take no lock.
pub struct TwiddleCache {
    slots: [OnceCell<Box<[Complex64]>>; SLOTS],
}

impl TwiddleCache {
    /// Create an empty cache. The first table requested is bootstrapped directly.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| OnceCell::new()),
        }
    }

    /// Create a cache seeded with the [`DEFAULT_SEED_SIZE`] table
    pub fn with_default_seed() -> Self {
        let cache = Self::new();
        cache.table(DEFAULT_SEED_SIZE);
        cache
    }

    /// Twiddle table for a transform of `size` points
    ///
    /// # Errors
    /// `InvalidTransformLength` unless `size` is a power of two >= 2
    pub fn factors(&self, size: usize) -> Result<&[Complex64]> {
        check_transform_length(size)?;
        Ok(self.table(size))
    }

    /// Build (if needed) the table for `size` so later transforms start from it
    pub fn seed(&self, size: usize) -> Result<()> {
        self.factors(size).map(|_| ())
    }

    /// Whether a table for `size` has been published
    pub fn is_cached(&self, size: usize) -> bool {
        size.is_power_of_two() && self.slot(size).get().is_some()
    }

    /// Sizes with a published table, ascending
    pub fn cached_sizes(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(log2, _)| 1usize << log2)
            .collect()
    }

    /// Drop every cached table
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.take();
        }
        tracing::debug!("twiddle cache cleared");
    }

    fn slot(&self, size: usize) -> &OnceCell<Box<[Complex64]>> {
        &self.slots[size.trailing_zeros() as usize]
    }

    /// `size` must be a power of two >= 2
    pub(crate) fn table(&self, size: usize) -> &[Complex64] {
        self.slot(size).get_or_init(|| self.build(size))
    }

    fn build(&self, size: usize) -> Box<[Complex64]> {
        let half = size / 2;
        if half >= 2 && self.has_table_up_to(half) {
            // Builds every missing size between the largest cached one and `half`
            let previous = self.table(half);
            tracing::trace!(size, from = half, "extending twiddle table");
            double(previous, size)
        } else {
            tracing::debug!(size, "bootstrapping twiddle table");
            direct(size)
        }
    }

    fn has_table_up_to(&self, size: usize) -> bool {
        let top = size.trailing_zeros() as usize;
        self.slots[1..=top].iter().any(|slot| slot.get().is_some())
    }
}

impl Default for TwiddleCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TwiddleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwiddleCache")
            .field("cached_sizes", &self.cached_sizes())
            .finish()
    }
}

#[inline]
fn root_of_unity(n: usize, size: usize) -> Complex64 {
    let (sin, cos) = trig::sin_cos(-2.0 * PI * n as f64 / size as f64);
    Complex64::new(cos, sin)
}

fn direct(size: usize) -> Box<[Complex64]> {
    (0..size).map(|n| root_of_unity(n, size)).collect()
}

/// Table of `size` points from the table of `size / 2` points
///
/// Even entries repeat the half-size roots (entry 2k is entry k of the smaller
/// table); odd entries are computed directly.
fn double(previous: &[Complex64], size: usize) -> Box<[Complex64]> {
    let mut table = vec![Complex64::new(0.0, 0.0); size];
    for (k, &factor) in previous.iter().enumerate() {
        table[2 * k] = factor;
    }
    for n in (1..size).step_by(2) {
        table[n] = root_of_unity(n, size);
    }
    table.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_table_accurate(table: &[Complex64]) {
        let size = table.len();
        for (k, factor) in table.iter().enumerate() {
            let angle = -2.0 * PI * k as f64 / size as f64;
            assert!((factor.re - angle.cos()).abs() < 1e-15, "re mismatch at {}", k);
            assert!((factor.im - angle.sin()).abs() < 1e-15, "im mismatch at {}", k);
        }
    }

    #[test]
    fn test_bootstrap_without_seed() {
        let cache = TwiddleCache::new();
        assert!(cache.cached_sizes().is_empty());

        let table = cache.factors(16).unwrap();
        assert_eq!(table.len(), 16);
        assert_table_accurate(table);

        // Bootstrapping builds only the requested size
        assert_eq!(cache.cached_sizes(), vec![16]);
    }

    #[test]
    fn test_default_seed() {
        let cache = TwiddleCache::with_default_seed();
        assert_eq!(cache.cached_sizes(), vec![DEFAULT_SEED_SIZE]);
        assert_table_accurate(cache.factors(DEFAULT_SEED_SIZE).unwrap());
    }

    #[test]
    fn test_doubling_from_seed() {
        let cache = TwiddleCache::new();
        cache.seed(1024).unwrap();

        let table = cache.factors(4096).unwrap();
        assert_eq!(table.len(), 4096);
        assert_table_accurate(table);

        // The intermediate size is built on the way up
        assert_eq!(cache.cached_sizes(), vec![1024, 2048, 4096]);

        // Even entries are copied from the smaller table
        let small = cache.factors(2048).unwrap();
        for k in 0..2048 {
            assert_eq!(table[2 * k], small[k]);
        }
    }

    #[test]
    fn test_smaller_than_seed_bootstraps() {
        let cache = TwiddleCache::with_default_seed();
        let table = cache.factors(8).unwrap();
        assert_table_accurate(table);
        assert_eq!(cache.cached_sizes(), vec![8, 1024]);
    }

    #[test]
    fn test_known_entries() {
        let cache = TwiddleCache::new();
        let table = cache.factors(4).unwrap();
        assert_eq!(table[0], Complex64::new(1.0, 0.0));
        assert!((table[1] - Complex64::new(0.0, -1.0)).norm() < 1e-15);
        assert!((table[2] - Complex64::new(-1.0, 0.0)).norm() < 1e-15);
        assert!((table[3] - Complex64::new(0.0, 1.0)).norm() < 1e-15);
    }

    #[test]
    fn test_table_is_stable() {
        let cache = TwiddleCache::new();
        let first = cache.factors(256).unwrap().as_ptr();
        let second = cache.factors(256).unwrap().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_sizes() {
        let cache = TwiddleCache::new();
        assert!(cache.factors(0).is_err());
        assert!(cache.factors(1).is_err());
        assert!(cache.factors(12).is_err());
        assert!(cache.seed(100).is_err());
        assert!(!cache.is_cached(100));
    }

    #[test]
    fn test_clear() {
        let mut cache = TwiddleCache::with_default_seed();
        cache.seed(64).unwrap();
        assert!(cache.is_cached(64));

        cache.clear();
        assert!(cache.cached_sizes().is_empty());
        assert!(!cache.is_cached(DEFAULT_SEED_SIZE));
    }

    #[test]
    fn test_concurrent_first_use() {
        let cache = TwiddleCache::new();
        let pointers: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.factors(2048).unwrap().as_ptr() as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(pointers.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(cache.cached_sizes(), vec![2048]);
    }
}
