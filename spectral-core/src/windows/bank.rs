//! Cached window coefficients for the supported block sizes

use super::{generate_window, WindowType};
use crate::spectrum::blocks::{block_size_index, SUPPORTED_BLOCK_SIZES};
use once_cell::sync::OnceCell;
use std::borrow::Cow;

const SIZES: usize = SUPPORTED_BLOCK_SIZES.len();

/// Lazily filled table of window coefficients, one slot per (window, block size)
///
/// Sizes outside [`SUPPORTED_BLOCK_SIZES`] are generated on every request.
pub struct WindowBank {
    slots: Vec<OnceCell<Box<[f64]>>>,
}

impl WindowBank {
    pub fn new() -> Self {
        Self {
            slots: (0..WindowType::ALL.len() * SIZES).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Window coefficients of `length` points
    ///
    /// Borrowed from the cache for supported block sizes, freshly generated otherwise.
    pub fn coefficients(&self, window_type: WindowType, length: usize) -> Cow<'_, [f64]> {
        match block_size_index(length) {
            Some(size_index) => Cow::Borrowed(self.cached(window_type, size_index)),
            None => Cow::Owned(generate_window(window_type, length)),
        }
    }

    /// Fill every supported size for `window_type`
    pub fn precompute(&self, window_type: WindowType) {
        for size_index in 0..SIZES {
            self.cached(window_type, size_index);
        }
    }

    /// Whether `(window_type, length)` is already cached
    pub fn is_cached(&self, window_type: WindowType, length: usize) -> bool {
        block_size_index(length)
            .map(|size_index| self.slots[slot_index(window_type, size_index)].get().is_some())
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.take();
        }
        tracing::debug!("window cache cleared");
    }

    fn cached(&self, window_type: WindowType, size_index: usize) -> &[f64] {
        self.slots[slot_index(window_type, size_index)].get_or_init(|| {
            let length = SUPPORTED_BLOCK_SIZES[size_index];
            tracing::debug!(?window_type, length, "precomputing window coefficients");
            generate_window(window_type, length).into_boxed_slice()
        })
    }
}

fn slot_index(window_type: WindowType, size_index: usize) -> usize {
    window_type.index() * SIZES + size_index
}

impl Default for WindowBank {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WindowBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.slots.iter().filter(|slot| slot.get().is_some()).count();
        f.debug_struct("WindowBank").field("cached", &cached).finish()
    }
}
