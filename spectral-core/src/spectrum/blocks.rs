//! Supported analysis block sizes

/// Block sizes the window and twiddle caches are keyed to, ascending
pub const SUPPORTED_BLOCK_SIZES: [usize; 11] = [8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192];

/// Block size used when an exact lookup fails
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Whether `size` is one of [`SUPPORTED_BLOCK_SIZES`]
pub fn is_supported_block_size(size: usize) -> bool {
    block_size_index(size).is_some()
}

/// Position of `size` in [`SUPPORTED_BLOCK_SIZES`]
pub fn block_size_index(size: usize) -> Option<usize> {
    SUPPORTED_BLOCK_SIZES.iter().position(|&s| s == size)
}

/// Map any requested size to a supported one
///
/// Returns the smallest supported size >= `requested`, or the largest supported
/// size when `requested` exceeds all of them.
pub fn resolve_block_size(requested: usize) -> usize {
    SUPPORTED_BLOCK_SIZES
        .iter()
        .copied()
        .find(|&size| size >= requested)
        .unwrap_or(SUPPORTED_BLOCK_SIZES[SUPPORTED_BLOCK_SIZES.len() - 1])
}

/// Exact lookup: `requested` if supported, otherwise [`DEFAULT_BLOCK_SIZE`]
pub fn block_size_or_default(requested: usize) -> usize {
    if is_supported_block_size(requested) {
        requested
    } else {
        DEFAULT_BLOCK_SIZE
    }
}
