//! Bit-reversal permutation for decimation-in-time transforms

/// Reverse the bits of `value`, dropping leading zeros
///
/// The accumulator takes one low bit of `value` per step until `value` is
/// exhausted, so `reverse_bits(0b0110) == 0b011`. Applying it twice restores
/// any value whose lowest bit is set.
pub fn reverse_bits(mut value: u64) -> u64 {
    let mut reversed: u64 = 0;
    while value != 0 {
        reversed = (reversed << 1) | (value & 1);
        value >>= 1;
    }
    reversed
}

/// Reverse the low `bit_count` bits of `value`
///
/// Bits above `bit_count` are ignored. Used to map an index of a transform of
/// size `2^bit_count` to its bit-reversed position. `bit_count` must not exceed 64.
pub fn reverse_first_bits(mut value: u64, bit_count: u32) -> u64 {
    let mut reversed: u64 = 0;
    let mut consumed = 0;
    while value != 0 && consumed < bit_count {
        reversed = (reversed << 1) | (value & 1);
        value >>= 1;
        consumed += 1;
    }
    // Remaining (zero) bits still occupy the low end of the reversed index
    reversed.checked_shl(bit_count - consumed).unwrap_or(0)
}

/// Permute `sequence` into bit-reversed order
///
/// The element at position `i` moves to `reverse_first_bits(i, log2(len))`.
/// `sequence.len()` must be a power of two.
pub fn reorder<T: Copy>(sequence: &[T]) -> Vec<T> {
    let n = sequence.len();
    if n <= 1 {
        return sequence.to_vec();
    }

    let bit_count = n.trailing_zeros();
    let mut reordered = sequence.to_vec();
    for (i, &item) in sequence.iter().enumerate() {
        reordered[reverse_first_bits(i as u64, bit_count) as usize] = item;
    }
    reordered
}
