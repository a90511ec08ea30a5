//! Payne-Hanek argument reduction for large arguments
//!
//! Reduces `x >= REDUCE_THRESHOLD` to an octant index `j` and a residual angle `z`
//! in [-π/4, π/4] by multiplying the mantissa of `x` against the binary expansion
//! of 4/π held as 64-bit limbs.

use std::f64::consts::FRAC_PI_4;

/// Arguments at or above 2^29 take the multi-precision path
pub const REDUCE_THRESHOLD: f64 = (1u64 << 29) as f64;

const MANTISSA_BITS: u32 = 52;
const EXPONENT_MASK: u64 = 0x7ff;
const EXPONENT_BIAS: i32 = 1023;

/// Binary digits of 4/π: 4/π = Σ FOUR_OVER_PI[i] · 2^(-64·i)
///
/// The leading limb is the integer part; the 19 fraction limbs plus the leading
/// one bit give 1217 bits of precision, enough for every finite double.
const FOUR_OVER_PI: [u64; 20] = [
    0x0000000000000001,
    0x45f306dc9c882a53,
    0xf84eafa3ea69bb81,
    0xb6c52b3278872083,
    0xfca2c757bd778ac3,
    0x6e48dc74849ba5c0,
    0x0c925dd413a32439,
    0xfc3bd63962534e7d,
    0xd1046bea5d768909,
    0xd338e04d68befc82,
    0x7323ac7306a673e9,
    0x3908bf177bf25076,
    0x3ff12fffbc0b301f,
    0xde5e2316b414da3e,
    0xda6cfd9e4f96136e,
    0x9e8c7ecd3cbfd45a,
    0xea4f758fd7cbe2f6,
    0x7a0e73ef14a525d4,
    0xd7f6bf623f1aba10,
    0xac06608df8f6d757,
];

/// 64 bits of 4/π starting `shift` bits into limb `digit`
#[inline]
fn window(digit: usize, shift: u32) -> u64 {
    if shift == 0 {
        FOUR_OVER_PI[digit]
    } else {
        (FOUR_OVER_PI[digit] << shift) | (FOUR_OVER_PI[digit + 1] >> (64 - shift))
    }
}

/// Reduce a large non-negative `x` to `(j, z)` with `x ≡ j·π/4 + z (mod 2π)`
///
/// `j` is in 0..8 and always even; odd octants are folded onto the next axis
/// so that `z` lies in [-π/4, π/4].
pub fn payne_hanek(x: f64) -> (u64, f64) {
    if x < FRAC_PI_4 {
        return (0, x);
    }

    // x = mantissa · 2^exp with the implicit bit restored
    let bits = x.to_bits();
    let exp = ((bits >> MANTISSA_BITS) & EXPONENT_MASK) as i32 - EXPONENT_BIAS - MANTISSA_BITS as i32;
    let mantissa = (bits & ((1u64 << MANTISSA_BITS) - 1)) | (1u64 << MANTISSA_BITS);

    // Pick the three limbs of 4/π whose product with the mantissa has its
    // leading digit at 2^-61. exp >= -53 because x >= π/4.
    let offset = (exp + 61) as u32;
    let digit = (offset / 64) as usize;
    let shift = offset % 64;
    let z0 = window(digit, shift);
    let z1 = window(digit + 1, shift);
    let z2 = window(digit + 2, shift);

    // Upper 128 bits of mantissa · (z0, z1, z2); z0's high half only holds
    // whole turns and is dropped.
    let z2_hi = ((z2 as u128 * mantissa as u128) >> 64) as u64;
    let z1_full = z1 as u128 * mantissa as u128;
    let z1_hi = (z1_full >> 64) as u64;
    let z1_lo = z1_full as u64;
    let z0_lo = z0.wrapping_mul(mantissa);

    let (lo, carry) = z1_lo.overflowing_add(z2_hi);
    let hi = z0_lo.wrapping_add(z1_hi).wrapping_add(carry as u64);

    // Top three bits are the octant, the rest is the fraction of an octant
    let mut j = hi >> 61;
    let fraction = (((hi as u128) << 64) | lo as u128) << 3;
    let mut z = fraction_to_f64(fraction);

    if j & 1 == 1 {
        j = (j + 1) & 7;
        z -= 1.0;
    }

    (j, z * FRAC_PI_4)
}

/// Interpret a 128-bit fixed-point fraction (value / 2^128) as a double,
/// truncating the bits below the 53-bit mantissa.
fn fraction_to_f64(fraction: u128) -> f64 {
    if fraction == 0 {
        return 0.0;
    }

    let leading = fraction.leading_zeros();
    let normalized = fraction << leading;
    let mantissa = (normalized >> (128 - 53)) as u64;
    let exponent = (EXPONENT_BIAS as u64 - 1) - leading as u64;

    f64::from_bits((exponent << MANTISSA_BITS) | (mantissa & ((1u64 << MANTISSA_BITS) - 1)))
}
