//! Sine and cosine kernels
//!
//! Octant reduction followed by fixed 6-term minimax polynomials in z².
//! Arguments below 2^29 are reduced with a three-part split of π/4 (Cody-Waite);
//! larger ones go through [`reduce::payne_hanek`].
//!
//! Results stay within 1e-15 absolute of `f64::sin` / `f64::cos` for every finite
//! input. NaN and infinities are not special-cased.

pub mod reduce;

use reduce::{payne_hanek, REDUCE_THRESHOLD};
use std::f64::consts::FRAC_1_PI;

/// π/4 split into three parts with trailing zero bits so that `y·PI4_A` and
/// `y·PI4_B` are exact for every octant count below 2^30
const PI4_A: f64 = 7.85398125648498535156e-1; // 0x3fe921fb40000000
const PI4_B: f64 = 3.77489470793079817668e-8; // 0x3e64442d00000000
const PI4_C: f64 = 2.69515142907905952645e-15; // 0x3ce8469898cc5170

const SIN_COEFFS: [f64; 6] = [
    1.58962301576546568060e-10,
    -2.50507477628578072866e-8,
    2.75573136213857245213e-6,
    -1.98412698295895385996e-4,
    8.33333333332211858878e-3,
    -1.66666666666666307295e-1,
];

const COS_COEFFS: [f64; 6] = [
    -1.13585365213876817300e-11,
    2.08757008419747316778e-9,
    -2.75573141792967388112e-7,
    2.48015872888517045348e-5,
    -1.38888888888730564116e-3,
    4.16666666666665929218e-2,
];

#[inline]
fn horner(coeffs: &[f64; 6], zz: f64) -> f64 {
    ((((coeffs[0] * zz + coeffs[1]) * zz + coeffs[2]) * zz + coeffs[3]) * zz + coeffs[4]) * zz
        + coeffs[5]
}

/// sin(z) for |z| <= π/4
#[inline]
fn sin_poly(z: f64) -> f64 {
    let zz = z * z;
    z + z * zz * horner(&SIN_COEFFS, zz)
}

/// cos(z) for |z| <= π/4
#[inline]
fn cos_poly(z: f64) -> f64 {
    let zz = z * z;
    1.0 - 0.5 * zz + zz * zz * horner(&COS_COEFFS, zz)
}

/// Reduce non-negative `x` to an even octant `j` in 0..8 and a residual in [-π/4, π/4]
#[inline]
fn octant(x: f64) -> (u64, f64) {
    if x >= REDUCE_THRESHOLD {
        return payne_hanek(x);
    }

    let mut j = (x * (4.0 * FRAC_1_PI)) as u64;
    let mut y = j as f64;

    // map zeros to origin
    if j & 1 == 1 {
        j += 1;
        y += 1.0;
    }
    j &= 7;

    (j, ((x - y * PI4_A) - y * PI4_B) - y * PI4_C)
}

/// Sine of `x` (radians)
pub fn sin(x: f64) -> f64 {
    let mut negate = x.is_sign_negative();
    let (mut j, z) = octant(x.abs());

    if j > 3 {
        negate = !negate;
        j -= 4;
    }

    let y = if j == 1 || j == 2 { cos_poly(z) } else { sin_poly(z) };

    if negate {
        -y
    } else {
        y
    }
}

/// Cosine of `x` (radians)
pub fn cos(x: f64) -> f64 {
    let mut negate = false;
    let (mut j, z) = octant(x.abs());

    if j > 3 {
        negate = !negate;
        j -= 4;
    }
    if j > 1 {
        negate = !negate;
    }

    let y = if j == 1 || j == 2 { sin_poly(z) } else { cos_poly(z) };

    if negate {
        -y
    } else {
        y
    }
}

/// Both sin(x) and cos(x), sharing one reduction
pub fn sin_cos(x: f64) -> (f64, f64) {
    let mut sin_negate = x.is_sign_negative();
    let mut cos_negate = false;
    let (mut j, z) = octant(x.abs());

    if j > 3 {
        sin_negate = !sin_negate;
        cos_negate = !cos_negate;
        j -= 4;
    }
    if j > 1 {
        cos_negate = !cos_negate;
    }

    let (s, c) = if j == 1 || j == 2 {
        (cos_poly(z), sin_poly(z))
    } else {
        (sin_poly(z), cos_poly(z))
    };

    (
        if sin_negate { -s } else { s },
        if cos_negate { -c } else { c },
    )
}
