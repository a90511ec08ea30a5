//! Window functions for spectral analysis
//!
//! Closed-form generators over n = 0..N-1 with denominator N-1 (symmetric windows),
//! plus a per-size cache for the supported block sizes.

pub mod bank;

pub use bank::WindowBank;

use crate::trig;
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(N-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(N-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(N-1)) + 0.08*cos(4πn/(N-1))
    Blackman,

    /// Bartlett (triangular) window, rising and falling with slope 2/(N-1)
    Bartlett,

    /// Flat-top window: 5-term cosine sum, very flat passband for amplitude readings
    FlatTop,

    /// Rectangular window (no windowing)
    Rectangular,
}

/// Flat-top cosine-sum coefficients a0..a4, applied with alternating sign
const FLAT_TOP_COEFFS: [f64; 5] = [0.2156, 0.4166, 0.2773, 0.0836, 0.0069];

impl WindowType {
    pub const ALL: [WindowType; 6] = [
        WindowType::Hann,
        WindowType::Hamming,
        WindowType::Blackman,
        WindowType::Bartlett,
        WindowType::FlatTop,
        WindowType::Rectangular,
    ];

    /// Position in [`WindowType::ALL`]
    pub fn index(self) -> usize {
        match self {
            WindowType::Hann => 0,
            WindowType::Hamming => 1,
            WindowType::Blackman => 2,
            WindowType::Bartlett => 3,
            WindowType::FlatTop => 4,
            WindowType::Rectangular => 5,
        }
    }

    /// Coefficient at position `n` of a window spanning `span = N-1` intervals
    fn coefficient(self, n: usize, span: f64) -> f64 {
        let phase = 2.0 * PI * n as f64 / span;

        match self {
            WindowType::Hann => 0.5 - 0.5 * trig::cos(phase),

            WindowType::Hamming => 0.54 - 0.46 * trig::cos(phase),

            WindowType::Blackman => 0.42 - 0.5 * trig::cos(phase) + 0.08 * trig::cos(2.0 * phase),

            WindowType::Bartlett => {
                let ramp = 2.0 * n as f64 / span;
                if ramp <= 1.0 {
                    ramp
                } else {
                    2.0 - ramp
                }
            }

            WindowType::FlatTop => {
                let [a0, a1, a2, a3, a4] = FLAT_TOP_COEFFS;
                a0 - a1 * trig::cos(phase) + a2 * trig::cos(2.0 * phase)
                    - a3 * trig::cos(3.0 * phase)
                    + a4 * trig::cos(4.0 * phase)
            }

            WindowType::Rectangular => 1.0,
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (N)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..N-1; `[]` for N = 0 and
/// `[1.0]` for N = 1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    match length {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let span = (length - 1) as f64;
            (0..length).map(|n| window_type.coefficient(n, span)).collect()
        }
    }
}
