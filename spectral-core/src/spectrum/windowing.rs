//! Applying windows to time-domain blocks before the FFT

use crate::error::{check_same_length, Result};
use crate::windows::{generate_window, WindowType};

/// Multiply `samples` by `window` in place
///
/// # Errors
/// `LengthMismatch` if the lengths differ; `samples` is left untouched
pub fn apply_window(window: &[f64], samples: &mut [f64]) -> Result<()> {
    check_same_length(window.len(), samples.len())?;

    for (s, w) in samples.iter_mut().zip(window.iter()) {
        *s *= w;
    }
    Ok(())
}

/// Mean window coefficient (amplitude loss of a windowed sinusoid)
pub fn coherent_gain(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 1.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Calculate window correction factor
///
/// Multiplying a windowed magnitude spectrum by this factor restores the
/// amplitude of a sinusoid to its unwindowed level.
pub fn window_correction_factor(window_type: WindowType, length: usize) -> f64 {
    1.0 / coherent_gain(&generate_window(window_type, length))
}
