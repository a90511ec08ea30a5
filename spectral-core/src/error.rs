//! Error type shared by the transform, window and analyzer paths

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpectrumError {
    #[error("Length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid transform length {0}: must be a power of two >= 2")]
    InvalidTransformLength(usize),

    #[error("Invalid sample rate {0} Hz")]
    InvalidSampleRate(u32),
}

pub type Result<T> = std::result::Result<T, SpectrumError>;

/// Check that `len` is a usable transform length (power of two, at least 2)
pub(crate) fn check_transform_length(len: usize) -> Result<()> {
    if len >= 2 && len.is_power_of_two() {
        Ok(())
    } else {
        Err(SpectrumError::InvalidTransformLength(len))
    }
}

/// Check that two sequences have the same length
pub(crate) fn check_same_length(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(SpectrumError::LengthMismatch { expected, actual })
    }
}
