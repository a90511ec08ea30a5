//! Radix-2 decimation-in-time FFT engine
//!
//! Iterative Cooley-Tukey over bit-reversed input with ping-pong buffers.
//! The forward transform is unnormalized; the inverse divides by N.

use super::bitrev::reorder;
use super::twiddle::TwiddleCache;
use crate::error::{check_same_length, check_transform_length, Result};
use num_complex::Complex64;
use once_cell::sync::Lazy;

static DEFAULT_ENGINE: Lazy<FftEngine> = Lazy::new(FftEngine::new);

/// Process-wide engine used by the free functions in this module
pub fn default_engine() -> &'static FftEngine {
    &DEFAULT_ENGINE
}

/// Forward transform on the default engine
pub fn fft(input: &[Complex64]) -> Result<Vec<Complex64>> {
    DEFAULT_ENGINE.fft(input)
}

/// Inverse transform on the default engine
pub fn ifft(input: &[Complex64]) -> Result<Vec<Complex64>> {
    DEFAULT_ENGINE.ifft(input)
}

/// Circular convolution on the default engine
pub fn convolve(x: &[Complex64], y: &[Complex64]) -> Result<Vec<Complex64>> {
    DEFAULT_ENGINE.convolve(x, y)
}

/// Lift a real block to complex samples with zero imaginary part
pub fn lift(samples: &[f64]) -> Vec<Complex64> {
    let mut lifted = Vec::with_capacity(samples.len());
    for &sample in samples {
        lifted.push(Complex64::new(sample, 0.0));
    }
    lifted
}

/// FFT engine owning its twiddle-factor cache
#[derive(Debug, Default)]
pub struct FftEngine {
    twiddles: TwiddleCache,
}

impl FftEngine {
    /// Create an engine with an empty twiddle cache
    pub fn new() -> Self {
        Self {
            twiddles: TwiddleCache::new(),
        }
    }

    /// Create an engine around an existing (possibly pre-seeded) cache
    pub fn with_cache(twiddles: TwiddleCache) -> Self {
        Self { twiddles }
    }

    pub fn twiddles(&self) -> &TwiddleCache {
        &self.twiddles
    }

    pub fn twiddles_mut(&mut self) -> &mut TwiddleCache {
        &mut self.twiddles
    }

    /// Compute the forward DFT of `input`
    ///
    /// # Errors
    /// `InvalidTransformLength` unless the length is a power of two >= 2
    pub fn fft(&self, input: &[Complex64]) -> Result<Vec<Complex64>> {
        let n = input.len();
        check_transform_length(n)?;

        let factors = self.twiddles.table(n);
        let mut work = reorder(input);
        let mut out = vec![Complex64::new(0.0, 0.0); n];

        let mut stage = 2;
        while stage <= n {
            let blocks = n / stage;
            let half = stage / 2;

            for b in (0..n).step_by(stage) {
                if stage == 2 {
                    out[b] = work[b] + work[b + 1];
                    out[b + 1] = work[b] - work[b + 1];
                } else {
                    for k in 0..half {
                        let idx = b + k;
                        let idx2 = idx + half;
                        let t = work[idx2] * factors[blocks * k];
                        out[idx] = work[idx] + t;
                        out[idx2] = work[idx] - t;
                    }
                }
            }

            std::mem::swap(&mut work, &mut out);
            stage *= 2;
        }

        Ok(work)
    }

    /// Compute the inverse DFT of `input`, normalized by 1/N
    ///
    /// Transforms the circularly reversed input (index 0 fixed), which equals
    /// N times the inverse transform.
    pub fn ifft(&self, input: &[Complex64]) -> Result<Vec<Complex64>> {
        let n = input.len();
        check_transform_length(n)?;

        let mut reversed = Vec::with_capacity(n);
        reversed.push(input[0]);
        reversed.extend(input[1..].iter().rev());

        let scale = 1.0 / n as f64;
        let mut output = self.fft(&reversed)?;
        for value in output.iter_mut() {
            *value *= scale;
        }
        Ok(output)
    }

    /// Circular convolution of two equal-length sequences via the frequency domain
    ///
    /// # Errors
    /// `LengthMismatch` if the lengths differ, `InvalidTransformLength` if the
    /// shared length is not a power of two >= 2
    pub fn convolve(&self, x: &[Complex64], y: &[Complex64]) -> Result<Vec<Complex64>> {
        check_same_length(x.len(), y.len())?;

        let x_fft = self.fft(x)?;
        let y_fft = self.fft(y)?;
        let product: Vec<Complex64> = x_fft.iter().zip(y_fft.iter()).map(|(a, b)| a * b).collect();

        self.ifft(&product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpectrumError;
    use proptest::prelude::*;
    use rustfft::FftPlanner;
    use std::f64::consts::PI;

    fn assert_complex_close(actual: &[Complex64], expected: &[Complex64], tolerance: f64) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
            assert!(
                (a - e).norm() <= tolerance,
                "Mismatch at {}: {} vs {}",
                i,
                a,
                e
            );
        }
    }

    fn test_signal(n: usize) -> Vec<Complex64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                Complex64::new((0.3 * t).sin() + 0.25 * (1.7 * t).cos(), 0.5 * (0.11 * t).cos())
            })
            .collect()
    }

    #[test]
    fn test_fft_dc_signal() {
        let engine = FftEngine::new();
        let spectrum = engine.fft(&vec![Complex64::new(1.0, 0.0); 64]).unwrap();

        assert!((spectrum[0].re - 64.0).abs() < 1e-12);
        for bin in &spectrum[1..] {
            assert!(bin.norm() < 1e-12);
        }
    }

    #[test]
    fn test_fft_two_points() {
        let engine = FftEngine::new();
        let spectrum = engine
            .fft(&[Complex64::new(3.0, 1.0), Complex64::new(1.0, -2.0)])
            .unwrap();
        assert_eq!(spectrum, vec![Complex64::new(4.0, -1.0), Complex64::new(2.0, 3.0)]);
    }

    #[test]
    fn test_fft_impulse_is_flat() {
        let engine = FftEngine::new();
        let mut input = vec![Complex64::new(0.0, 0.0); 32];
        input[0] = Complex64::new(1.0, 0.0);

        let spectrum = engine.fft(&input).unwrap();
        assert_complex_close(&spectrum, &vec![Complex64::new(1.0, 0.0); 32], 1e-15);
    }

    #[test]
    fn test_fft_cosine_bins() {
        let engine = FftEngine::new();
        let n = 256;
        let input: Vec<Complex64> = (0..n)
            .map(|i| Complex64::new((2.0 * PI * 10.0 * i as f64 / n as f64).cos(), 0.0))
            .collect();

        let spectrum = engine.fft(&input).unwrap();
        // A cosine on bin 10 splits into bins 10 and N-10, each N/2
        assert!((spectrum[10].norm() - 128.0).abs() < 1e-9);
        assert!((spectrum[n - 10].norm() - 128.0).abs() < 1e-9);
        assert!(spectrum[11].norm() < 1e-9);
    }

    #[test]
    fn test_fft_matches_rustfft() {
        let engine = FftEngine::new();
        let mut planner = FftPlanner::<f64>::new();

        for log2 in 1..=13 {
            let n = 1usize << log2;
            let input = test_signal(n);

            let mut expected = input.clone();
            planner.plan_fft_forward(n).process(&mut expected);

            let actual = engine.fft(&input).unwrap();
            let tolerance = 1e-12 * n as f64;
            assert_complex_close(&actual, &expected, tolerance);
        }
    }

    #[test]
    fn test_ifft_matches_rustfft() {
        let engine = FftEngine::new();
        let n = 512;
        let input = test_signal(n);

        let mut expected = input.clone();
        FftPlanner::<f64>::new().plan_fft_inverse(n).process(&mut expected);
        for value in expected.iter_mut() {
            *value /= n as f64;
        }

        assert_complex_close(&engine.ifft(&input).unwrap(), &expected, 1e-12);
    }

    #[test]
    fn test_invalid_lengths() {
        let engine = FftEngine::new();
        assert_eq!(engine.fft(&[]), Err(SpectrumError::InvalidTransformLength(0)));
        assert_eq!(
            engine.fft(&[Complex64::new(1.0, 0.0)]),
            Err(SpectrumError::InvalidTransformLength(1))
        );
        assert_eq!(
            engine.ifft(&vec![Complex64::new(0.0, 0.0); 6]),
            Err(SpectrumError::InvalidTransformLength(6))
        );
    }

    #[test]
    fn test_convolve_with_delta_shifts() {
        let engine = FftEngine::new();
        let x = test_signal(16);
        let mut delta = vec![Complex64::new(0.0, 0.0); 16];
        delta[3] = Complex64::new(1.0, 0.0);

        let result = engine.convolve(&x, &delta).unwrap();
        for i in 0..16 {
            assert!((result[(i + 3) % 16] - x[i]).norm() < 1e-12);
        }
    }

    #[test]
    fn test_convolve_matches_direct_circular_sum() {
        let engine = FftEngine::new();
        let n = 8;
        let x = lift(&[1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
        let y = lift(&[0.5, -1.0, 0.25, 0.0, 0.0, 0.0, 0.0, 2.0]);

        let expected: Vec<Complex64> = (0..n)
            .map(|k| (0..n).map(|m| x[m] * y[(k + n - m) % n]).sum())
            .collect();

        assert_complex_close(&engine.convolve(&x, &y).unwrap(), &expected, 1e-12);
    }

    #[test]
    fn test_convolve_length_mismatch() {
        let engine = FftEngine::new();
        let x = vec![Complex64::new(1.0, 0.0); 8];
        let y = vec![Complex64::new(1.0, 0.0); 4];
        assert_eq!(
            engine.convolve(&x, &y),
            Err(SpectrumError::LengthMismatch { expected: 8, actual: 4 })
        );
    }

    #[test]
    fn test_engine_uses_own_cache() {
        let mut engine = FftEngine::new();
        engine.fft(&test_signal(128)).unwrap();
        assert_eq!(engine.twiddles().cached_sizes(), vec![128]);

        engine.twiddles_mut().clear();
        assert!(engine.twiddles().cached_sizes().is_empty());
    }

    #[test]
    fn test_lift() {
        let lifted = lift(&[1.5, -2.0]);
        assert_eq!(lifted, vec![Complex64::new(1.5, 0.0), Complex64::new(-2.0, 0.0)]);
    }

    #[test]
    fn test_default_engine_free_functions() {
        let input = test_signal(64);
        let spectrum = fft(&input).unwrap();
        assert_complex_close(&ifft(&spectrum).unwrap(), &input, 1e-12);
        assert!(default_engine().twiddles().is_cached(64));
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            log2 in 1u32..=11,
            values in proptest::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 2048),
        ) {
            let engine = FftEngine::new();
            let n = 1usize << log2;
            let input: Vec<Complex64> = values[..n].iter().map(|&(re, im)| Complex64::new(re, im)).collect();

            let restored = engine.ifft(&engine.fft(&input).unwrap()).unwrap();
            let scale = input.iter().map(|c| c.norm()).fold(1.0, f64::max);
            for (a, b) in input.iter().zip(restored.iter()) {
                prop_assert!((a - b).norm() <= 1e-9 * scale);
            }
        }
    }
}
