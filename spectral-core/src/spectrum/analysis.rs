//! High-level spectrum analyzer
//!
//! Window, lift, transform, and label each positive-frequency bin with its
//! frequency in Hz.

use super::blocks::resolve_block_size;
use super::fft::{default_engine, lift, FftEngine};
use super::windowing::apply_window;
use crate::error::{check_same_length, check_transform_length, Result, SpectrumError};
use crate::windows::{WindowBank, WindowType};

/// Magnitude of one frequency bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPower {
    /// Bin frequency in Hz, truncated toward zero
    pub frequency: u32,

    /// |X[k]|
    pub magnitude: f64,
}

impl FrequencyPower {
    /// Magnitude in dB relative to `reference`
    pub fn magnitude_db(&self, reference: f64) -> f64 {
        let mag_clamped = self.magnitude.max(1e-10); // Avoid log(0)
        20.0 * (mag_clamped / reference).log10()
    }
}

/// Strongest bin of a spectrum; the lowest frequency wins ties
pub fn strongest(spectrum: &[FrequencyPower]) -> Option<FrequencyPower> {
    spectrum.iter().copied().fold(None, |best, pair| match best {
        Some(current) if current.magnitude >= pair.magnitude => Some(current),
        _ => Some(pair),
    })
}

/// Analyze one block on the default engine
///
/// See [`analyze_with`].
pub fn analyze(sample_rate: u32, samples: &mut [f64], window: Option<&[f64]>) -> Result<Vec<FrequencyPower>> {
    analyze_with(default_engine(), sample_rate, samples, window)
}

/// Analyze one block of samples
///
/// # Arguments
/// * `engine` - FFT engine (and twiddle cache) to transform with
/// * `sample_rate` - Sample rate in Hz
/// * `samples` - Block of N samples, N a power of two >= 2; windowed in place
/// * `window` - Optional window coefficients of length N
///
/// # Returns
/// N/2 - 1 pairs for bins 1..N/2, in ascending frequency. DC and the Nyquist
/// bin and above are excluded.
///
/// # Errors
/// `InvalidSampleRate` for a zero rate, `InvalidTransformLength` for a bad block
/// length, `LengthMismatch` when the window length differs from the block
pub fn analyze_with(
    engine: &FftEngine,
    sample_rate: u32,
    samples: &mut [f64],
    window: Option<&[f64]>,
) -> Result<Vec<FrequencyPower>> {
    if sample_rate == 0 {
        return Err(SpectrumError::InvalidSampleRate(sample_rate));
    }
    let n = samples.len();
    check_transform_length(n)?;

    if let Some(window) = window {
        apply_window(window, samples)?;
    }

    let spectrum = engine.fft(&lift(samples))?;

    Ok((1..n / 2)
        .map(|bin| FrequencyPower {
            frequency: bin_frequency(bin, sample_rate, n),
            magnitude: spectrum[bin].norm(),
        })
        .collect())
}

fn bin_frequency(bin: usize, sample_rate: u32, block_size: usize) -> u32 {
    (bin as u64 * sample_rate as u64 / block_size as u64) as u32
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Requested block size; resolved to a supported size
    pub block_size: usize,

    /// Window type for spectral analysis
    pub window_type: WindowType,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Window each block before transforming
    pub apply_window: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            block_size: 2048,
            window_type: WindowType::Blackman,
            sample_rate: 44100,
            apply_window: true,
        }
    }
}

/// Block spectrum analyzer with its own transform and window caches
#[derive(Debug)]
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    block_size: usize,
    engine: FftEngine,
    windows: WindowBank,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Self {
        let block_size = resolve_block_size(config.block_size);
        let engine = FftEngine::new();
        let windows = WindowBank::new();

        Self {
            config,
            block_size,
            engine,
            windows,
        }
    }

    /// Analyze one block of exactly [`block_size`](Self::block_size) samples
    ///
    /// The input is copied; the configured window is applied to the copy.
    pub fn analyze(&self, samples: &[f64]) -> Result<Vec<FrequencyPower>> {
        check_same_length(self.block_size, samples.len())?;

        let mut block = samples.to_vec();
        if self.config.apply_window {
            let window = self.windows.coefficients(self.config.window_type, self.block_size);
            analyze_with(&self.engine, self.config.sample_rate, &mut block, Some(&*window))
        } else {
            analyze_with(&self.engine, self.config.sample_rate, &mut block, None)
        }
    }

    /// Frequencies (Hz) of the bins [`analyze`](Self::analyze) reports, in order
    pub fn bin_frequencies(&self) -> Vec<u32> {
        (1..self.block_size / 2)
            .map(|bin| bin_frequency(bin, self.config.sample_rate, self.block_size))
            .collect()
    }

    /// Update configuration, keeping the cached tables
    pub fn update_config(&mut self, config: AnalyzerConfig) {
        self.block_size = resolve_block_size(config.block_size);
        self.config = config;
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Resolved block size
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn engine(&self) -> &FftEngine {
        &self.engine
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
