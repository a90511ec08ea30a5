//! Spectral analysis with FFT

pub mod analysis;
pub mod bitrev;
pub mod blocks;
pub mod fft;
pub mod twiddle;
pub mod windowing;

pub use analysis::{analyze, analyze_with, strongest, AnalyzerConfig, FrequencyPower, SpectrumAnalyzer};
pub use bitrev::{reorder, reverse_bits, reverse_first_bits};
pub use blocks::{block_size_or_default, resolve_block_size, SUPPORTED_BLOCK_SIZES};
pub use fft::{convolve, fft, ifft, lift, FftEngine};
pub use twiddle::TwiddleCache;
pub use windowing::apply_window;
