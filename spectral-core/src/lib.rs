//! Spectral Kernel - radix-2 FFT and spectrum analysis core
//!
//! Power-of-two FFT/IFFT/convolution with memoized twiddle factors, analysis
//! windows, and the sine/cosine kernels the transform is built on.

pub mod error;
pub mod spectrum;
pub mod trig;
pub mod windows;

pub use error::{Result, SpectrumError};
pub use num_complex::Complex64;
pub use spectrum::{analyze, FftEngine, FrequencyPower, SpectrumAnalyzer};
pub use windows::{generate_window, WindowBank, WindowType};
