//! # dwt-precision - precision harness for single-level wavelet transforms
//!
//! Measures how far single-level discrete wavelet transforms drift when they
//! run in reduced floating-point precision. The harness is three batch stages
//! connected only through a directory tree of raw little-endian f64 files:
//!
//! 1. **generate**: random input signals for every configured input;
//! 2. **transform**: forward and inverse DWT of every (wavelet, input) pair
//!    at one precision configuration;
//! 3. **compare**: elementwise absolute and relative error between two
//!    precision configurations.
//!
//! A standalone [`reference`] utility packs seeded f32 coefficients into a
//! single array for checking other implementations' layouts.
//!
//! ## Precision configurations
//!
//! | algorithm     | `f64` | `f32` | `bf16` |
//! |---------------|-------|-------|--------|
//! | `convolution` | reference | yes | yes |
//! | `lifting`     | yes   | yes   | yes    |
//!
//! The convolution engine reproduces PyWavelets' coefficient lengths and
//! values for every boundary mode. The lifting engine covers the wavelets
//! with a known factorisation (`haar`/`db1`, `db2`/`sym2`).
//!
//! ## Example
//!
//! ```
//! use dwt_precision::{backend, Algorithm, BoundaryMode, Precision, Wavelet};
//!
//! let wavelet = Wavelet::from_name("db2")?;
//! let b = backend(Algorithm::Convolution, Precision::F32);
//! let x: Vec<f64> = (0..16).map(|i| i as f64).collect();
//! let c = b.forward_1d(&x, &wavelet, BoundaryMode::Periodization)?;
//! assert_eq!(c.approx.len(), 8);
//! let y = b.inverse_1d(&c, &wavelet, BoundaryMode::Periodization)?;
//! assert!(x.iter().zip(&y).all(|(a, b)| (a - b).abs() < 1e-4));
//! # Ok::<(), dwt_precision::Error>(())
//! ```

/// Sample types and precision names
pub mod num;

/// Library error type
pub mod error;

/// Dense arrays and the raw f64 artifact codec
pub mod array;

/// Boundary extension modes
pub mod boundary;

/// Orthogonal wavelet filter banks
pub mod wavelet;

/// Separable 2-D driver shared by both engines
pub mod separable;

/// Filter-bank convolution DWT (PyWavelets-compatible)
pub mod dwt;

/// Lifting-scheme DWT
pub mod lifting;

/// The DWT capability, one backend per precision configuration
pub mod backend;

/// Experiment configuration
pub mod config;

/// Signal Generator
pub mod generate;

/// Transform Runner
pub mod transform;

/// Precision Comparator
pub mod compare;

/// Packed reference coefficients
pub mod reference;

pub use array::{Array, Matrix, Suffix};
pub use backend::{backend, Algorithm, Coeffs1d, DwtBackend};
pub use boundary::BoundaryMode;
pub use compare::{ErrorStats, Outcome, Report};
pub use config::{ComparisonPair, Config, InputDescriptor, WaveletDescriptor};
pub use error::{Error, Result};
pub use num::{Precision, Sample};
pub use separable::Bands2d;
pub use transform::{RunSummary, TransformRunner};
pub use wavelet::Wavelet;
