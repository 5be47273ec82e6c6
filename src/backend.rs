//! Wavelet backends: the DWT capability the runner and the reference
//! harness are written against.
//!
//! Arrays cross the seam as f64. A backend rounds its inputs into its sample
//! type, runs every operation there, and widens the results back.

use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;

use half::bf16;

use crate::array::Matrix;
use crate::boundary::BoundaryMode;
use crate::dwt;
use crate::error::{Error, Result};
use crate::lifting::LiftingScheme;
use crate::num::{narrow, widen, Precision, Sample};
use crate::separable::Bands2d;
use crate::wavelet::Wavelet;

/// Approximation and detail coefficients of a 1-D transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Coeffs1d {
    pub approx: Vec<f64>,
    pub detail: Vec<f64>,
}

/// Single-level forward and inverse DWT in one and two dimensions.
pub trait DwtBackend {
    /// `<algorithm>-<precision>`, for logs.
    fn label(&self) -> String;

    fn forward_1d(&self, x: &[f64], wavelet: &Wavelet, mode: BoundaryMode) -> Result<Coeffs1d>;

    fn inverse_1d(&self, coeffs: &Coeffs1d, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Vec<f64>>;

    fn forward_2d(&self, x: &Matrix, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Bands2d>;

    fn inverse_2d(&self, bands: &Bands2d, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Matrix>;
}

fn narrow_bands<T: Sample>(bands: &Bands2d) -> Bands2d<T> {
    bands.map(T::from_f64)
}

fn widen_bands<T: Sample>(bands: &Bands2d<T>) -> Bands2d {
    bands.map(|v: T| v.to_f64())
}

/// Filter-bank convolution, PyWavelets-compatible output lengths.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvolutionBackend<T> {
    _sample: PhantomData<T>,
}

impl<T: Sample> ConvolutionBackend<T> {
    pub fn new() -> Self {
        Self {
            _sample: PhantomData,
        }
    }
}

impl<T: Sample> DwtBackend for ConvolutionBackend<T> {
    fn label(&self) -> String {
        format!("{}-{}", Algorithm::Convolution, T::NAME)
    }

    fn forward_1d(&self, x: &[f64], wavelet: &Wavelet, mode: BoundaryMode) -> Result<Coeffs1d> {
        let (a, d) = dwt::dwt(&narrow::<T>(x), wavelet, mode)?;
        Ok(Coeffs1d {
            approx: widen(&a),
            detail: widen(&d),
        })
    }

    fn inverse_1d(&self, coeffs: &Coeffs1d, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Vec<f64>> {
        let a = narrow::<T>(&coeffs.approx);
        let d = narrow::<T>(&coeffs.detail);
        Ok(widen(&dwt::idwt(&a, &d, wavelet, mode)?))
    }

    fn forward_2d(&self, x: &Matrix, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Bands2d> {
        let bands = dwt::dwt2(&x.map(T::from_f64), wavelet, mode)?;
        Ok(widen_bands(&bands))
    }

    fn inverse_2d(&self, bands: &Bands2d, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Matrix> {
        let y = dwt::idwt2(&narrow_bands::<T>(bands), wavelet, mode)?;
        Ok(y.map(|v: T| v.to_f64()))
    }
}

/// Lifting-scheme transform; only wavelets with a known factorisation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiftingBackend<T> {
    _sample: PhantomData<T>,
}

impl<T: Sample> LiftingBackend<T> {
    pub fn new() -> Self {
        Self {
            _sample: PhantomData,
        }
    }
}

impl<T: Sample> DwtBackend for LiftingBackend<T> {
    fn label(&self) -> String {
        format!("{}-{}", Algorithm::Lifting, T::NAME)
    }

    fn forward_1d(&self, x: &[f64], wavelet: &Wavelet, mode: BoundaryMode) -> Result<Coeffs1d> {
        let (a, d) = LiftingScheme::for_wavelet(wavelet)?.forward(&narrow::<T>(x), mode)?;
        Ok(Coeffs1d {
            approx: widen(&a),
            detail: widen(&d),
        })
    }

    fn inverse_1d(&self, coeffs: &Coeffs1d, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Vec<f64>> {
        let scheme = LiftingScheme::for_wavelet(wavelet)?;
        let a = narrow::<T>(&coeffs.approx);
        let d = narrow::<T>(&coeffs.detail);
        Ok(widen(&scheme.inverse(&a, &d, mode)?))
    }

    fn forward_2d(&self, x: &Matrix, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Bands2d> {
        let scheme = LiftingScheme::for_wavelet(wavelet)?;
        Ok(widen_bands(&scheme.forward_2d(&x.map(T::from_f64), mode)?))
    }

    fn inverse_2d(&self, bands: &Bands2d, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Matrix> {
        let scheme = LiftingScheme::for_wavelet(wavelet)?;
        let y = scheme.inverse_2d(&narrow_bands::<T>(bands), mode)?;
        Ok(y.map(|v: T| v.to_f64()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Convolution,
    Lifting,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Convolution, Algorithm::Lifting];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Convolution => "convolution",
            Algorithm::Lifting => "lifting",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "convolution" | "conv" => Ok(Algorithm::Convolution),
            "lifting" => Ok(Algorithm::Lifting),
            other => Err(Error::InvalidConfig(format!("unknown algorithm `{other}`"))),
        }
    }
}

/// The backend for one precision configuration.
pub fn backend(algorithm: Algorithm, precision: Precision) -> Box<dyn DwtBackend> {
    match (algorithm, precision) {
        (Algorithm::Convolution, Precision::F64) => Box::new(ConvolutionBackend::<f64>::new()),
        (Algorithm::Convolution, Precision::F32) => Box::new(ConvolutionBackend::<f32>::new()),
        (Algorithm::Convolution, Precision::Bf16) => Box::new(ConvolutionBackend::<bf16>::new()),
        (Algorithm::Lifting, Precision::F64) => Box::new(LiftingBackend::<f64>::new()),
        (Algorithm::Lifting, Precision::F32) => Box::new(LiftingBackend::<f32>::new()),
        (Algorithm::Lifting, Precision::Bf16) => Box::new(LiftingBackend::<bf16>::new()),
    }
}
