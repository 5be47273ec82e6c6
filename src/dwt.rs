//! Single-level DWT by filter-bank convolution
//!
//! Output conventions match PyWavelets, so coefficient files written here
//! line up element for element with `pywt.dwt`/`pywt.dwt2`:
//!
//! - non-periodization modes: `floor((n + F - 1) / 2)` coefficients per band,
//!   reconstruction of length `2L - F + 2`;
//! - `periodization`: `ceil(n / 2)` coefficients (odd inputs are padded by
//!   repeating the last sample), reconstruction of length `2L`.
//!
//! All arithmetic runs in the sample type `T`; the filters are rounded into
//! `T` once up front.

use crate::array::Matrix;
use crate::boundary::{extend, BoundaryMode};
use crate::error::{Error, Result};
use crate::num::Sample;
use crate::separable::{self, Bands2d};
use crate::wavelet::Wavelet;

/// Number of coefficients per band for an input of length `n`.
pub fn dwt_len(n: usize, filter_len: usize, mode: BoundaryMode) -> usize {
    match mode {
        BoundaryMode::Periodization => n.div_ceil(2),
        _ => (n + filter_len - 1) / 2,
    }
}

/// Length of the reconstruction from `coeffs` coefficients per band, if any.
pub fn idwt_len(coeffs: usize, filter_len: usize, mode: BoundaryMode) -> Option<usize> {
    match mode {
        BoundaryMode::Periodization => Some(2 * coeffs),
        _ => (2 * coeffs + 2).checked_sub(filter_len),
    }
}

fn convolve_down<T: Sample>(x: &[T], filter: &[T], mode: BoundaryMode) -> Vec<T> {
    let f = filter.len() as isize;
    if mode == BoundaryMode::Periodization {
        let mut padded = x.to_vec();
        if padded.len() % 2 == 1 {
            padded.push(x[x.len() - 1]);
        }
        let m = padded.len() as isize;
        (0..m / 2)
            .map(|o| {
                let i = f / 2 + 2 * o;
                filter.iter().enumerate().fold(T::zero(), |acc, (j, &h)| {
                    h.mul_add(padded[(i - j as isize).rem_euclid(m) as usize], acc)
                })
            })
            .collect()
    } else {
        let out_len = dwt_len(x.len(), filter.len(), mode) as isize;
        (0..out_len)
            .map(|o| {
                let i = 2 * o + 1;
                filter.iter().enumerate().fold(T::zero(), |acc, (j, &h)| {
                    h.mul_add(extend(x, i - j as isize, mode), acc)
                })
            })
            .collect()
    }
}

/// Forward single-level DWT: `(approximation, detail)`.
pub fn dwt<T: Sample>(x: &[T], wavelet: &Wavelet, mode: BoundaryMode) -> Result<(Vec<T>, Vec<T>)> {
    if x.is_empty() {
        return Err(Error::EmptyInput);
    }
    let (lo, hi) = wavelet.analysis_filters::<T>();
    Ok((convolve_down(x, &lo, mode), convolve_down(x, &hi, mode)))
}

/// Inverse single-level DWT.
///
/// Implemented as the transpose of the analysis operator, which for an
/// orthogonal bank is the synthesis operator: sample `n` collects
/// `dec[i - n] * c[o]` from every coefficient `o` whose window `i` covers it.
pub fn idwt<T: Sample>(
    approx: &[T],
    detail: &[T],
    wavelet: &Wavelet,
    mode: BoundaryMode,
) -> Result<Vec<T>> {
    if approx.len() != detail.len() {
        return Err(Error::CoefficientMismatch {
            approx: approx.len(),
            detail: detail.len(),
        });
    }
    if approx.is_empty() {
        return Err(Error::EmptyInput);
    }
    let (lo, hi) = wavelet.analysis_filters::<T>();
    let f = lo.len() as isize;
    let too_few = Error::TooFewCoefficients {
        coeffs: approx.len(),
        filter: lo.len(),
    };
    let out_len = idwt_len(approx.len(), lo.len(), mode).ok_or(too_few)?;
    let mut out = vec![T::zero(); out_len];

    if mode == BoundaryMode::Periodization {
        let m = out_len as isize;
        for (o, (&a, &d)) in approx.iter().zip(detail).enumerate() {
            let i = f / 2 + 2 * o as isize;
            for j in 0..lo.len() {
                let n = (i - j as isize).rem_euclid(m) as usize;
                out[n] = lo[j].mul_add(a, hi[j].mul_add(d, out[n]));
            }
        }
    } else {
        // Coefficient `o` covers signal positions `2o + 1 - j`, j in 0..F.
        for (n, y) in out.iter_mut().enumerate() {
            let n = n as isize;
            let first = (n - 1).div_euclid(2).max(0) as usize;
            let mut acc = T::zero();
            for o in first..approx.len() {
                let j = 2 * o as isize + 1 - n;
                if j < 0 {
                    continue;
                }
                if j >= f {
                    break;
                }
                let j = j as usize;
                acc = lo[j].mul_add(approx[o], hi[j].mul_add(detail[o], acc));
            }
            *y = acc;
        }
    }
    Ok(out)
}

/// Forward single-level 2-D DWT.
pub fn dwt2<T: Sample>(x: &Matrix<T>, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Bands2d<T>> {
    separable::forward_2d(x, |v: &[T]| dwt(v, wavelet, mode))
}

/// Inverse single-level 2-D DWT. All four bands must share one shape.
pub fn idwt2<T: Sample>(bands: &Bands2d<T>, wavelet: &Wavelet, mode: BoundaryMode) -> Result<Matrix<T>> {
    let shape = bands.ll.shape();
    for band in [&bands.lh, &bands.hl, &bands.hh] {
        if band.shape() != shape {
            return Err(Error::ShapesDiffer {
                left: shape.to_vec(),
                right: band.shape().to_vec(),
            });
        }
    }
    separable::inverse_2d(bands, |a: &[T], d: &[T]| idwt(a, d, wavelet, mode))
}
