//! Lifting-scheme DWT
//!
//! The signal is split into its even and odd samples, then alternately
//! lifted: a *predict* step corrects the odd part from the even part, an
//! *update* step corrects the even part from the odd part, and a final
//! *scale* step normalises both. Every step is undone exactly by running it
//! backwards with the sign flipped, so reconstruction does not depend on the
//! boundary mode.
//!
//! The approximation is the (lifted) even part, `ceil(n/2)` samples; the
//! detail is the odd part, `floor(n/2)` samples.

use crate::array::Matrix;
use crate::boundary::{extend, BoundaryMode};
use crate::error::{Error, Result};
use crate::num::Sample;
use crate::separable::{self, Bands2d};
use crate::wavelet::{LiftingFamily, Wavelet};

/// Filter taps applied at `i + shift + j` for output sample `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub taps: Vec<f64>,
    pub shift: isize,
}

impl Filter {
    pub fn new(taps: Vec<f64>, shift: isize) -> Self {
        Self { taps, shift }
    }

    fn apply<T: Sample>(&self, taps: &[T], source: &[T], i: usize, mode: BoundaryMode) -> T {
        let base = i as isize + self.shift;
        taps.iter().enumerate().fold(T::zero(), |acc, (j, &t)| {
            t.mul_add(extend(source, base + j as isize, mode), acc)
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiftingStep {
    /// `odd[i] += filter(even)`
    Predict(Filter),
    /// `even[i] += filter(odd)`
    Update(Filter),
    Scale { even: f64, odd: f64 },
}

/// A factorised wavelet: an ordered list of lifting steps.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftingScheme {
    steps: Vec<LiftingStep>,
}

impl LiftingScheme {
    pub fn new(steps: Vec<LiftingStep>) -> Self {
        Self { steps }
    }

    /// The factorisation of `wavelet`, if one is known.
    pub fn for_wavelet(wavelet: &Wavelet) -> Result<Self> {
        let family = wavelet
            .lifting_family()
            .ok_or_else(|| Error::NoLiftingScheme(wavelet.name().to_string()))?;
        Ok(match family {
            LiftingFamily::Haar => Self::haar(),
            LiftingFamily::Daubechies2 => Self::daubechies2(),
        })
    }

    /// Orthonormal Haar; matches the convolution output on even lengths.
    fn haar() -> Self {
        let s = core::f64::consts::SQRT_2;
        Self::new(vec![
            LiftingStep::Predict(Filter::new(vec![-1.0], 0)),
            LiftingStep::Update(Filter::new(vec![0.5], 0)),
            LiftingStep::Scale {
                even: s,
                odd: -1.0 / s,
            },
        ])
    }

    /// Daubechies-Sweldens factorisation of the four-tap Daubechies wavelet.
    fn daubechies2() -> Self {
        let r3 = 3f64.sqrt();
        let r2 = core::f64::consts::SQRT_2;
        Self::new(vec![
            LiftingStep::Update(Filter::new(vec![r3], 0)),
            LiftingStep::Predict(Filter::new(vec![-(r3 - 2.0) / 4.0, -r3 / 4.0], -1)),
            LiftingStep::Update(Filter::new(vec![-1.0], 1)),
            LiftingStep::Scale {
                even: (r3 - 1.0) / r2,
                odd: (r3 + 1.0) / r2,
            },
        ])
    }

    /// Forward transform: `(approximation, detail)`.
    pub fn forward<T: Sample>(&self, x: &[T], mode: BoundaryMode) -> Result<(Vec<T>, Vec<T>)> {
        if x.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut even: Vec<T> = x.iter().step_by(2).copied().collect();
        let mut odd: Vec<T> = x.iter().skip(1).step_by(2).copied().collect();
        for step in &self.steps {
            match step {
                LiftingStep::Predict(f) => lift(&mut odd, &even, f, mode, false),
                LiftingStep::Update(f) => lift(&mut even, &odd, f, mode, false),
                LiftingStep::Scale { even: se, odd: so } => {
                    scale(&mut even, T::from_f64(*se), false);
                    scale(&mut odd, T::from_f64(*so), false);
                }
            }
        }
        Ok((even, odd))
    }

    /// Inverse transform; `approx` may be one sample longer than `detail`.
    pub fn inverse<T: Sample>(&self, approx: &[T], detail: &[T], mode: BoundaryMode) -> Result<Vec<T>> {
        if approx.len() != detail.len() && approx.len() != detail.len() + 1 {
            return Err(Error::CoefficientMismatch {
                approx: approx.len(),
                detail: detail.len(),
            });
        }
        if approx.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut even = approx.to_vec();
        let mut odd = detail.to_vec();
        for step in self.steps.iter().rev() {
            match step {
                LiftingStep::Predict(f) => lift(&mut odd, &even, f, mode, true),
                LiftingStep::Update(f) => lift(&mut even, &odd, f, mode, true),
                LiftingStep::Scale { even: se, odd: so } => {
                    scale(&mut even, T::from_f64(*se), true);
                    scale(&mut odd, T::from_f64(*so), true);
                }
            }
        }
        let mut out = Vec::with_capacity(even.len() + odd.len());
        for (i, &e) in even.iter().enumerate() {
            out.push(e);
            if let Some(&o) = odd.get(i) {
                out.push(o);
            }
        }
        Ok(out)
    }

    pub fn forward_2d<T: Sample>(&self, x: &Matrix<T>, mode: BoundaryMode) -> Result<Bands2d<T>> {
        separable::forward_2d(x, |v: &[T]| self.forward(v, mode))
    }

    pub fn inverse_2d<T: Sample>(&self, bands: &Bands2d<T>, mode: BoundaryMode) -> Result<Matrix<T>> {
        separable::inverse_2d(bands, |a: &[T], d: &[T]| self.inverse(a, d, mode))
    }
}

// The correction for every target sample is computed from `source` before
// any target sample changes, so in-place is safe.
fn lift<T: Sample>(target: &mut [T], source: &[T], filter: &Filter, mode: BoundaryMode, undo: bool) {
    let taps: Vec<T> = filter.taps.iter().map(|&t| T::from_f64(t)).collect();
    for (i, t) in target.iter_mut().enumerate() {
        let delta = filter.apply(&taps, source, i, mode);
        *t = if undo { *t - delta } else { *t + delta };
    }
}

fn scale<T: Sample>(values: &mut [T], factor: T, undo: bool) {
    for v in values {
        *v = if undo { *v / factor } else { *v * factor };
    }
}
