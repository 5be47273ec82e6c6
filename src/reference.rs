//! Packed single-level reference coefficients.
//!
//! A standalone utility for checking another implementation's output layout:
//! a seeded standard-normal input of shape `[batch, channels, height, width]`
//! is rounded to f32 and transformed in f32 with `periodization`, and the
//! sub-bands are packed into one array.
//!
//! - `1d`: every row of width `w` becomes `[cA | cD]`, giving
//!   `[batch, channels, height, 2 * ceil(w / 2)]`.
//! - `2d`: every `(batch, channel)` plane becomes
//!   `[[cA, cH], [cV, cD]]`, the input's own shape. `cH` is the band that
//!   is detail along the columns (`lh`), `cV` detail along the rows (`hl`).

use core::fmt;
use core::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::array::{Array, Matrix};
use crate::backend::{backend, Algorithm};
use crate::boundary::BoundaryMode;
use crate::error::{Error, Result};
use crate::num::Precision;
use crate::wavelet::Wavelet;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    OneD,
    TwoD,
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dim::OneD => "1d",
            Dim::TwoD => "2d",
        })
    }
}

impl FromStr for Dim {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Dim::OneD),
            "2d" => Ok(Dim::TwoD),
            other => Err(Error::InvalidConfig(format!("unknown dimension `{other}`"))),
        }
    }
}

/// The generated input and its packed coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCase {
    pub input: Array,
    pub output: Array,
}

/// Seeded standard-normal samples rounded to f32.
pub fn normal_input(shape: &[usize], seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = shape.iter().product();
    (0..len)
        .map(|_| {
            let v: f32 = StandardNormal.sample(&mut rng);
            f64::from(v)
        })
        .collect()
}

pub fn generate_reference(wavelet: &Wavelet, shape: &[usize], dim: Dim, seed: u64) -> Result<ReferenceCase> {
    let &[batch, channels, height, width] = shape else {
        return Err(Error::ReferenceShape(shape.to_vec()));
    };
    if shape.contains(&0) {
        return Err(Error::EmptyInput);
    }
    let data = normal_input(shape, seed);
    let planes = batch * channels;
    let output = match dim {
        Dim::OneD => pack_rows(&data, wavelet, planes * height, width)
            .and_then(|(packed, w)| Array::from_shape_vec(vec![batch, channels, height, w], packed))?,
        Dim::TwoD => {
            if height % 2 == 1 || width % 2 == 1 {
                return Err(Error::OddPlane { height, width });
            }
            let mut packed = Vec::with_capacity(data.len());
            for plane in data.chunks(height * width) {
                packed.extend(pack_plane(plane, wavelet, height, width)?);
            }
            Array::from_shape_vec(shape.to_vec(), packed)?
        }
    };
    log::debug!(
        "reference {dim} {} {:?} seed {seed} -> {:?}",
        wavelet.name(),
        shape,
        output.shape()
    );
    Ok(ReferenceCase {
        input: Array::from_shape_vec(shape.to_vec(), data)?,
        output,
    })
}

fn pack_rows(data: &[f64], wavelet: &Wavelet, rows: usize, width: usize) -> Result<(Vec<f64>, usize)> {
    let b = backend(Algorithm::Convolution, Precision::F32);
    let mut packed = Vec::with_capacity(rows * (width + 1));
    let mut packed_width = 0;
    for row in data.chunks(width).take(rows) {
        let c = b.forward_1d(row, wavelet, BoundaryMode::Periodization)?;
        packed_width = c.approx.len() + c.detail.len();
        packed.extend(c.approx);
        packed.extend(c.detail);
    }
    Ok((packed, packed_width))
}

fn pack_plane(plane: &[f64], wavelet: &Wavelet, height: usize, width: usize) -> Result<Vec<f64>> {
    let b = backend(Algorithm::Convolution, Precision::F32);
    let m = Matrix::new(height, width, plane.to_vec())?;
    let bands = b.forward_2d(&m, wavelet, BoundaryMode::Periodization)?;
    let mut packed = Vec::with_capacity(height * width);
    for (left, right) in [(&bands.ll, &bands.lh), (&bands.hl, &bands.hh)] {
        for r in 0..left.rows() {
            packed.extend_from_slice(left.row(r));
            packed.extend_from_slice(right.row(r));
        }
    }
    Ok(packed)
}
