//! Separable 2-D transforms built from a 1-D kernel
//!
//! Axis 0 (down each column) first, then axis 1 (along each row), the same
//! order PyWavelets uses. The inverse runs rows first, then columns.

use crate::array::Matrix;
use crate::error::{Error, Result};

/// The four quadrant bands of a single-level 2-D transform.
///
/// The first letter is the filter applied along axis 0, the second along
/// axis 1: `lh` is detail along columns and approximation along rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands2d<T = f64> {
    pub ll: Matrix<T>,
    pub lh: Matrix<T>,
    pub hl: Matrix<T>,
    pub hh: Matrix<T>,
}

impl<T: Copy> Bands2d<T> {
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U + Copy) -> Bands2d<U> {
        Bands2d {
            ll: self.ll.map(f),
            lh: self.lh.map(f),
            hl: self.hl.map(f),
            hh: self.hh.map(f),
        }
    }
}

/// Forward 2-D transform from a 1-D `(approx, detail)` kernel.
pub fn forward_2d<T, F>(x: &Matrix<T>, forward: F) -> Result<Bands2d<T>>
where
    T: Copy,
    F: Fn(&[T]) -> Result<(Vec<T>, Vec<T>)>,
{
    if x.rows() == 0 || x.cols() == 0 {
        return Err(Error::EmptyInput);
    }
    let mut approx_cols = Vec::with_capacity(x.cols());
    let mut detail_cols = Vec::with_capacity(x.cols());
    for c in 0..x.cols() {
        let (a, d) = forward(&x.column(c))?;
        approx_cols.push(a);
        detail_cols.push(d);
    }
    let a = Matrix::from_columns(approx_cols)?;
    let d = Matrix::from_columns(detail_cols)?;

    let (aa, ad) = forward_rows(&a, &forward)?;
    let (da, dd) = forward_rows(&d, &forward)?;
    Ok(Bands2d {
        ll: aa,
        lh: da,
        hl: ad,
        hh: dd,
    })
}

fn forward_rows<T, F>(m: &Matrix<T>, forward: &F) -> Result<(Matrix<T>, Matrix<T>)>
where
    T: Copy,
    F: Fn(&[T]) -> Result<(Vec<T>, Vec<T>)>,
{
    let mut approx = Vec::with_capacity(m.rows());
    let mut detail = Vec::with_capacity(m.rows());
    for r in 0..m.rows() {
        let (a, d) = forward(m.row(r))?;
        approx.push(a);
        detail.push(d);
    }
    Ok((Matrix::from_rows(approx)?, Matrix::from_rows(detail)?))
}

/// Inverse 2-D transform from a 1-D `(approx, detail) -> signal` kernel.
pub fn inverse_2d<T, G>(bands: &Bands2d<T>, inverse: G) -> Result<Matrix<T>>
where
    T: Copy,
    G: Fn(&[T], &[T]) -> Result<Vec<T>>,
{
    let a = inverse_rows(&bands.ll, &bands.hl, &inverse)?;
    let d = inverse_rows(&bands.lh, &bands.hh, &inverse)?;
    // A band with no rows (single-row input split even/odd) has no columns to match.
    if d.rows() > 0 && a.cols() != d.cols() {
        return Err(Error::ShapesDiffer {
            left: a.shape().to_vec(),
            right: d.shape().to_vec(),
        });
    }
    let mut columns = Vec::with_capacity(a.cols());
    for c in 0..a.cols() {
        let detail = if d.rows() > 0 { d.column(c) } else { Vec::new() };
        columns.push(inverse(&a.column(c), &detail)?);
    }
    Matrix::from_columns(columns)
}

fn inverse_rows<T, G>(approx: &Matrix<T>, detail: &Matrix<T>, inverse: &G) -> Result<Matrix<T>>
where
    T: Copy,
    G: Fn(&[T], &[T]) -> Result<Vec<T>>,
{
    if approx.rows() != detail.rows() {
        return Err(Error::ShapesDiffer {
            left: approx.shape().to_vec(),
            right: detail.shape().to_vec(),
        });
    }
    let rows = (0..approx.rows())
        .map(|r| inverse(approx.row(r), detail.row(r)))
        .collect::<Result<Vec<_>>>()?;
    Matrix::from_rows(rows)
}
