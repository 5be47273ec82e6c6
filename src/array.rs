//! Dense row-major arrays and the raw artifact format.
//!
//! Artifacts are headerless blobs of little-endian f64 values in row-major
//! order. The shape is not stored; readers supply it from the originating
//! input descriptor.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};

/// An n-dimensional f64 array with an explicit shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl Array {
    /// Wrap `data` with `shape`; the element count must match.
    pub fn from_shape_vec(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        if shape.iter().product::<usize>() != data.len() {
            return Err(Error::ShapeMismatch {
                expected: shape,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// View a two-dimensional array as a [`Matrix`].
    pub fn into_matrix(self) -> Result<Matrix> {
        if let &[rows, cols] = self.shape.as_slice() {
            return Ok(Matrix {
                rows,
                cols,
                data: self.data,
            });
        }
        Err(Error::UnsupportedDimension(self.shape.len()))
    }
}

impl From<Matrix> for Array {
    fn from(m: Matrix) -> Self {
        Self {
            shape: vec![m.rows, m.cols],
            data: m.data,
        }
    }
}

/// A row-major two-dimensional array.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if rows * cols != data.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![rows, cols],
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Assemble a matrix from equally long rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for row in rows {
            if row.len() != cols {
                return Err(Error::ShapesDiffer {
                    left: vec![cols],
                    right: vec![row.len()],
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols,
            data,
        })
    }

    /// Assemble a matrix from equally long columns.
    pub fn from_columns(columns: Vec<Vec<T>>) -> Result<Self> {
        let n_cols = columns.len();
        let rows = columns.first().map_or(0, Vec::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(Error::ShapesDiffer {
                left: vec![rows],
                right: vec![bad.len()],
            });
        }
        let mut data = Vec::with_capacity(rows * n_cols);
        for r in 0..rows {
            data.extend(columns.iter().map(|c| c[r]));
        }
        Ok(Self {
            rows,
            cols: n_cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn column(&self, c: usize) -> Vec<T> {
        (0..self.rows).map(|r| self.data[r * self.cols + c]).collect()
    }

    pub fn get(&self, r: usize, c: usize) -> T {
        self.data[r * self.cols + c]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply `f` elementwise, e.g. to change the sample type.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// Name of one persisted output array of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suffix {
    LFwd,
    HFwd,
    LlFwd,
    LhFwd,
    HlFwd,
    HhFwd,
    Inv,
}

impl Suffix {
    pub const ONE_D: [Suffix; 3] = [Suffix::LFwd, Suffix::HFwd, Suffix::Inv];
    pub const TWO_D: [Suffix; 5] = [
        Suffix::LlFwd,
        Suffix::LhFwd,
        Suffix::HlFwd,
        Suffix::HhFwd,
        Suffix::Inv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Suffix::LFwd => "l_fwd",
            Suffix::HFwd => "h_fwd",
            Suffix::LlFwd => "ll_fwd",
            Suffix::LhFwd => "lh_fwd",
            Suffix::HlFwd => "hl_fwd",
            Suffix::HhFwd => "hh_fwd",
            Suffix::Inv => "inv",
        }
    }
}

impl core::fmt::Display for Suffix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `root/input/wavelet_suffix`, the one location of a persisted array.
pub fn artifact_path(root: &Path, input: &str, wavelet: &str, suffix: Suffix) -> PathBuf {
    root.join(input).join(format!("{wavelet}_{suffix}"))
}

/// Write values as little-endian f64, creating parent directories.
pub fn write_f64_le(path: &Path, values: &[f64]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
    }
    let file = File::create(path).map_err(|e| Error::io("create", path, e))?;
    let mut writer = BufWriter::new(file);
    for &v in values {
        writer
            .write_f64::<LittleEndian>(v)
            .map_err(|e| Error::io("write", path, e))?;
    }
    writer.flush().map_err(|e| Error::io("write", path, e))
}

/// Read a whole artifact as little-endian f64 values.
pub fn read_f64_le(path: &Path) -> Result<Vec<f64>> {
    let bytes = fs::read(path).map_err(|e| Error::io("read", path, e))?;
    if bytes.len() % 8 != 0 {
        return Err(Error::MalformedArtifact {
            path: path.to_path_buf(),
            len: bytes.len(),
        });
    }
    let mut values = vec![0.0; bytes.len() / 8];
    LittleEndian::read_f64_into(&bytes, &mut values);
    Ok(values)
}

/// Read an artifact and reshape it; the element count must match `shape`.
pub fn read_array(path: &Path, shape: &[usize]) -> Result<Array> {
    Array::from_shape_vec(shape.to_vec(), read_f64_le(path)?)
}

/// Persist an array (shape is implied by the caller's descriptor).
pub fn write_array(path: &Path, array: &Array) -> Result<()> {
    write_f64_le(path, array.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_bytes_are_little_endian() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("x");
        write_f64_le(&path, &[1.0, -2.5]).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &1.0f64.to_le_bytes());
        assert_eq!(read_f64_le(&path).unwrap(), vec![1.0, -2.5]);
    }

    #[test]
    fn truncated_artifact_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short");
        fs::write(&path, [0u8; 12]).unwrap();
        assert!(matches!(
            read_f64_le(&path),
            Err(Error::MalformedArtifact { len: 12, .. })
        ));
    }

    #[test]
    fn reshape_checks_element_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a");
        write_f64_le(&path, &[0.0; 6]).unwrap();
        assert_eq!(read_array(&path, &[2, 3]).unwrap().shape(), &[2, 3]);
        assert!(matches!(
            read_array(&path, &[4]),
            Err(Error::ShapeMismatch { actual: 6, .. })
        ));
        assert!(read_array(&dir.path().join("missing"), &[1])
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn matrix_rows_and_columns() {
        let m = Matrix::from_columns(vec![vec![1, 3], vec![2, 4]]).unwrap();
        assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(m.row(1), &[3, 4]);
        assert_eq!(m.column(0), vec![1, 3]);
        assert!(Matrix::from_rows(vec![vec![1, 2], vec![3]]).is_err());
    }

    #[test]
    fn artifact_layout() {
        let p = artifact_path(Path::new("out"), "signal_a", "haar", Suffix::HFwd);
        assert_eq!(p, Path::new("out").join("signal_a").join("haar_h_fwd"));
    }
}
