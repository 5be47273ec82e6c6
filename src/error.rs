use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the harness library.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem access failed; `path` is the file or directory involved.
    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown wavelet `{0}`")]
    UnknownWavelet(String),

    #[error("unknown boundary mode `{0}`")]
    UnknownMode(String),

    #[error("unknown precision `{0}`")]
    UnknownPrecision(String),

    #[error("no lifting scheme is available for wavelet `{0}`")]
    NoLiftingScheme(String),

    #[error("input signal is empty")]
    EmptyInput,

    /// Element count does not fit the requested shape.
    #[error("cannot reshape {actual} values into shape {expected:?}")]
    ShapeMismatch { expected: Vec<usize>, actual: usize },

    /// Two arrays that must agree in shape do not.
    #[error("shape {left:?} does not match {right:?}")]
    ShapesDiffer { left: Vec<usize>, right: Vec<usize> },

    #[error("approximation length {approx} does not match detail length {detail}")]
    CoefficientMismatch { approx: usize, detail: usize },

    #[error("{coeffs} coefficients are too few to reconstruct with a {filter}-tap filter")]
    TooFewCoefficients { coeffs: usize, filter: usize },

    #[error("unsupported dimensionality {0} (expected 1 or 2)")]
    UnsupportedDimension(usize),

    #[error("reference shape must be [batch, channels, height, width], got {0:?}")]
    ReferenceShape(Vec<usize>),

    #[error("2-D reference needs an even plane, got {height}x{width}")]
    OddPlane { height: usize, width: usize },

    /// Artifact byte length is not a whole number of f64 values.
    #[error("{} holds {len} bytes, not a multiple of 8", path.display())]
    MalformedArtifact { path: PathBuf, len: usize },
}

impl Error {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// True when the error is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
