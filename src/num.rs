//! Sample types the transform engines are generic over.
//!
//! Every artifact on disk is f64; a [`Sample`] is the arithmetic type a
//! transform actually runs in. Values are rounded into the sample type on
//! entry and widened back to f64 (exactly) on exit.

use core::fmt;
use core::str::FromStr;

use half::bf16;

use crate::error::Error;

// Minimal float trait for the generic transforms
pub trait Sample:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + 'static
{
    /// Short name used in logs and directory names.
    const NAME: &'static str;

    fn zero() -> Self;
    /// Round an f64 into this type (round-to-nearest-even).
    fn from_f64(x: f64) -> Self;
    /// Widen to f64. Exact for every implementor.
    fn to_f64(self) -> f64;
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }
}

impl Sample for f64 {
    const NAME: &'static str = "f64";

    fn zero() -> Self {
        0.0
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn to_f64(self) -> f64 {
        self
    }
}

impl Sample for f32 {
    const NAME: &'static str = "f32";

    fn zero() -> Self {
        0.0
    }
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// bfloat16 arithmetic goes through f32 and rounds back after every
/// operation, which is the behaviour of bf16 hardware without fused
/// accumulation.
impl Sample for bf16 {
    const NAME: &'static str = "bf16";

    fn zero() -> Self {
        bf16::ZERO
    }
    fn from_f64(x: f64) -> Self {
        bf16::from_f64(x)
    }
    fn to_f64(self) -> f64 {
        bf16::to_f64(self)
    }
}

/// Convert a slice of f64 into the sample type.
pub fn narrow<T: Sample>(values: &[f64]) -> Vec<T> {
    values.iter().map(|&v| T::from_f64(v)).collect()
}

/// Widen a slice of samples back to f64.
pub fn widen<T: Sample>(values: &[T]) -> Vec<f64> {
    values.iter().map(|&v| v.to_f64()).collect()
}

/// Floating-point representation a precision configuration runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Precision {
    #[default]
    F64,
    F32,
    Bf16,
}

impl Precision {
    pub const ALL: [Precision; 3] = [Precision::F64, Precision::F32, Precision::Bf16];

    pub fn as_str(self) -> &'static str {
        match self {
            Precision::F64 => <f64 as Sample>::NAME,
            Precision::F32 => <f32 as Sample>::NAME,
            Precision::Bf16 => <bf16 as Sample>::NAME,
        }
    }

    /// Bits of mantissa precision, including the implicit bit.
    pub fn mantissa_bits(self) -> u32 {
        match self {
            Precision::F64 => 53,
            Precision::F32 => 24,
            Precision::Bf16 => 8,
        }
    }

    /// Machine epsilon of the representation.
    pub fn epsilon(self) -> f64 {
        2f64.powi(1 - self.mantissa_bits() as i32)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f64" | "float64" | "double" => Ok(Precision::F64),
            "f32" | "float32" | "float" => Ok(Precision::F32),
            "bf16" | "bfloat16" => Ok(Precision::Bf16),
            other => Err(Error::UnknownPrecision(other.to_string())),
        }
    }
}
