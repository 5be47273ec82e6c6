//! Signal extension beyond its edges.
//!
//! Both transform engines read samples at out-of-range positions through
//! [`extend`]. For the eight-sample signal `abcdefgh` the modes give:
//!
//! | mode            | left side  | right side |
//! |-----------------|------------|------------|
//! | `zero`          | `000`      | `000`      |
//! | `constant`      | `aaa`      | `hhh`      |
//! | `symmetric`     | `cba`      | `hgf`      |
//! | `reflect`       | `dcb`      | `gfe`      |
//! | `periodic`      | `fgh`      | `abc`      |
//! | `smooth`        | linear extrapolation of the edge slope |
//! | `antisymmetric` | `-c-b-a`   | `-h-g-f`   |
//! | `periodization` | as `periodic`, but the transform keeps only `ceil(n/2)` coefficients |

use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::num::Sample;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
/// Edge handling mode, named the way PyWavelets names them.
pub enum BoundaryMode {
    Zero,
    Constant,
    /// Half-sample mirror, the edge sample is repeated.
    #[default]
    Symmetric,
    /// Whole-sample mirror, the edge sample is not repeated.
    Reflect,
    Periodic,
    /// First-order extrapolation from the two edge samples.
    Smooth,
    Antisymmetric,
    Periodization,
}

impl BoundaryMode {
    pub const ALL: [BoundaryMode; 8] = [
        BoundaryMode::Zero,
        BoundaryMode::Constant,
        BoundaryMode::Symmetric,
        BoundaryMode::Reflect,
        BoundaryMode::Periodic,
        BoundaryMode::Smooth,
        BoundaryMode::Antisymmetric,
        BoundaryMode::Periodization,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryMode::Zero => "zero",
            BoundaryMode::Constant => "constant",
            BoundaryMode::Symmetric => "symmetric",
            BoundaryMode::Reflect => "reflect",
            BoundaryMode::Periodic => "periodic",
            BoundaryMode::Smooth => "smooth",
            BoundaryMode::Antisymmetric => "antisymmetric",
            BoundaryMode::Periodization => "periodization",
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        BoundaryMode::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .or(match name.as_str() {
                "zeros" | "zpd" => Some(BoundaryMode::Zero),
                "sym" | "half-symmetric" => Some(BoundaryMode::Symmetric),
                "per" => Some(BoundaryMode::Periodization),
                "ppd" | "wrap" => Some(BoundaryMode::Periodic),
                _ => None,
            })
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

/// Read `signal[k]`, extending the signal past either edge according to `mode`.
///
/// Positions arbitrarily far outside the signal are supported for the
/// mirroring and periodic modes (the extension repeats). An empty signal
/// extends to zero.
#[inline]
pub fn extend<T: Sample>(signal: &[T], k: isize, mode: BoundaryMode) -> T {
    let n = signal.len() as isize;
    if n == 0 {
        return T::zero();
    }
    if (0..n).contains(&k) {
        return signal[k as usize];
    }
    match mode {
        BoundaryMode::Zero => T::zero(),
        BoundaryMode::Constant => {
            if k < 0 {
                signal[0]
            } else {
                signal[(n - 1) as usize]
            }
        }
        BoundaryMode::Symmetric => {
            let m = k.rem_euclid(2 * n);
            if m < n {
                signal[m as usize]
            } else {
                signal[(2 * n - 1 - m) as usize]
            }
        }
        BoundaryMode::Reflect => {
            if n == 1 {
                return signal[0];
            }
            let m = k.rem_euclid(2 * n - 2);
            if m < n {
                signal[m as usize]
            } else {
                signal[(2 * n - 2 - m) as usize]
            }
        }
        BoundaryMode::Periodic | BoundaryMode::Periodization => {
            signal[k.rem_euclid(n) as usize]
        }
        BoundaryMode::Smooth => {
            if n == 1 {
                return signal[0];
            }
            if k < 0 {
                let slope = signal[0] - signal[1];
                slope.mul_add(T::from_f64((-k) as f64), signal[0])
            } else {
                let last = signal[(n - 1) as usize];
                let slope = last - signal[(n - 2) as usize];
                slope.mul_add(T::from_f64((k - n + 1) as f64), last)
            }
        }
        BoundaryMode::Antisymmetric => {
            let m = k.rem_euclid(2 * n);
            if m < n {
                signal[m as usize]
            } else {
                -signal[(2 * n - 1 - m) as usize]
            }
        }
    }
}
