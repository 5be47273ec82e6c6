//! Orthogonal wavelet filter banks
//! Supports Haar, Daubechies (db1-db4), Symlets (sym2-sym4) and Coiflet-1

#![allow(clippy::excessive_precision)]

use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::num::Sample;

const HAAR: [f64; 2] = [0.7071067811865476, 0.7071067811865476];

const DB2: [f64; 4] = [
    -0.12940952255126037,
    0.2241438680420134,
    0.8365163037378079,
    0.48296291314453416,
];

const DB3: [f64; 6] = [
    0.03522629188570953,
    -0.08544127388202666,
    -0.13501102001025458,
    0.45987750211849154,
    0.8068915093110925,
    0.33267055295008263,
];

const DB4: [f64; 8] = [
    -0.010597401785069032,
    0.0328830116668852,
    0.030841381835560764,
    -0.18703481171909309,
    -0.027983769416859854,
    0.6308807679298589,
    0.7148465705529157,
    0.2303778133088965,
];

const SYM4: [f64; 8] = [
    -0.07576571478927333,
    -0.02963552764599851,
    0.49761866763201545,
    0.8037387518059161,
    0.29785779560527736,
    -0.09921954357684722,
    -0.012603967262037833,
    0.0322231006040427,
];

const COIF1: [f64; 6] = [
    -0.01565572813546454,
    -0.0727326195128539,
    0.38486484686420286,
    0.8525720202122554,
    0.3378976624578092,
    -0.0727326195128539,
];

/// Wavelet families with a known lifting factorisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftingFamily {
    Haar,
    Daubechies2,
}

/// An orthogonal two-channel filter bank.
///
/// Only the decomposition low-pass taps are stored. The other three filters
/// follow from the quadrature mirror relations:
/// `rec_lo[k] = dec_lo[F-1-k]`, `rec_hi[k] = (-1)^k dec_lo[k]`,
/// `dec_hi[k] = rec_hi[F-1-k]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wavelet {
    name: &'static str,
    dec_lo: &'static [f64],
    lifting: Option<LiftingFamily>,
}

impl Wavelet {
    pub const NAMES: [&'static str; 9] = [
        "haar", "db1", "db2", "db3", "db4", "sym2", "sym3", "sym4", "coif1",
    ];

    /// Look a wavelet up by its library identifier (`haar`, `db2`, ...).
    pub fn from_name(id: &str) -> Result<Self, Error> {
        let (name, dec_lo, lifting): (&'static str, &'static [f64], _) =
            match id.trim().to_ascii_lowercase().as_str() {
                "haar" => ("haar", &HAAR, Some(LiftingFamily::Haar)),
                "db1" => ("db1", &HAAR, Some(LiftingFamily::Haar)),
                "db2" => ("db2", &DB2, Some(LiftingFamily::Daubechies2)),
                "sym2" => ("sym2", &DB2, Some(LiftingFamily::Daubechies2)),
                "db3" => ("db3", &DB3, None),
                "sym3" => ("sym3", &DB3, None),
                "db4" => ("db4", &DB4, None),
                "sym4" => ("sym4", &SYM4, None),
                "coif1" => ("coif1", &COIF1, None),
                _ => return Err(Error::UnknownWavelet(id.to_string())),
            };
        Ok(Self {
            name,
            dec_lo,
            lifting,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of filter taps `F`.
    pub fn filter_len(&self) -> usize {
        self.dec_lo.len()
    }

    pub fn lifting_family(&self) -> Option<LiftingFamily> {
        self.lifting
    }

    pub fn dec_lo(&self) -> Vec<f64> {
        self.dec_lo.to_vec()
    }

    pub fn dec_hi(&self) -> Vec<f64> {
        let mut hi = self.rec_hi();
        hi.reverse();
        hi
    }

    pub fn rec_lo(&self) -> Vec<f64> {
        self.dec_lo.iter().rev().copied().collect()
    }

    pub fn rec_hi(&self) -> Vec<f64> {
        self.dec_lo
            .iter()
            .enumerate()
            .map(|(k, &c)| if k % 2 == 0 { c } else { -c })
            .collect()
    }

    /// Decomposition filters rounded into the sample type `T`.
    pub fn analysis_filters<T: Sample>(&self) -> (Vec<T>, Vec<T>) {
        (
            self.dec_lo().into_iter().map(T::from_f64).collect(),
            self.dec_hi().into_iter().map(T::from_f64).collect(),
        )
    }
}

impl fmt::Display for Wavelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Wavelet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Wavelet::from_name(s)
    }
}
