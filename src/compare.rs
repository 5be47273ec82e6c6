//! Precision Comparator
//!
//! Loads matching coefficient files from a comparison directory and a
//! reference directory and summarises how far they drift apart. Every
//! (pair, input, wavelet, suffix) unit produces an [`Outcome`]; a failing
//! unit never stops the sweep. The collected [`Report`] renders as the
//! human-readable text printed by the CLI.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::array::{artifact_path, read_array, Array, Suffix};
use crate::config::{ComparisonPair, Config, InputDescriptor, WaveletDescriptor};
use crate::error::{Error, Result};

/// Error statistics of one comparison unit.
///
/// Elements whose reference value is exactly zero have no relative error;
/// they contribute to `max_abs_zero_ref` only. Every metric is `0` when
/// its subset is empty. NaN in the data propagates into the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ErrorStats {
    pub max_abs_zero_ref: f64,
    pub max_rel: f64,
    pub mean_rel: f64,
    pub zero_ref_count: usize,
    pub nonzero_ref_count: usize,
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Elementwise `|cmp - ref|`.
pub fn abs_diff(cmp: &[f64], reference: &[f64]) -> Vec<f64> {
    cmp.iter().zip(reference).map(|(c, r)| (c - r).abs()).collect()
}

impl ErrorStats {
    /// Statistics of `cmp` against `reference`; the slices must be equally long.
    pub fn between(cmp: &[f64], reference: &[f64]) -> Self {
        let mut stats = ErrorStats::default();
        let mut rel_sum = 0.0;
        for (diff, &r) in abs_diff(cmp, reference).into_iter().zip(reference) {
            if r == 0.0 {
                stats.zero_ref_count += 1;
                stats.max_abs_zero_ref = nan_max(stats.max_abs_zero_ref, diff);
            } else {
                let rel = diff / r.abs();
                stats.nonzero_ref_count += 1;
                stats.max_rel = nan_max(stats.max_rel, rel);
                rel_sum += rel;
            }
        }
        if stats.nonzero_ref_count > 0 {
            stats.mean_rel = rel_sum / stats.nonzero_ref_count as f64;
        }
        stats
    }
}

/// Compare two arrays of the same shape.
pub fn compare_arrays(cmp: &Array, reference: &Array) -> Result<ErrorStats> {
    if cmp.shape() != reference.shape() {
        return Err(Error::ShapesDiffer {
            left: cmp.shape().to_vec(),
            right: reference.shape().to_vec(),
        });
    }
    Ok(ErrorStats::between(cmp.as_slice(), reference.as_slice()))
}

/// Suffixes compared for a 1-D input of length `n`, with the shape each
/// file must have: `ceil(n/2)`, `floor(n/2)` and `n`.
pub fn expected_subshapes(n: usize) -> [(Suffix, Vec<usize>); 3] {
    [
        (Suffix::LFwd, vec![n.div_ceil(2)]),
        (Suffix::HFwd, vec![n / 2]),
        (Suffix::Inv, vec![n]),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Compared(ErrorStats),
    /// The named file does not exist; the unit is skipped.
    Missing(PathBuf),
    ShapeMismatch {
        cmp: Vec<usize>,
        reference: Vec<usize>,
    },
    /// Any other error, already rendered.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitReport {
    pub suffix: Suffix,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveletSection {
    pub wavelet: String,
    pub units: Vec<UnitReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputBody {
    /// 2-D inputs are not compared.
    TwoDimensional,
    Unsupported,
    Compared(Vec<WaveletSection>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputSection {
    pub name: String,
    pub shape: Vec<usize>,
    pub magnitude: f64,
    pub body: InputBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairSection {
    pub pair: ComparisonPair,
    pub inputs: Vec<InputSection>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub pairs: Vec<PairSection>,
}

impl Report {
    /// Every unit outcome, in sweep order.
    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.pairs
            .iter()
            .flat_map(|p| &p.inputs)
            .filter_map(|i| match &i.body {
                InputBody::Compared(sections) => Some(sections),
                _ => None,
            })
            .flatten()
            .flat_map(|w| &w.units)
            .map(|u| &u.outcome)
    }

    pub fn compared(&self) -> usize {
        self.outcomes()
            .filter(|o| matches!(o, Outcome::Compared(_)))
            .count()
    }

    pub fn missing(&self) -> usize {
        self.outcomes()
            .filter(|o| matches!(o, Outcome::Missing(_)))
            .count()
    }

    /// Units that neither compared nor were simply missing.
    pub fn failures(&self) -> usize {
        self.outcomes()
            .filter(|o| matches!(o, Outcome::ShapeMismatch { .. } | Outcome::Failed(_)))
            .count()
    }
}

/// Compare every configured input and wavelet for each pair.
pub fn run(config: &Config, pairs: &[ComparisonPair]) -> Report {
    let report = Report {
        pairs: pairs.iter().map(|p| compare_pair(config, p)).collect(),
    };
    log::info!(
        "{} units compared, {} missing, {} failed",
        report.compared(),
        report.missing(),
        report.failures()
    );
    report
}

pub fn compare_pair(config: &Config, pair: &ComparisonPair) -> PairSection {
    log::debug!(
        "comparing {} against {}",
        pair.cmp.display(),
        pair.reference.display()
    );
    PairSection {
        pair: pair.clone(),
        inputs: config
            .inputs
            .iter()
            .map(|input| compare_input(pair, input, &config.wavelets))
            .collect(),
    }
}

fn compare_input(pair: &ComparisonPair, input: &InputDescriptor, wavelets: &[WaveletDescriptor]) -> InputSection {
    let body = match input.shape.as_slice() {
        &[n] => InputBody::Compared(
            wavelets
                .iter()
                .map(|w| WaveletSection {
                    wavelet: w.name.clone(),
                    units: expected_subshapes(n)
                        .into_iter()
                        .map(|(suffix, subshape)| UnitReport {
                            suffix,
                            outcome: compare_unit(pair, &input.name, &w.name, suffix, &subshape),
                        })
                        .collect(),
                })
                .collect(),
        ),
        [_, _] => InputBody::TwoDimensional,
        _ => InputBody::Unsupported,
    };
    InputSection {
        name: input.name.clone(),
        shape: input.shape.clone(),
        magnitude: input.magnitude,
        body,
    }
}

fn load(root: &Path, input: &str, wavelet: &str, suffix: Suffix, subshape: &[usize]) -> std::result::Result<Array, Outcome> {
    let path = artifact_path(root, input, wavelet, suffix);
    read_array(&path, subshape).map_err(|e| {
        if e.is_not_found() {
            Outcome::Missing(path)
        } else {
            Outcome::Failed(e.to_string())
        }
    })
}

/// Compare one persisted array of one input and wavelet.
pub fn compare_unit(pair: &ComparisonPair, input: &str, wavelet: &str, suffix: Suffix, subshape: &[usize]) -> Outcome {
    let loaded = load(&pair.cmp, input, wavelet, suffix, subshape)
        .and_then(|c| load(&pair.reference, input, wavelet, suffix, subshape).map(|r| (c, r)));
    let outcome = match loaded {
        Ok((c, r)) => match compare_arrays(&c, &r) {
            Ok(stats) => Outcome::Compared(stats),
            Err(Error::ShapesDiffer { left, right }) => Outcome::ShapeMismatch {
                cmp: left,
                reference: right,
            },
            Err(e) => Outcome::Failed(e.to_string()),
        },
        Err(outcome) => outcome,
    };
    match &outcome {
        Outcome::Missing(path) => log::warn!("missing {}", path.display()),
        Outcome::Failed(e) => log::error!(
            "comparing {} and {} for {input} with wavelet {wavelet} and suffix {suffix}: {e}",
            pair.cmp.display(),
            pair.reference.display()
        ),
        _ => {}
    }
    outcome
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.pairs {
            let cmp = section.pair.cmp.display();
            let reference = section.pair.reference.display();
            writeln!(f, "Comparing {cmp} against {reference}...")?;
            for input in &section.inputs {
                writeln!(
                    f,
                    "Input: {} with shape {:?} and magnitude {}",
                    input.name, input.shape, input.magnitude
                )?;
                let wavelets = match &input.body {
                    InputBody::TwoDimensional => {
                        writeln!(
                            f,
                            "2D input {} with shape {:?} is not supported in this benchmark, skipping.",
                            input.name, input.shape
                        )?;
                        continue;
                    }
                    InputBody::Unsupported => {
                        writeln!(
                            f,
                            "Unsupported shape {:?} for input {}, skipping.",
                            input.shape, input.name
                        )?;
                        continue;
                    }
                    InputBody::Compared(wavelets) => wavelets,
                };
                for w in wavelets {
                    writeln!(f, "Comparing {} for input {}...", w.wavelet, input.name)?;
                    for unit in &w.units {
                        let s = unit.suffix;
                        match &unit.outcome {
                            Outcome::Compared(stats) => {
                                writeln!(
                                    f,
                                    "  {s}: max absolute error (zero elements only) = {:?}",
                                    stats.max_abs_zero_ref
                                )?;
                                writeln!(f, "  {s}: max relative error = {:?}", stats.max_rel)?;
                                writeln!(f, "  {s}: mean relative error = {:?}", stats.mean_rel)?;
                            }
                            Outcome::Missing(path) => {
                                writeln!(f, "File not found: {}, skipping.", path.display())?
                            }
                            Outcome::ShapeMismatch { cmp, reference } => {
                                writeln!(f, "Shape mismatch for {s}: {cmp:?} vs {reference:?}")?
                            }
                            Outcome::Failed(e) => writeln!(
                                f,
                                "Error comparing {cmp} and {reference} for {} with wavelet {} and suffix {s}: {e}",
                                input.name, w.wavelet
                            )?,
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::write_f64_le;

    #[test]
    fn zero_references_feed_absolute_error_only() {
        let stats = ErrorStats::between(&[0.5, 2.2, -1.0], &[0.0, 2.0, -1.0]);
        assert_eq!(stats.zero_ref_count, 1);
        assert_eq!(stats.nonzero_ref_count, 2);
        assert_eq!(stats.max_abs_zero_ref, 0.5);
        assert!((stats.max_rel - 0.1).abs() < 1e-12);
        assert!((stats.mean_rel - 0.05).abs() < 1e-12);
    }

    #[test]
    fn empty_subsets_report_zero() {
        let all_zero = ErrorStats::between(&[1.0, 0.0], &[0.0, 0.0]);
        assert_eq!((all_zero.max_rel, all_zero.mean_rel), (0.0, 0.0));
        let none_zero = ErrorStats::between(&[1.0, 2.0], &[1.0, 2.0]);
        assert_eq!(none_zero.max_abs_zero_ref, 0.0);
        let empty = ErrorStats::between(&[], &[]);
        assert!(!empty.max_rel.is_nan() && !empty.mean_rel.is_nan());
    }

    #[test]
    fn nan_propagates() {
        let stats = ErrorStats::between(&[f64::NAN, 1.0], &[1.0, 1.0]);
        assert!(stats.max_rel.is_nan());
        assert!(stats.mean_rel.is_nan());
    }

    #[test]
    fn swapping_sides_keeps_raw_differences() {
        let a = [1.0, 2.0, 4.0];
        let b = [1.5, 2.0, 3.0];
        assert_eq!(abs_diff(&a, &b), abs_diff(&b, &a));
        let ab = ErrorStats::between(&a, &b);
        let ba = ErrorStats::between(&b, &a);
        assert_ne!(ab.max_rel, ba.max_rel);
    }

    #[test]
    fn subshapes_for_odd_length() {
        let [l, h, inv] = expected_subshapes(7);
        assert_eq!(l, (Suffix::LFwd, vec![4]));
        assert_eq!(h, (Suffix::HFwd, vec![3]));
        assert_eq!(inv, (Suffix::Inv, vec![7]));
    }

    #[test]
    fn unit_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let pair = ComparisonPair::new(dir.path().join("cmp"), dir.path().join("ref"));
        let write = |root: &Path, values: &[f64]| {
            write_f64_le(&artifact_path(root, "s", "haar", Suffix::LFwd), values).unwrap()
        };

        let missing = compare_unit(&pair, "s", "haar", Suffix::LFwd, &[2]);
        assert_eq!(
            missing,
            Outcome::Missing(artifact_path(&pair.cmp, "s", "haar", Suffix::LFwd))
        );

        write(&pair.cmp, &[1.0, 2.0]);
        write(&pair.reference, &[1.0, 4.0]);
        match compare_unit(&pair, "s", "haar", Suffix::LFwd, &[2]) {
            Outcome::Compared(stats) => assert_eq!(stats.max_rel, 0.5),
            other => panic!("unexpected {other:?}"),
        }

        write(&pair.reference, &[1.0, 4.0, 5.0]);
        assert!(matches!(
            compare_unit(&pair, "s", "haar", Suffix::LFwd, &[2]),
            Outcome::Failed(_)
        ));
    }

    #[test]
    fn arrays_of_different_shape_do_not_compare() {
        let a = Array::from_vec(vec![1.0, 2.0]);
        let b = Array::from_vec(vec![1.0]);
        assert!(matches!(
            compare_arrays(&a, &b),
            Err(Error::ShapesDiffer { .. })
        ));
    }

    #[test]
    fn report_renders_and_counts() {
        let config = Config::from_toml_str(
            r#"
            [[wavelets]]
            name = "haar"
            id = "haar"
            mode = "symmetric"

            [[inputs]]
            name = "sig"
            shape = [4]
            magnitude = 1.0

            [[inputs]]
            name = "img"
            shape = [2, 2]
            magnitude = 1.0

            [[inputs]]
            name = "cube"
            shape = [2, 2, 2]
            magnitude = 1.0
            "#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let pair = ComparisonPair::new(dir.path().join("cmp"), dir.path().join("ref"));
        for root in [&pair.cmp, &pair.reference] {
            write_f64_le(&artifact_path(root, "sig", "haar", Suffix::LFwd), &[1.0, 0.0]).unwrap();
            write_f64_le(&artifact_path(root, "sig", "haar", Suffix::Inv), &[1.0; 4]).unwrap();
        }
        let report = run(&config, &[pair.clone()]);
        assert_eq!(report.compared(), 2);
        assert_eq!(report.missing(), 1);
        assert_eq!(report.failures(), 0);

        let text = report.to_string();
        assert!(text.contains("Input: sig with shape [4] and magnitude 1"));
        assert!(text.contains("Comparing haar for input sig..."));
        assert!(text.contains("  l_fwd: max relative error = 0.0"));
        let missing = artifact_path(&pair.cmp, "sig", "haar", Suffix::HFwd);
        assert!(text.contains(&format!("File not found: {}, skipping.", missing.display())));
        assert!(text.contains("2D input img with shape [2, 2] is not supported"));
        assert!(text.contains("Unsupported shape [2, 2, 2] for input cube, skipping."));
        assert_eq!(report.pairs[0].inputs[2].body, InputBody::Unsupported);
        assert!(!text.contains("for input cube..."));
    }
}
