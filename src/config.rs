//! Experiment configuration (`config.toml`)
//!
//! ```toml
//! [[wavelets]]
//! name = "haar"
//! id = "haar"
//! mode = "symmetric"
//!
//! [[inputs]]
//! name = "signal_a"
//! shape = [1024]
//! magnitude = 1.0
//!
//! # optional
//! [[comparisons]]
//! cmp = "data/output-f32"
//! ref = "data/output-reference"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::boundary::BoundaryMode;
use crate::error::{Error, Result};
use crate::wavelet::Wavelet;

/// A wavelet as the experiment names it: `name` prefixes artifact files,
/// `id` selects the filter bank, `mode` the boundary extension.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaveletDescriptor {
    pub name: String,
    pub id: String,
    pub mode: String,
}

impl WaveletDescriptor {
    pub fn wavelet(&self) -> Result<Wavelet> {
        Wavelet::from_name(&self.id)
    }

    pub fn boundary_mode(&self) -> Result<BoundaryMode> {
        self.mode.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputDescriptor {
    pub name: String,
    pub shape: Vec<usize>,
    pub magnitude: f64,
}

impl InputDescriptor {
    /// Number of samples in the signal.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A comparison directory checked against a reference directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComparisonPair {
    pub cmp: PathBuf,
    #[serde(rename = "ref")]
    pub reference: PathBuf,
}

impl ComparisonPair {
    pub fn new(cmp: impl Into<PathBuf>, reference: impl Into<PathBuf>) -> Self {
        Self {
            cmp: cmp.into(),
            reference: reference.into(),
        }
    }

    /// `(f32, reference)` and `(bf16, f32)` under `data/`.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("data/output-f32", "data/output-reference"),
            Self::new("data/output-bf16", "data/output-f32"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub wavelets: Vec<WaveletDescriptor>,
    pub inputs: Vec<InputDescriptor>,
    #[serde(default)]
    pub comparisons: Vec<ComparisonPair>,
}

impl Config {
    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
        let config: Config = toml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!(
            "loaded {} ({} wavelets, {} inputs)",
            path.display(),
            config.wavelets.len(),
            config.inputs.len()
        );
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|source| Error::Config {
            path: PathBuf::from("<string>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject names that cannot be used as file names and non-finite
    /// magnitudes.
    ///
    /// Wavelet ids and modes are resolved by the stage that transforms;
    /// generating and comparing only need the names.
    pub fn validate(&self) -> Result<()> {
        for w in &self.wavelets {
            check_name("wavelet", &w.name)?;
        }
        for input in &self.inputs {
            check_name("input", &input.name)?;
            if !input.magnitude.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "input `{}` has non-finite magnitude",
                    input.name
                )));
            }
        }
        Ok(())
    }

    /// Comparison pairs from the file, or the defaults when it names none.
    pub fn comparison_pairs(&self) -> Vec<ComparisonPair> {
        if self.comparisons.is_empty() {
            ComparisonPair::defaults()
        } else {
            self.comparisons.clone()
        }
    }
}

fn check_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::InvalidConfig(format!("{kind} name `{name}` is not a file name")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[wavelets]]
        name = "haar"
        id = "haar"
        mode = "symmetric"

        [[wavelets]]
        name = "d4p"
        id = "db2"
        mode = "periodization"

        [[inputs]]
        name = "signal_a"
        shape = [8]
        magnitude = 1.0

        [[inputs]]
        name = "image"
        shape = [4, 6]
        magnitude = 255.0
    "#;

    #[test]
    fn parses_descriptors() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.wavelets.len(), 2);
        assert_eq!(config.wavelets[1].wavelet().unwrap().name(), "db2");
        assert_eq!(
            config.wavelets[1].boundary_mode().unwrap(),
            BoundaryMode::Periodization
        );
        assert_eq!(config.inputs[1].shape, vec![4, 6]);
        assert_eq!(config.inputs[1].len(), 24);
        assert_eq!(config.comparison_pairs(), ComparisonPair::defaults());
    }

    #[test]
    fn comparisons_use_ref_key() {
        let text = format!("{SAMPLE}\n[[comparisons]]\ncmp = \"a\"\nref = \"b\"\n");
        let config = Config::from_toml_str(&text).unwrap();
        assert_eq!(config.comparison_pairs(), vec![ComparisonPair::new("a", "b")]);
    }

    #[test]
    fn rejects_bad_entries() {
        let infinite = SAMPLE.replace("magnitude = 255.0", "magnitude = inf");
        assert!(matches!(
            Config::from_toml_str(&infinite),
            Err(Error::InvalidConfig(_))
        ));
        let traversal = SAMPLE.replace("\"signal_a\"", "\"../x\"");
        assert!(Config::from_toml_str(&traversal).is_err());
        let missing = SAMPLE.replace("magnitude = 1.0", "");
        assert!(matches!(
            Config::from_toml_str(&missing),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn foreign_wavelet_ids_resolve_lazily() {
        let foreign = SAMPLE.replace("\"db2\"", "\"bior2.2\"");
        let config = Config::from_toml_str(&foreign).unwrap();
        assert_eq!(config.wavelets[1].name, "d4p");
        assert!(matches!(
            config.wavelets[1].wavelet(),
            Err(Error::UnknownWavelet(id)) if id == "bior2.2"
        ));
        let odd_mode = SAMPLE.replace("\"periodization\"", "\"mirror\"");
        let config = Config::from_toml_str(&odd_mode).unwrap();
        assert!(matches!(
            config.wavelets[1].boundary_mode(),
            Err(Error::UnknownMode(_))
        ));
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(Config::load(&path).unwrap().inputs[0].name, "signal_a");
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.is_not_found());
    }
}
