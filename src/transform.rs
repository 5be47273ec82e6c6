//! Transform Runner: every (wavelet, input) pair through one backend.

use std::path::{Path, PathBuf};

use crate::array::{artifact_path, read_array, write_f64_le, Suffix};
use crate::backend::{Algorithm, DwtBackend};
use crate::config::{Config, InputDescriptor, WaveletDescriptor};
use crate::error::{Error, Result};
use crate::num::Precision;

/// Output directory conventionally used for a precision configuration.
pub fn default_output_dir(algorithm: Algorithm, precision: Precision) -> PathBuf {
    let name = match (algorithm, precision) {
        (Algorithm::Convolution, Precision::F64) => "output-reference".to_string(),
        (Algorithm::Convolution, p) => format!("output-{p}"),
        (Algorithm::Lifting, p) => format!("output-{p}-lifting"),
    };
    Path::new("data").join(name)
}

/// Counts of what one run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub units: usize,
    pub files: usize,
}

pub struct TransformRunner<'a> {
    backend: &'a dyn DwtBackend,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl<'a> TransformRunner<'a> {
    pub fn new(backend: &'a dyn DwtBackend, input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Transform every configured pair, wavelets in the outer loop.
    /// The first failure aborts the run.
    pub fn run(&self, config: &Config) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for wavelet in &config.wavelets {
            for input in &config.inputs {
                summary.files += self.run_unit(wavelet, input)?;
                summary.units += 1;
            }
        }
        log::info!(
            "{}: {} transforms, {} files written to {}",
            self.backend.label(),
            summary.units,
            summary.files,
            self.output_dir.display()
        );
        Ok(summary)
    }

    /// Transform one input with one wavelet; returns the number of files written.
    pub fn run_unit(&self, descriptor: &WaveletDescriptor, input: &InputDescriptor) -> Result<usize> {
        let wavelet = descriptor.wavelet()?;
        let mode = descriptor.boundary_mode()?;
        let signal = read_array(&self.input_dir.join(&input.name), &input.shape)?;
        log::debug!(
            "{} {} on {} {:?}",
            self.backend.label(),
            descriptor.name,
            input.name,
            input.shape
        );

        let mut outputs: Vec<(Suffix, Vec<f64>)> = Vec::with_capacity(5);
        match signal.ndim() {
            1 => {
                let coeffs = self.backend.forward_1d(signal.as_slice(), &wavelet, mode)?;
                let inv = self.backend.inverse_1d(&coeffs, &wavelet, mode)?;
                outputs.push((Suffix::LFwd, coeffs.approx));
                outputs.push((Suffix::HFwd, coeffs.detail));
                outputs.push((Suffix::Inv, inv));
            }
            2 => {
                let bands = self.backend.forward_2d(&signal.into_matrix()?, &wavelet, mode)?;
                let inv = self.backend.inverse_2d(&bands, &wavelet, mode)?;
                outputs.push((Suffix::LlFwd, bands.ll.into_vec()));
                outputs.push((Suffix::LhFwd, bands.lh.into_vec()));
                outputs.push((Suffix::HlFwd, bands.hl.into_vec()));
                outputs.push((Suffix::HhFwd, bands.hh.into_vec()));
                outputs.push((Suffix::Inv, inv.into_vec()));
            }
            n => return Err(Error::UnsupportedDimension(n)),
        }

        for (suffix, values) in &outputs {
            let path = artifact_path(&self.output_dir, &input.name, &descriptor.name, *suffix);
            write_f64_le(&path, values)?;
        }
        Ok(outputs.len())
    }
}
