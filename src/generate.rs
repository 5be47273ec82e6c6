//! Random input signals.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::array::write_f64_le;
use crate::config::InputDescriptor;
use crate::error::{Error, Result};

/// `product(shape)` values uniform in `[0, magnitude)`, row-major.
pub fn random_signal<R: Rng + ?Sized>(rng: &mut R, input: &InputDescriptor) -> Vec<f64> {
    (0..input.len())
        .map(|_| rng.gen::<f64>() * input.magnitude)
        .collect()
}

/// Write one signal file per input into `output`, named after the input.
///
/// With `seed` the run is reproducible; otherwise the thread-local entropy
/// source is used. Returns the paths written, in input order.
pub fn generate_signals(inputs: &[InputDescriptor], output: &Path, seed: Option<u64>) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output).map_err(|e| Error::io("create directory", output, e))?;
    let mut rng: Box<dyn rand::RngCore> = match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        let signal = random_signal(&mut rng, input);
        let path = output.join(&input.name);
        write_f64_le(&path, &signal)?;
        log::info!(
            "generated {} {:?} (magnitude {}) -> {}",
            input.name,
            input.shape,
            input.magnitude,
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}
