use std::fs;
use std::path::Path;

use dwt_precision::array::{artifact_path, read_f64_le};
use dwt_precision::compare::{self, InputBody, Outcome};
use dwt_precision::generate::generate_signals;
use dwt_precision::{backend, Algorithm, ComparisonPair, Config, Error, Precision, Suffix, TransformRunner};

const CONFIG: &str = r#"
[[wavelets]]
name = "haar"
id = "haar"
mode = "symmetric"

[[wavelets]]
name = "db2p"
id = "db2"
mode = "periodization"

[[inputs]]
name = "signal_a"
shape = [8]
magnitude = 1.0

[[inputs]]
name = "image"
shape = [6, 4]
magnitude = 10.0
"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run(config: &Config, root: &Path, algorithm: Algorithm, precision: Precision, out: &str) {
    let b = backend(algorithm, precision);
    TransformRunner::new(b.as_ref(), root.join("input"), root.join(out))
        .run(config)
        .unwrap();
}

#[test]
/// The documented one-dimensional scenario: 8 samples, Haar, symmetric.
fn haar_symmetric_signal_writes_expected_files() {
    init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let config = Config::from_toml_str(CONFIG).unwrap();
    generate_signals(&config.inputs, &root.join("input"), Some(11)).unwrap();
    run(&config, root, Algorithm::Convolution, Precision::F64, "ref");

    let out = root.join("ref");
    let size = |s| fs::metadata(artifact_path(&out, "signal_a", "haar", s)).unwrap().len();
    assert_eq!(size(Suffix::LFwd), 32);
    assert_eq!(size(Suffix::HFwd), 32);
    assert_eq!(size(Suffix::Inv), 64);

    let input = read_f64_le(&root.join("input").join("signal_a")).unwrap();
    let inv = read_f64_le(&artifact_path(&out, "signal_a", "haar", Suffix::Inv)).unwrap();
    for (a, b) in input.iter().zip(&inv) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
/// Two-dimensional inputs persist four bands and the reconstruction.
fn image_input_writes_five_files() {
    init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let config = Config::from_toml_str(CONFIG).unwrap();
    generate_signals(&config.inputs, &root.join("input"), Some(12)).unwrap();
    run(&config, root, Algorithm::Lifting, Precision::F32, "lifting");

    for suffix in Suffix::TWO_D {
        let path = artifact_path(&root.join("lifting"), "image", "db2p", suffix);
        let values = read_f64_le(&path).unwrap();
        let expected = if suffix == Suffix::Inv { 24 } else { 6 };
        assert_eq!(values.len(), expected, "{suffix}");
    }
}

#[test]
/// Cross-precision comparison: non-zero finite error, 2-D inputs skipped.
fn reduced_precision_report() {
    init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let config = Config::from_toml_str(CONFIG).unwrap();
    generate_signals(&config.inputs, &root.join("input"), Some(13)).unwrap();
    run(&config, root, Algorithm::Convolution, Precision::F64, "f64");
    run(&config, root, Algorithm::Convolution, Precision::Bf16, "bf16");

    let pair = ComparisonPair::new(root.join("bf16"), root.join("f64"));
    let report = compare::run(&config, &[pair]);
    assert_eq!(report.failures(), 0);
    assert_eq!(report.missing(), 0);
    assert_eq!(report.compared(), 6);
    for outcome in report.outcomes() {
        match outcome {
            Outcome::Compared(stats) => {
                assert!(stats.max_rel > 0.0, "{stats:?}");
                assert!(stats.max_rel.is_finite() && stats.mean_rel <= stats.max_rel);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
    let image = &report.pairs[0].inputs[1];
    assert_eq!(image.body, InputBody::TwoDimensional);
}

#[test]
/// A missing artifact is reported and the sweep moves on.
fn missing_artifact_keeps_sweeping() {
    init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let config = Config::from_toml_str(CONFIG).unwrap();
    generate_signals(&config.inputs, &root.join("input"), Some(14)).unwrap();
    run(&config, root, Algorithm::Convolution, Precision::F32, "f32");
    run(&config, root, Algorithm::Convolution, Precision::F64, "f64");
    let gone = artifact_path(&root.join("f32"), "signal_a", "haar", Suffix::HFwd);
    fs::remove_file(&gone).unwrap();

    let report = compare::run(&config, &[ComparisonPair::new(root.join("f32"), root.join("f64"))]);
    assert_eq!(report.missing(), 1);
    assert_eq!(report.compared(), 5);
    assert!(report
        .to_string()
        .contains(&format!("File not found: {}, skipping.", gone.display())));
}

#[test]
/// Lifting refuses wavelets it has no factorisation for and stops the run.
fn lifting_run_fails_fast() {
    init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let config = Config::from_toml_str(&CONFIG.replace("\"db2\"", "\"db4\"")).unwrap();
    generate_signals(&config.inputs, &root.join("input"), Some(15)).unwrap();
    let b = backend(Algorithm::Lifting, Precision::F64);
    let err = TransformRunner::new(b.as_ref(), root.join("input"), root.join("out"))
        .run(&config)
        .unwrap_err();
    assert!(matches!(err, Error::NoLiftingScheme(name) if name == "db4"));
}
