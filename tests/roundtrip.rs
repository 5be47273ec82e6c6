use dwt_precision::dwt::{dwt, dwt_len, idwt};
use dwt_precision::{backend, Algorithm, BoundaryMode, Matrix, Precision, Wavelet};
use proptest::prelude::*;

fn max_err(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
}

#[test]
/// The db1 example from the PyWavelets documentation.
fn db1_matches_library_example() {
    let w = Wavelet::from_name("db1").unwrap();
    let (a, d) = dwt(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &w, BoundaryMode::Symmetric).unwrap();
    let expected_a = [2.12132034, 4.94974747, 7.77817459];
    assert!(max_err(&a, &expected_a) < 1e-8, "{a:?}");
    assert!(d.iter().all(|v| (v + 0.70710678).abs() < 1e-8), "{d:?}");
}

#[test]
/// Smooth extension of a linear ramp leaves no detail for two vanishing moments.
fn db2_smooth_ramp_has_no_detail() {
    let w = Wavelet::from_name("db2").unwrap();
    let x: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let (a, d) = dwt(&x, &w, BoundaryMode::Smooth).unwrap();
    assert_eq!(a.len(), dwt_len(6, 4, BoundaryMode::Smooth));
    assert!(d.iter().all(|v| v.abs() < 1e-12), "{d:?}");
    let y = idwt(&a, &d, &w, BoundaryMode::Smooth).unwrap();
    assert!(max_err(&x, &y) < 1e-12);
}

fn mode_strategy() -> impl Strategy<Value = BoundaryMode> {
    prop::sample::select(BoundaryMode::ALL.to_vec())
}

fn wavelet_strategy() -> impl Strategy<Value = Wavelet> {
    prop::sample::select(Wavelet::NAMES.to_vec()).prop_map(|n| Wavelet::from_name(n).unwrap())
}

proptest! {
    #[test]
    fn f64_convolution_roundtrip(
        ref x in prop::collection::vec(-100.0f64..100.0, 1..80),
        w in wavelet_strategy(),
        mode in mode_strategy(),
    ) {
        let b = backend(Algorithm::Convolution, Precision::F64);
        let c = b.forward_1d(x, &w, mode).unwrap();
        prop_assert_eq!(c.approx.len(), dwt_len(x.len(), w.filter_len(), mode));
        let y = b.inverse_1d(&c, &w, mode).unwrap();
        prop_assert!(y.len() >= x.len());
        prop_assert!(max_err(x, &y[..x.len()]) < 1e-9);
    }

    #[test]
    fn f32_roundtrip_relative_to_magnitude(
        ref x in prop::collection::vec(-1000.0f64..1000.0, 2..64),
        algorithm in prop::sample::select(Algorithm::ALL.to_vec()),
        mode in mode_strategy(),
    ) {
        let w = Wavelet::from_name("db2").unwrap();
        let b = backend(algorithm, Precision::F32);
        let c = b.forward_1d(x, &w, mode).unwrap();
        let y = b.inverse_1d(&c, &w, mode).unwrap();
        let magnitude = x.iter().fold(1.0f64, |m, v| m.max(v.abs()));
        prop_assert!(max_err(x, &y[..x.len()]) <= 1e-4 * magnitude);
    }

    #[test]
    fn lifting_band_lengths(
        ref x in prop::collection::vec(-1.0f64..1.0, 1..50),
        precision in prop::sample::select(Precision::ALL.to_vec()),
    ) {
        let w = Wavelet::from_name("sym2").unwrap();
        let c = backend(Algorithm::Lifting, precision)
            .forward_1d(x, &w, BoundaryMode::Symmetric)
            .unwrap();
        prop_assert_eq!(c.approx.len(), x.len().div_ceil(2));
        prop_assert_eq!(c.detail.len(), x.len() / 2);
    }

    #[test]
    fn periodization_2d_roundtrip(
        rows in 1usize..9,
        cols in 1usize..9,
        seed in any::<u64>(),
    ) {
        let data: Vec<f64> = (0..rows * cols)
            .map(|i| ((i as u64).wrapping_mul(seed | 1) % 97) as f64 - 48.0)
            .collect();
        let x = Matrix::new(rows, cols, data).unwrap();
        let w = Wavelet::from_name("coif1").unwrap();
        let b = backend(Algorithm::Convolution, Precision::F64);
        let bands = b.forward_2d(&x, &w, BoundaryMode::Periodization).unwrap();
        prop_assert_eq!(bands.ll.shape(), [rows.div_ceil(2), cols.div_ceil(2)]);
        let y = b.inverse_2d(&bands, &w, BoundaryMode::Periodization).unwrap();
        for r in 0..rows {
            for c in 0..cols {
                prop_assert!((x.get(r, c) - y.get(r, c)).abs() < 1e-9);
            }
        }
    }
}
