use lorenzmie_core::numerics::compare_with_tolerance;
use lorenzmie_core::serialization::CoefficientRow;
use lorenzmie_core::{
    CoefficientTable, CoefficientTolerance, Instrument, MieWorkspace, ScatteringConfig,
    SizeParameters, Sphere, compare_tables, compute_coefficients, wiscombe_yang,
};
use num_complex::Complex64;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceFixture {
    cases: Vec<ReferenceCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceCase {
    id: String,
    config: ScatteringConfig,
    expected_order: usize,
    coefficients: Vec<CoefficientRow>,
}

impl ReferenceCase {
    fn table(&self) -> CoefficientTable {
        let (a, b): (Vec<_>, Vec<_>) = self
            .coefficients
            .iter()
            .map(|row| (Complex64::from(row.a), Complex64::from(row.b)))
            .unzip();
        CoefficientTable::from_columns(a, b).expect("reference rows should form a table")
    }
}

#[test]
fn computed_coefficients_match_exact_reference_series() {
    let fixture = load_fixture();
    assert_eq!(fixture.cases.len(), 7);

    for case in &fixture.cases {
        let config = &case.config;
        let table = config
            .particle
            .ab(&config.instrument)
            .unwrap_or_else(|error| panic!("{} should compute: {error}", case.id));

        assert_eq!(
            table.order().get(),
            case.expected_order,
            "{} truncation order",
            case.id
        );

        let comparison = compare_tables(&case.table(), &table, config.tolerance);
        assert!(
            comparison.passes(),
            "{} failed at n = {:?} (max abs diff {:.3e})",
            case.id,
            comparison.failing_orders,
            comparison.max_abs_diff
        );
    }
}

#[test]
fn polystyrene_in_water_matches_to_six_significant_digits() {
    let sphere = Sphere::homogeneous(0.75, 1.5);
    let table = sphere
        .ab(&Instrument::default())
        .expect("polystyrene sphere should compute");
    assert_eq!(table.order().get(), 25);

    let expected = [
        (
            1,
            Complex64::new(0.989_802_158_973_610_9, 0.100_468_129_597_348_66),
            Complex64::new(0.980_838_002_584_631, 0.137_094_183_940_903_64),
        ),
        (
            2,
            Complex64::new(0.981_664_394_684_579_6, 0.134_161_883_160_372_86),
            Complex64::new(0.994_714_079_123_857_2, 0.072_511_929_478_079_18),
        ),
        (
            3,
            Complex64::new(0.998_629_936_951_417_8, 0.036_988_998_037_593_32),
            Complex64::new(0.982_844_407_390_249_4, 0.129_850_984_795_095_09),
        ),
        (
            10,
            Complex64::new(0.880_270_501_343_808, -0.324_644_953_461_052_5),
            Complex64::new(0.812_044_168_063_321_5, -0.390_676_896_140_109_03),
        ),
    ];
    let six_digits = CoefficientTolerance {
        abs_tol: 0.0,
        rel_tol: 1.0e-6,
        relative_floor: 1.0e-12,
    };

    for (n, a, b) in expected {
        let (computed_a, computed_b) = table.get(n).expect("row should exist");
        assert!(
            compare_with_tolerance(a, computed_a, six_digits).passes,
            "a_{n}: expected {a}, got {computed_a}"
        );
        assert!(
            compare_with_tolerance(b, computed_b, six_digits).passes,
            "b_{n}: expected {b}, got {computed_b}"
        );
    }
}

#[test]
fn three_layer_sphere_matches_boundary_matching_series() {
    let sphere = Sphere::layered(
        vec![0.2, 0.35, 0.5],
        vec![1.6, 1.4, 1.5],
        vec![0.01, 0.0, 0.0],
    );
    let table = sphere
        .ab(&Instrument::default())
        .expect("three-layer sphere should compute");
    assert_eq!(table.order().get(), 19);

    let expected = [
        (
            1,
            Complex64::new(0.817_096_929_410_892_1, -0.346_484_274_315_196_13),
            Complex64::new(0.841_544_766_478_278_9, -0.334_701_402_782_240_86),
        ),
        (
            2,
            Complex64::new(0.753_653_033_429_628_7, -0.407_953_112_921_974_3),
            Complex64::new(0.816_275_765_292_650_9, -0.347_054_542_504_899_53),
        ),
        (
            5,
            Complex64::new(0.413_570_293_334_708_74, -0.491_586_663_027_885_8),
            Complex64::new(0.314_527_461_824_100_85, -0.464_081_866_381_262_7),
        ),
    ];
    let six_digits = CoefficientTolerance {
        abs_tol: 0.0,
        rel_tol: 1.0e-6,
        relative_floor: 1.0e-12,
    };
    for (n, a, b) in expected {
        let (computed_a, computed_b) = table.get(n).expect("row should exist");
        assert!(
            compare_with_tolerance(a, computed_a, six_digits).passes,
            "a_{n}: expected {a}, got {computed_a}"
        );
        assert!(
            compare_with_tolerance(b, computed_b, six_digits).passes,
            "b_{n}: expected {b}, got {computed_b}"
        );
    }
}

#[test]
fn three_layers_collapse_onto_two_when_neighbours_share_material() {
    let complex = |values: &[(f64, f64)]| -> Vec<Complex64> {
        values
            .iter()
            .map(|(re, im)| Complex64::new(*re, *im))
            .collect()
    };
    let cases = [
        (
            // Middle layer made of the outer shell material.
            SizeParameters::new(
                vec![2.0, 4.0, 6.0],
                complex(&[(1.5, 0.0), (1.2, 0.01), (1.2, 0.01)]),
            ),
            SizeParameters::new(vec![2.0, 6.0], complex(&[(1.5, 0.0), (1.2, 0.01)])),
        ),
        (
            // Middle layer made of the core material.
            SizeParameters::new(
                vec![2.0, 4.0, 6.0],
                complex(&[(1.5, 0.0), (1.5, 0.0), (1.2, 0.01)]),
            ),
            SizeParameters::new(vec![4.0, 6.0], complex(&[(1.5, 0.0), (1.2, 0.01)])),
        ),
    ];

    for (three, two) in cases {
        let three = three.expect("three-layer parameters should be valid");
        let two = two.expect("two-layer parameters should be valid");
        let order = wiscombe_yang(&two);
        assert_eq!(wiscombe_yang(&three), order);

        let lhs = compute_coefficients(&three, order);
        let rhs = compute_coefficients(&two, order);
        assert_rows_close(&lhs, &rhs, order.get(), 1.0e-12);
    }
}

#[test]
fn coefficients_are_bounded_by_unit_circle_for_lossless_spheres() {
    // Energy conservation: Re(a_n) = |a_n|^2 and likewise for b_n.
    let cases = [
        Sphere::homogeneous(0.75, 1.5),
        Sphere::new(vec![0.4, 0.75], vec![1.5, 1.4]),
        Sphere::new(vec![0.2, 0.5], vec![2.0, 1.45]),
        Sphere::new(vec![0.2, 0.35, 0.5], vec![1.6, 1.4, 1.5]),
    ];
    for sphere in cases {
        let table = sphere
            .ab(&Instrument::default())
            .expect("lossless sphere should compute");
        for (n, a, b) in table.pairs().skip(1) {
            assert!((a.re - a.norm_sqr()).abs() < 1.0e-6, "a_{n} = {a}");
            assert!((b.re - b.norm_sqr()).abs() < 1.0e-6, "b_{n} = {b}");
        }
    }
}

#[test]
fn coincident_layers_reduce_to_homogeneous_sphere() {
    let instrument = Instrument::default();
    let single = Sphere::homogeneous(0.75, 1.5)
        .ab(&instrument)
        .expect("single sphere should compute");
    let doubled = Sphere::new(vec![0.75, 0.75], vec![1.5, 1.5])
        .ab(&instrument)
        .expect("degenerate shell should compute");

    assert_eq!(single.order(), doubled.order());
    assert_rows_close(&single, &doubled, single.order().get(), 1.0e-12);
}

#[test]
fn shell_of_core_material_reduces_to_homogeneous_sphere() {
    let instrument = Instrument::default();
    let single = Sphere::layered(vec![0.75], vec![1.5], vec![0.01])
        .ab(&instrument)
        .expect("single sphere should compute");
    let core_shell = Sphere::layered(vec![0.4, 0.75], vec![1.5, 1.5], vec![0.01, 0.01])
        .ab(&instrument)
        .expect("core-shell sphere should compute");

    assert_eq!(single.order(), core_shell.order());
    assert_rows_close(&single, &core_shell, single.order().get(), 1.0e-10);
}

#[test]
fn index_matched_shell_reduces_to_bare_core() {
    let instrument = Instrument::default();
    let core = Sphere::homogeneous(0.4, 1.5)
        .ab(&instrument)
        .expect("core should compute");
    let coated = Sphere::new(vec![0.4, 0.75], vec![1.5, instrument.n_m])
        .ab(&instrument)
        .expect("coated core should compute");

    assert!(coated.order() > core.order());
    assert_rows_close(&core, &coated, core.order().get(), 1.0e-6);
    for (n, a, b) in coated.pairs().skip(core.order().get() + 1) {
        assert!(a.norm() < 1.0e-6 && b.norm() < 1.0e-6, "row {n} should vanish");
    }
}

#[test]
fn unsorted_layers_are_rejected() {
    let error = Sphere::new(vec![0.75, 0.4], vec![1.4, 1.5])
        .ab(&Instrument::default())
        .expect_err("outer layer listed first should be rejected");
    assert_eq!(error.code(), "INPUT.LAYER_ORDER");
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn workspace_results_match_across_a_size_sweep() {
    let instrument = Instrument::default();
    let mut workspace = MieWorkspace::new();
    for step in 1..=20 {
        let sphere = Sphere::new(vec![0.1 * step as f64], vec![1.45]);
        let params = sphere
            .size_parameters(&instrument)
            .expect("sweep sphere should be valid");
        let reused = sphere
            .ab_with(&instrument, &mut workspace)
            .expect("workspace should compute");
        assert_eq!(reused.order(), wiscombe_yang(&params));
        assert_eq!(
            reused,
            sphere.ab(&instrument).expect("one-shot should compute")
        );
    }
}

fn assert_rows_close(lhs: &CoefficientTable, rhs: &CoefficientTable, through: usize, tol: f64) {
    for n in 0..=through {
        let (lhs_a, lhs_b) = lhs.get(n).expect("lhs row should exist");
        let (rhs_a, rhs_b) = rhs.get(n).expect("rhs row should exist");
        assert!((lhs_a - rhs_a).norm() <= tol, "a_{n}: {lhs_a} vs {rhs_a}");
        assert!((lhs_b - rhs_b).norm() <= tol, "b_{n}: {lhs_b} vs {rhs_b}");
    }
}

fn load_fixture() -> ReferenceFixture {
    let path = crate_root().join("tests/fixtures/mie_reference.json");
    let source = fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("fixture '{}' should be readable: {error}", path.display()));
    serde_json::from_str(&source).expect("reference fixture should parse")
}

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}
