#![warn(clippy::pedantic)]

use beamx::{
    mass_and_weight, point_load_deflection, second_moment_of_area, self_weight_deflection,
    total_deflection, tube, BeamSpec, ComparisonChart, DeflectionResult, ResultLog,
};
use tempfile::TempDir;

#[derive(Debug, Clone, Copy)]
struct TubeProperties {
    density: f64,
    length: f64,
    elasticity: f64,
    thickness: f64,
    diameter: f64,
}

impl Default for TubeProperties {
    fn default() -> Self {
        Self {
            density: 7850.0,
            length: 1.0,
            elasticity: 200.0e9,
            thickness: 0.005,
            diameter: 0.05,
        }
    }
}

fn evaluate(properties: TubeProperties, material: Option<&str>) -> DeflectionResult {
    total_deflection(
        properties.density,
        properties.length,
        properties.elasticity,
        properties.thickness,
        properties.diameter,
        material,
    )
}

/// Assert two floats are the same IEEE value, not merely close.
fn assert_same_bits(actual: f64, expected: f64) {
    assert_eq!(
        actual.to_bits(),
        expected.to_bits(),
        "{actual:?} differs from {expected:?}"
    );
}

#[test]
fn steel_tube_matches_reference_values() {
    let properties = TubeProperties::default();

    let (weight, mass) = mass_and_weight(
        properties.diameter,
        properties.length,
        properties.thickness,
        properties.density,
    );
    assert_same_bits(weight, 54.434_101_019_393_175);
    assert_same_bits(mass, 5.548_838_024_402_974);
    assert_same_bits(
        second_moment_of_area(properties.diameter, properties.thickness),
        1.811_324_514_335_365_6e-7,
    );
    assert_same_bits(
        point_load_deflection(
            properties.length,
            properties.elasticity,
            properties.thickness,
            properties.diameter,
        ),
        4.513_271_882_150_657e-4,
    );
    assert_same_bits(
        self_weight_deflection(
            properties.density,
            properties.length,
            properties.elasticity,
            properties.thickness,
            properties.diameter,
        ),
        1.878_256_097_560_975_8e-4,
    );

    let result = evaluate(properties, Some("steel"));
    assert_same_bits(result.deflection, 6.391_527_979_711_634e-4);
    assert_same_bits(result.weight, mass);
    assert_eq!(format!("{:?}", result.deflection), "0.0006391527979711634");
}

#[test]
fn stiffer_material_deflects_less() {
    let mut previous = f64::INFINITY;
    for elasticity in [1.0e6, 1.0e9, 69.0e9, 200.0e9, 1.0e12] {
        let properties = TubeProperties {
            elasticity,
            ..TubeProperties::default()
        };
        let deflection = evaluate(properties, None).deflection;
        assert!(deflection < previous, "E = {elasticity}");
        previous = deflection;
    }
}

#[test]
fn vanishing_wall_is_not_clamped() {
    let mut previous = 0.0;
    for thickness in [1.0e-3, 1.0e-4, 1.0e-5, 1.0e-6] {
        let properties = TubeProperties {
            thickness,
            ..TubeProperties::default()
        };
        let deflection = evaluate(properties, None).deflection;
        assert!(deflection > previous, "t = {thickness}");
        previous = deflection;
    }

    let hollow = TubeProperties {
        thickness: 0.0,
        ..TubeProperties::default()
    };
    assert!(!evaluate(hollow, None).deflection.is_finite());
}

#[test]
fn solid_rod_limit_stays_finite() {
    let rod = TubeProperties {
        thickness: 0.025,
        ..TubeProperties::default()
    };
    let spec = BeamSpec {
        material: None,
        length: rod.length,
        section: tube(rod.diameter, rod.thickness),
        elastic_modulus: rod.elasticity,
        density: rod.density,
    };
    assert!(spec.validate().is_err());

    let result = spec.evaluate();
    assert!(result.deflection.is_finite());
    assert!(result.deflection > 0.0);
}

#[test]
fn log_round_trip_and_deduplication() {
    let dir = TempDir::new().expect("temporary directory");
    let log = ResultLog::new(dir.path().join("deflection_results.txt"));

    let steel = evaluate(TubeProperties::default(), Some("steel"));
    let aluminium = evaluate(
        TubeProperties {
            density: 2700.0,
            elasticity: 69.0e9,
            ..TubeProperties::default()
        },
        Some("aluminium"),
    );
    let unnamed = evaluate(
        TubeProperties {
            thickness: 0.002,
            ..TubeProperties::default()
        },
        None,
    );

    assert!(log.append_if_new(&steel).expect("first append"));
    assert!(!log.append_if_new(&steel).expect("duplicate skipped"));
    assert!(log.append_if_new(&aluminium).expect("second append"));
    assert!(log.append_if_new(&unnamed).expect("third append"));
    assert!(!log.append_if_new(&aluminium).expect("duplicate skipped"));

    let loaded = log.load_all().expect("log parses");
    assert_eq!(loaded, vec![steel, aluminium, unnamed]);
}

#[test]
fn chart_orders_logged_results() {
    let dir = TempDir::new().expect("temporary directory");
    let log = ResultLog::new(dir.path().join("deflection_results.txt"));

    for (name, deflection) in [("mid", 5.0e-4), ("high", 1.0e-3), ("low", 2.0e-4)] {
        let mut result = evaluate(TubeProperties::default(), Some(name));
        result.deflection = deflection;
        log.append_if_new(&result).expect("append succeeds");
    }

    let chart = ComparisonChart::new(&log.load_all().expect("log parses"));
    let order: Vec<f64> = chart.bars().iter().map(|bar| bar.deflection).collect();
    assert_eq!(order, vec![2.0e-4, 5.0e-4, 1.0e-3]);
    assert!(chart.bars()[0].tick_label.starts_with("low\n"));
}
