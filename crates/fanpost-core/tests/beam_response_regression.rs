use fanpost_core::domain::{AnalysisModule, AnalysisRequest};
use fanpost_core::modules::execute_module;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const COARSE_DECK: &str = "\
series_terms 3
bracket_count 8
position_samples 16
time_samples 12
sweep_steps 3
";

fn run_beam(deck: &str, root: &Path, label: &str) -> std::path::PathBuf {
    let input_dir = root.join(format!("{label}-inputs"));
    let output_dir = root.join(format!("{label}-outputs"));
    fs::create_dir_all(&input_dir).expect("input directory should exist");
    fs::write(input_dir.join("beam.inp"), deck).expect("beam deck should be written");

    let request = AnalysisRequest::new(
        format!("CASE-{label}"),
        AnalysisModule::Beam,
        input_dir.join("beam.inp"),
        &output_dir,
    );
    execute_module(&request).expect("BEAM pipeline should succeed");
    output_dir
}

fn parse_matrix(path: &Path) -> Vec<Vec<f64>> {
    fs::read_to_string(path)
        .expect("matrix artifact should be readable")
        .lines()
        .map(|line| {
            line.split_whitespace()
                .map(|token| token.parse::<f64>().expect("matrix value should parse"))
                .collect()
        })
        .collect()
}

#[test]
fn summary_reports_the_known_clamped_free_eigenvalues() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output_dir = run_beam(COARSE_DECK, temp.path(), "EIGEN");

    let summary: Value = serde_json::from_str(
        &fs::read_to_string(output_dir.join("beam_summary.json"))
            .expect("summary should be readable"),
    )
    .expect("summary should be valid JSON");

    let eigenvalues = summary["eigenvalues"]
        .as_array()
        .expect("eigenvalues should be an array");
    let known = [1.875_104_068_711_961, 4.694_091_132_974_175, 7.854_757_438_237_613];
    assert!(eigenvalues.len() >= known.len());
    for (value, expected) in eigenvalues.iter().zip(known) {
        let actual = value.as_f64().expect("eigenvalue should be numeric");
        assert!(
            (actual - expected).abs() <= 1.0e-8,
            "eigenvalue {actual} should match {expected}"
        );
    }

    assert_eq!(summary["series_terms"].as_u64(), Some(3));
    assert_eq!(summary["position_samples"].as_u64(), Some(16));
}

#[test]
fn homogeneous_field_scales_linearly_with_impact_speed() {
    let temp = TempDir::new().expect("tempdir should be created");

    let base_deck = "\
series_terms 3
bracket_count 8
position_samples 10
time_samples 8
sweep_steps 0
";
    let doubled_deck = "\
series_terms 3
bracket_count 8
position_samples 10
time_samples 8
sweep_steps 0
impact_speed 600.0
";

    let base_output = run_beam(base_deck, temp.path(), "V300");
    let doubled_output = run_beam(doubled_deck, temp.path(), "V600");

    let base = parse_matrix(&base_output.join("deflection_field.dat"));
    let doubled = parse_matrix(&doubled_output.join("deflection_field.dat"));

    assert_eq!(base.len(), doubled.len());
    for (base_row, doubled_row) in base.iter().zip(&doubled) {
        for (base_value, doubled_value) in base_row.iter().zip(doubled_row) {
            assert_eq!(
                *doubled_value,
                2.0 * base_value,
                "doubling the impact speed should double the homogeneous field"
            );
        }
    }
}

#[test]
fn axis_artifacts_carry_the_deck_spans() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output_dir = run_beam(COARSE_DECK, temp.path(), "AXES");

    let x_axis: Vec<f64> = fs::read_to_string(output_dir.join("x_axis.dat"))
        .expect("x axis should be readable")
        .lines()
        .map(|line| line.parse().expect("axis value should parse"))
        .collect();
    let t_axis: Vec<f64> = fs::read_to_string(output_dir.join("t_axis.dat"))
        .expect("t axis should be readable")
        .lines()
        .map(|line| line.parse().expect("axis value should parse"))
        .collect();

    assert_eq!(x_axis.len(), 16);
    assert_eq!(t_axis.len(), 12);
    assert_eq!(x_axis[0], 0.0);
    assert_eq!(*x_axis.last().expect("non-empty axis"), 10.0);
    assert_eq!(t_axis[0], 0.0);
    assert_eq!(*t_axis.last().expect("non-empty axis"), 60.0);
    assert!(
        x_axis.windows(2).all(|pair| pair[0] < pair[1]),
        "x axis should be strictly increasing"
    );
}
