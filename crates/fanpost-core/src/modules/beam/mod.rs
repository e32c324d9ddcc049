mod model;
mod parser;

use super::ModuleExecutor;
use crate::domain::{AnalysisRequest, OutputArtifact, PostError, PostResult};
use std::fs;

use model::BeamModel;
use parser::{artifact_list, parse_beam_deck, read_input_source, validate_request_shape};

pub(crate) const BEAM_REQUIRED_INPUTS: [&str; 1] = ["beam.inp"];
pub(crate) const BEAM_REQUIRED_OUTPUTS: [&str; 6] = [
    "deflection_field.dat",
    "x_axis.dat",
    "t_axis.dat",
    "beam_summary.dat",
    "beam_summary.json",
    "deflection_map.svg",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeamContract {
    pub required_inputs: Vec<OutputArtifact>,
    pub expected_outputs: Vec<OutputArtifact>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BeamModule;

impl BeamModule {
    pub fn contract_for_request(&self, request: &AnalysisRequest) -> PostResult<BeamContract> {
        validate_request_shape(request)?;
        Ok(BeamContract {
            required_inputs: artifact_list(&BEAM_REQUIRED_INPUTS),
            expected_outputs: artifact_list(&BEAM_REQUIRED_OUTPUTS),
        })
    }
}

impl ModuleExecutor for BeamModule {
    fn execute(&self, request: &AnalysisRequest) -> PostResult<Vec<OutputArtifact>> {
        validate_request_shape(request)?;

        let source = read_input_source(&request.input_path, BEAM_REQUIRED_INPUTS[0])?;
        let deck = parse_beam_deck(&request.case_id, &source)?;
        let model = BeamModel::from_deck(&request.case_id, deck)?;
        let outputs = artifact_list(&BEAM_REQUIRED_OUTPUTS);

        fs::create_dir_all(&request.output_dir).map_err(|source| {
            PostError::io_system(
                "IO.BEAM_OUTPUT_DIRECTORY",
                format!(
                    "failed to create BEAM output directory '{}': {}",
                    request.output_dir.display(),
                    source
                ),
            )
        })?;

        for artifact in &outputs {
            let output_path = request.output_dir.join(&artifact.relative_path);
            let artifact_name = artifact.relative_path.to_string_lossy().replace('\\', "/");
            model.write_artifact(&artifact_name, &output_path)?;
        }

        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::BeamModule;
    use crate::domain::{AnalysisModule, AnalysisRequest, PostErrorCategory};
    use crate::modules::ModuleExecutor;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const EXPECTED_BEAM_OUTPUTS: [&str; 6] = [
        "deflection_field.dat",
        "x_axis.dat",
        "t_axis.dat",
        "beam_summary.dat",
        "beam_summary.json",
        "deflection_map.svg",
    ];

    fn coarse_deck_source() -> &'static str {
        "\
# coarse verification deck\n\
series_terms 3\n\
bracket_count 6\n\
position_samples 14\n\
time_samples 12\n\
sweep_steps 4\n"
    }

    fn stage_input(destination_dir: &Path, source: &str) {
        fs::create_dir_all(destination_dir).expect("destination directory should exist");
        fs::write(destination_dir.join("beam.inp"), source)
            .expect("beam deck should be written");
    }

    #[test]
    fn contract_names_the_field_and_axis_artifacts() {
        let request =
            AnalysisRequest::new("CASE-BEAM-001", AnalysisModule::Beam, "beam.inp", "out");
        let contract = BeamModule
            .contract_for_request(&request)
            .expect("contract should build");

        assert_eq!(contract.required_inputs.len(), 1);
        assert_eq!(
            contract
                .expected_outputs
                .iter()
                .map(|artifact| artifact.relative_path.to_string_lossy().to_string())
                .collect::<Vec<_>>(),
            EXPECTED_BEAM_OUTPUTS
        );
    }

    #[test]
    fn execute_emits_field_axes_and_summary_artifacts() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input_dir = temp.path().join("inputs");
        let output_dir = temp.path().join("outputs");
        stage_input(&input_dir, coarse_deck_source());

        let request = AnalysisRequest::new(
            "CASE-BEAM-001",
            AnalysisModule::Beam,
            input_dir.join("beam.inp"),
            &output_dir,
        );
        let artifacts = BeamModule
            .execute(&request)
            .expect("BEAM execution should succeed");

        assert_eq!(artifacts.len(), EXPECTED_BEAM_OUTPUTS.len());
        for artifact in EXPECTED_BEAM_OUTPUTS {
            let output_path = output_dir.join(artifact);
            assert!(output_path.is_file(), "artifact '{}' should exist", artifact);
            assert!(
                !fs::read(&output_path)
                    .expect("output artifact should be readable")
                    .is_empty(),
                "artifact '{}' should not be empty",
                artifact
            );
        }
    }

    #[test]
    fn array_artifacts_have_matching_shapes() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input_dir = temp.path().join("inputs");
        let output_dir = temp.path().join("outputs");
        stage_input(&input_dir, coarse_deck_source());

        let request = AnalysisRequest::new(
            "CASE-BEAM-001",
            AnalysisModule::Beam,
            input_dir.join("beam.inp"),
            &output_dir,
        );
        BeamModule
            .execute(&request)
            .expect("BEAM execution should succeed");

        let x_axis = fs::read_to_string(output_dir.join("x_axis.dat"))
            .expect("x axis should be readable");
        let t_axis = fs::read_to_string(output_dir.join("t_axis.dat"))
            .expect("t axis should be readable");
        let field = fs::read_to_string(output_dir.join("deflection_field.dat"))
            .expect("field should be readable");

        let x_count = x_axis.lines().count();
        let t_count = t_axis.lines().count();
        assert_eq!(x_count, 14);
        assert_eq!(t_count, 12);

        let field_lines = field.lines().collect::<Vec<_>>();
        assert_eq!(field_lines.len(), t_count);
        for line in field_lines {
            assert_eq!(line.split_whitespace().count(), x_count);
        }
    }

    #[test]
    fn execute_is_deterministic_for_same_deck() {
        let temp = TempDir::new().expect("tempdir should be created");
        let first_input = temp.path().join("first-input");
        let second_input = temp.path().join("second-input");
        let first_output = temp.path().join("first-output");
        let second_output = temp.path().join("second-output");
        stage_input(&first_input, coarse_deck_source());
        stage_input(&second_input, coarse_deck_source());

        for (input, output) in [(&first_input, &first_output), (&second_input, &second_output)] {
            let request = AnalysisRequest::new(
                "CASE-BEAM-001",
                AnalysisModule::Beam,
                input.join("beam.inp"),
                output,
            );
            BeamModule
                .execute(&request)
                .expect("BEAM execution should succeed");
        }

        for artifact in EXPECTED_BEAM_OUTPUTS {
            let first = fs::read(first_output.join(artifact)).expect("first output should exist");
            let second =
                fs::read(second_output.join(artifact)).expect("second output should exist");
            assert_eq!(
                first, second,
                "artifact '{}' should be deterministic across runs",
                artifact
            );
        }
    }

    #[test]
    fn execute_rejects_non_beam_module_requests() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input_dir = temp.path().join("inputs");
        stage_input(&input_dir, coarse_deck_source());

        let request = AnalysisRequest::new(
            "CASE-BEAM-001",
            AnalysisModule::Forces,
            input_dir.join("beam.inp"),
            temp.path(),
        );
        let error = BeamModule
            .execute(&request)
            .expect_err("module mismatch should fail");

        assert_eq!(error.category(), PostErrorCategory::InputValidationError);
        assert_eq!(error.code(), "INPUT.BEAM_MODULE");
    }

    #[test]
    fn execute_reports_missing_deck_as_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");

        let request = AnalysisRequest::new(
            "CASE-BEAM-001",
            AnalysisModule::Beam,
            temp.path().join("beam.inp"),
            temp.path().join("out"),
        );
        let error = BeamModule
            .execute(&request)
            .expect_err("missing deck should fail");

        assert_eq!(error.category(), PostErrorCategory::IoSystemError);
        assert_eq!(error.code(), "IO.BEAM_INPUT_READ");
    }

    #[test]
    fn execute_rejects_invalid_deck_values() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input_dir = temp.path().join("inputs");
        stage_input(&input_dir, "density -1.0\n");

        let request = AnalysisRequest::new(
            "CASE-BEAM-001",
            AnalysisModule::Beam,
            input_dir.join("beam.inp"),
            temp.path().join("out"),
        );
        let error = BeamModule
            .execute(&request)
            .expect_err("negative density should fail");

        assert_eq!(error.category(), PostErrorCategory::InputValidationError);
        assert_eq!(error.code(), "INPUT.BEAM_DECK");
    }
}
