mod model;
mod parser;

use super::ModuleExecutor;
use crate::domain::{AnalysisRequest, OutputArtifact, PostError, PostResult};
use std::fs;

use model::ForcesModel;
use parser::{artifact_list, read_input_source, validate_request_shape};

pub(crate) const FORCES_REQUIRED_INPUTS: [&str; 1] = ["forces.dat"];
pub(crate) const FORCES_REQUIRED_OUTPUTS: [&str; 3] =
    ["force_summary.dat", "force_summary.json", "force_history.svg"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcesContract {
    pub required_inputs: Vec<OutputArtifact>,
    pub expected_outputs: Vec<OutputArtifact>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForcesModule;

impl ForcesModule {
    pub fn contract_for_request(&self, request: &AnalysisRequest) -> PostResult<ForcesContract> {
        validate_request_shape(request)?;
        Ok(ForcesContract {
            required_inputs: artifact_list(&FORCES_REQUIRED_INPUTS),
            expected_outputs: artifact_list(&FORCES_REQUIRED_OUTPUTS),
        })
    }
}

impl ModuleExecutor for ForcesModule {
    fn execute(&self, request: &AnalysisRequest) -> PostResult<Vec<OutputArtifact>> {
        validate_request_shape(request)?;

        let source = read_input_source(&request.input_path, FORCES_REQUIRED_INPUTS[0])?;
        let model = ForcesModel::from_source(&request.case_id, &source)?;
        let outputs = artifact_list(&FORCES_REQUIRED_OUTPUTS);

        fs::create_dir_all(&request.output_dir).map_err(|source| {
            PostError::io_system(
                "IO.FORCES_OUTPUT_DIRECTORY",
                format!(
                    "failed to create FORCES output directory '{}': {}",
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
