mod model;
mod parser;

use super::ModuleExecutor;
use crate::domain::{AnalysisRequest, OutputArtifact, PostError, PostResult};
use std::fs;

use model::DragModel;
use parser::{artifact_list, read_input_source, validate_request_shape};

pub(crate) const DRAG_REQUIRED_INPUTS: [&str; 1] = ["drag.dat"];
pub(crate) const DRAG_REQUIRED_OUTPUTS: [&str; 3] =
    ["drag_summary.dat", "drag_summary.json", "drag_history.svg"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragContract {
    pub required_inputs: Vec<OutputArtifact>,
    pub expected_outputs: Vec<OutputArtifact>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragModule;

impl DragModule {
    pub fn contract_for_request(&self, request: &AnalysisRequest) -> PostResult<DragContract> {
        validate_request_shape(request)?;
        Ok(DragContract {
            required_inputs: artifact_list(&DRAG_REQUIRED_INPUTS),
            expected_outputs: artifact_list(&DRAG_REQUIRED_OUTPUTS),
        })
    }
}

impl ModuleExecutor for DragModule {
    fn execute(&self, request: &AnalysisRequest) -> PostResult<Vec<OutputArtifact>> {
        validate_request_shape(request)?;

        let source = read_input_source(&request.input_path, DRAG_REQUIRED_INPUTS[0])?;
        let model = DragModel::from_source(&request.case_id, &source)?;
        let outputs = artifact_list(&DRAG_REQUIRED_OUTPUTS);

        fs::create_dir_all(&request.output_dir).map_err(|source| {
            PostError::io_system(
                "IO.DRAG_OUTPUT_DIRECTORY",
                format!(
                    "failed to create DRAG output directory '{}': {}",
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
