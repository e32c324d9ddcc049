use super::FORCES_REQUIRED_INPUTS;
use crate::domain::{AnalysisModule, AnalysisRequest, OutputArtifact, PostError, PostResult};
use crate::numerics::ForceTable;
use std::fs;
use std::path::Path;

pub(super) const FORCES_COLUMNS: usize = 3;

pub(super) fn validate_request_shape(request: &AnalysisRequest) -> PostResult<()> {
    if request.module != AnalysisModule::Forces {
        return Err(PostError::input_validation(
            "INPUT.FORCES_MODULE",
            format!("FORCES module expects FORCES, got {}", request.module),
        ));
    }

    let input_file_name = request
        .input_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            PostError::input_validation(
                "INPUT.FORCES_INPUT_ARTIFACT",
                format!(
                    "FORCES module expects input artifact '{}' at '{}'",
                    FORCES_REQUIRED_INPUTS[0],
                    request.input_path.display()
                ),
            )
        })?;

    if !input_file_name.eq_ignore_ascii_case(FORCES_REQUIRED_INPUTS[0]) {
        return Err(PostError::input_validation(
            "INPUT.FORCES_INPUT_ARTIFACT",
            format!(
                "FORCES module requires input artifact '{}' but received '{}'",
                FORCES_REQUIRED_INPUTS[0], input_file_name
            ),
        ));
    }

    Ok(())
}

pub(super) fn read_input_source(path: &Path, artifact_name: &str) -> PostResult<String> {
    fs::read_to_string(path).map_err(|source| {
        PostError::io_system(
            "IO.FORCES_INPUT_READ",
            format!(
                "failed to read FORCES input '{}' ({}): {}",
                path.display(),
                artifact_name,
                source
            ),
        )
    })
}

pub(super) fn parse_force_table(case_id: &str, source: &str) -> PostResult<ForceTable> {
    ForceTable::parse(source, FORCES_COLUMNS).map_err(|error| {
        PostError::input_validation(
            "INPUT.FORCES_TABLE",
            format!("case '{}': {}", case_id, error),
        )
    })
}

pub(super) fn artifact_list(paths: &[&str]) -> Vec<OutputArtifact> {
    paths.iter().copied().map(OutputArtifact::new).collect()
}
