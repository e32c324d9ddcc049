use super::beam::BeamModule;
use super::drag::DragModule;
use super::forces::ForcesModule;
use super::ModuleExecutor;
use crate::domain::{AnalysisModule, AnalysisRequest, OutputArtifact, PostResult};

/// Route a request to its module executor.
pub fn execute_module(request: &AnalysisRequest) -> PostResult<Vec<OutputArtifact>> {
    match request.module {
        AnalysisModule::Forces => ForcesModule.execute(request),
        AnalysisModule::Drag => DragModule.execute(request),
        AnalysisModule::Beam => BeamModule.execute(request),
    }
}
