use crate::domain::{AnalysisRequest, OutputArtifact, PostResult};

pub trait ModuleExecutor {
    fn execute(&self, request: &AnalysisRequest) -> PostResult<Vec<OutputArtifact>>;
}

#[cfg(test)]
mod tests {
    use super::ModuleExecutor;
    use crate::domain::{
        AnalysisModule, AnalysisRequest, OutputArtifact, PostError, PostErrorCategory,
    };

    struct FailingExecutor;

    impl ModuleExecutor for FailingExecutor {
        fn execute(
            &self,
            _request: &AnalysisRequest,
        ) -> crate::domain::PostResult<Vec<OutputArtifact>> {
            Err(PostError::computation("RUN.MODULE", "module execution failed"))
        }
    }

    #[test]
    fn module_executor_uses_shared_error_types() {
        let request =
            AnalysisRequest::new("CASE-001", AnalysisModule::Forces, "forces.dat", "out");
        let error = FailingExecutor
            .execute(&request)
            .expect_err("executor should fail");
        assert_eq!(error.category(), PostErrorCategory::ComputationError);
        assert_eq!(error.exit_code(), 4);
        assert_eq!(error.code(), "RUN.MODULE");
    }
}
