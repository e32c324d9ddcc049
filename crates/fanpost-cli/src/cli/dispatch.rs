use fanpost_core::domain::AnalysisModule;

#[derive(Debug, Clone, Copy)]
pub(super) struct ModuleCommandSpec {
    pub(super) command: &'static str,
    pub(super) module: AnalysisModule,
    pub(super) input_artifact: &'static str,
    pub(super) default_case: &'static str,
}

pub(super) const MODULE_COMMANDS: [ModuleCommandSpec; 3] = [
    ModuleCommandSpec {
        command: "forces",
        module: AnalysisModule::Forces,
        input_artifact: "forces.dat",
        default_case: "CASE-FORCES-001",
    },
    ModuleCommandSpec {
        command: "drag",
        module: AnalysisModule::Drag,
        input_artifact: "drag.dat",
        default_case: "CASE-DRAG-001",
    },
    ModuleCommandSpec {
        command: "beam",
        module: AnalysisModule::Beam,
        input_artifact: "beam.inp",
        default_case: "CASE-BEAM-001",
    },
];

pub(super) fn module_command_spec(command: &str) -> Option<ModuleCommandSpec> {
    MODULE_COMMANDS
        .iter()
        .copied()
        .find(|spec| spec.command == command)
}
