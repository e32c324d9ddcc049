use super::dispatch::{ModuleCommandSpec, MODULE_COMMANDS};
use super::CliError;
use anyhow::Context;
use fanpost_core::domain::{AnalysisRequest, PostError};
use fanpost_core::modules::execute_module;
use std::path::{Path, PathBuf};

#[derive(clap::Args)]
pub(super) struct ModuleArgs {
    /// Input artifact path (defaults to the module artifact in the working directory)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory artifacts are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Case identifier stamped into artifacts and diagnostics
    #[arg(long)]
    case: Option<String>,
}

#[derive(clap::Args)]
pub(super) struct RunAllArgs {
    /// Directory artifacts are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

pub(super) fn run_module_command(
    spec: ModuleCommandSpec,
    args: ModuleArgs,
) -> Result<i32, CliError> {
    let input_path = args
        .input
        .unwrap_or_else(|| PathBuf::from(spec.input_artifact));
    let case_id = args
        .case
        .unwrap_or_else(|| spec.default_case.to_string());

    execute_and_report(spec, &case_id, &input_path, &args.output_dir)?;
    Ok(0)
}

/// Run every analysis whose default input artifact is present.
pub(super) fn run_all_command(args: RunAllArgs) -> Result<i32, CliError> {
    let working_dir =
        std::env::current_dir().context("failed to resolve the working directory")?;

    let mut executed = 0_usize;
    for spec in MODULE_COMMANDS {
        let input_path = working_dir.join(spec.input_artifact);
        if !input_path.is_file() {
            tracing::debug!(
                module = %spec.module,
                artifact = spec.input_artifact,
                "skipping analysis, input artifact not present"
            );
            continue;
        }
        execute_and_report(spec, spec.default_case, &input_path, &args.output_dir)?;
        executed += 1;
    }

    if executed == 0 {
        return Err(CliError::Compute(PostError::input_validation(
            "INPUT.CLI_RUN_EMPTY",
            "no analysis input artifacts (forces.dat, drag.dat, beam.inp) found in the working directory",
        )));
    }

    println!("Completed {} analyses.", executed);
    Ok(0)
}

fn execute_and_report(
    spec: ModuleCommandSpec,
    case_id: &str,
    input_path: &Path,
    output_dir: &Path,
) -> Result<(), CliError> {
    let request = AnalysisRequest::new(case_id, spec.module, input_path, output_dir);

    tracing::info!(module = %spec.module, case = case_id, input = %input_path.display(), "starting analysis");
    println!("Running {}...", spec.module);
    let artifacts = execute_module(&request).map_err(CliError::Compute)?;
    println!(
        "{} completed for case '{}' ({} artifacts).",
        spec.module,
        case_id,
        artifacts.len()
    );
    Ok(())
}
