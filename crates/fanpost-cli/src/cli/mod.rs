mod commands;
mod dispatch;

use clap::Parser;
use dispatch::module_command_spec;
use fanpost_core::domain::PostError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let post_error = error.as_post_error();
            eprintln!("{}", post_error.diagnostic_line());
            if let Some(summary_line) = post_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            post_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("fanpost".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "fanpost", about = "Fan-wake simulation post-processing")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Average the paired force history and chart both components
    Forces(commands::ModuleArgs),
    /// Average the drag history and chart it
    Drag(commands::ModuleArgs),
    /// Synthesize the beam deflection field from a parameter deck
    Beam(commands::ModuleArgs),
    /// Run every analysis whose input artifact exists in the working directory
    Run(commands::RunAllArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Forces(args) => dispatch_module("forces", args),
        CliCommand::Drag(args) => dispatch_module("drag", args),
        CliCommand::Beam(args) => dispatch_module("beam", args),
        CliCommand::Run(args) => commands::run_all_command(args),
    }
}

fn dispatch_module(command_name: &str, args: commands::ModuleArgs) -> Result<i32, CliError> {
    let spec = module_command_spec(command_name)
        .expect("module command should be registered in MODULE_COMMANDS");
    commands::run_module_command(spec, args)
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(PostError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_post_error(&self) -> PostError {
        match self {
            Self::Usage(message) => PostError::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => PostError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
