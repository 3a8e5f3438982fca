mod commands;
mod helpers;

use clap::Parser;
use lorenzmie_core::MieError;

pub fn run_from_env() -> i32 {
    match parse_and_dispatch(std::env::args().collect()) {
        Ok(code) => code,
        Err(error) => {
            let error = error.as_mie_error();
            eprintln!("{}", error.diagnostic_line());
            if let Some(summary_line) = error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_logging(cli.verbose);
            dispatch_parsed(cli.command)
        }
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
#[command(
    name = "lorenzmie",
    version,
    about = "Lorenz-Mie coefficients of layered spheres"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Compute the scattering coefficients a_n and b_n
    Coefficients(commands::CoefficientsArgs),
    /// Print the truncation order and size parameters
    Order(commands::ParticleArgs),
    /// Recompute a stored coefficient report and compare within tolerance
    Verify(commands::VerifyArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Coefficients(args) => commands::run_coefficients_command(args),
        CliCommand::Order(args) => commands::run_order_command(args),
        CliCommand::Verify(args) => commands::run_verify_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(MieError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<MieError> for CliError {
    fn from(error: MieError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_mie_error(&self) -> MieError {
        match self {
            Self::Usage(message) => MieError::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => MieError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
