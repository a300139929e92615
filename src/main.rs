//! Entry point for paramfetch.
use std::process::ExitCode;

use clap::Parser;
use paramfetch::{
    cli::{self, resolve_config_path, FetchArgs, FlowError, StdinLineSource},
    config::AppConfig,
    lib::{errors::ProfileError, telemetry},
    store::AwsCliStore,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let exit = bootstrap().await;
    // Reached on every path, including after a caught failure.
    info!("Execution finished");
    exit
}

async fn bootstrap() -> ExitCode {
    let args = FetchArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::SUCCESS;
        }
    };

    match telemetry::init_tracing(&config.paths.logs_dir) {
        Ok(log_path) => println!("Logs will be stored in {}", log_path.display()),
        Err(err) => eprintln!("Could not set up log file, continuing without one: {err:#}"),
    }

    let base_dir = args
        .base_dir_override
        .unwrap_or_else(|| config.paths.environments_dir.clone());
    let store = AwsCliStore::new(config.aws.binary.clone(), config.aws.region.clone());
    let mut lines = StdinLineSource;

    match cli::run_flow(&base_dir, &store, &mut lines).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(FlowError::Profile(err @ ProfileError::NoProfiles)) => {
            error!(reason = %err, "No AWS profiles are configured");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        Err(FlowError::Profile(err)) => {
            error!(reason = %err, "Error fetching AWS profiles");
            eprintln!("Error fetching AWS profiles. Ensure the AWS CLI is configured.");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(reason = %err, "An unexpected error occurred");
            eprintln!("An unexpected error occurred: {err}");
            ExitCode::SUCCESS
        }
    }
}

fn load_config(args: &FetchArgs) -> Result<AppConfig, String> {
    let config_path = resolve_config_path(args.config_override.clone())
        .map_err(|err| format!("An unexpected error occurred: {err:#}"))?;
    AppConfig::load_or_default(&config_path).map_err(|err| err.to_string())
}
