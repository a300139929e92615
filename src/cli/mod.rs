//! Interactive selection flow: profile, project, environment, then fetch.
use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use crate::{
    lib::{
        errors::{OutputError, ProfileError, PromptError},
        fs as dir_fs,
    },
    store::{fetch_and_write, ParameterStore},
};

pub mod args;
pub mod prompt;

pub use args::{resolve_config_path, FetchArgs};
pub use prompt::{choose, LineSource, ScriptedLineSource, StdinLineSource};

/// Failures that abort the selection flow. Fetch-stage failures are handled
/// inside the flow and never surface here.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Fatal: the process must exit non-zero.
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Listing(#[from] OutputError),
}

/// Run the linear selection pipeline. Each stage's output feeds the next:
/// profile → project → environment → fetch.
///
/// Empty project or environment listings end the run early with a user
/// message; a failed fetch is logged and reported but also returns `Ok`.
pub async fn run_flow<S: ParameterStore>(
    base_dir: &Path,
    store: &S,
    lines: &mut dyn LineSource,
) -> Result<(), FlowError> {
    let profiles = store.list_profiles().await?;
    if profiles.is_empty() {
        return Err(FlowError::Profile(ProfileError::NoProfiles));
    }
    let profile = choose(&profiles, "Available AWS Profiles:", lines)?.to_string();
    println!("Using AWS CLI profile: {profile}");
    info!(profile = %profile, "Selected AWS CLI profile");

    let projects = dir_fs::list_subdirectories(base_dir)?;
    if projects.is_empty() {
        println!("No projects found in {}.", base_dir.display());
        info!(base_dir = %base_dir.display(), "No projects found; nothing to fetch");
        return Ok(());
    }
    let project = choose(&projects, "Available Projects:", lines)?.to_string();
    let project_dir = base_dir.join(&project);

    let environments = dir_fs::list_subdirectories(&project_dir)?;
    if environments.is_empty() {
        println!("No environments found for project '{project}'.");
        info!(project = %project, "No environments found; nothing to fetch");
        return Ok(());
    }
    let environment = choose(
        &environments,
        &format!("Available Environments for {project}:"),
        lines,
    )?
    .to_string();

    println!("\nFetching parameters for project: {project}, environment: {environment}\n");
    let target_dir = project_dir.join(&environment);
    match fetch_and_write(store, &profile, &target_dir, &project, &environment).await {
        Ok(outcome) => {
            println!(
                "\nParameters saved to: {} and {}",
                outcome.json_path.display(),
                outcome.env_path.display()
            );
            info!(
                parameter_count = outcome.parameters.len(),
                project = %project,
                environment = %environment,
                "Fetch completed"
            );
        }
        Err(err) => {
            error!(reason = %err, "Error fetching parameters from the store");
            println!(
                "Error fetching parameters. Ensure the AWS CLI is configured correctly \
                 and has the necessary permissions."
            );
        }
    }

    // A fetch failure is non-fatal; only pre-fetch conditions abort the run.
    Ok(())
}
