//! Fetch parameters for a project/environment and write the output files.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::info;
use uuid::Uuid;

use crate::lib::{errors::FetchError, fs as output_fs, telemetry::FetchSpan};

use super::client::ParameterStore;

/// Build the store path prefix `/{project}/{environment}/`. Stray slashes
/// on the inputs are trimmed so the prefix never doubles a separator.
pub fn parameter_path_prefix(project: &str, environment: &str) -> String {
    format!(
        "/{}/{}/",
        project.trim_matches('/'),
        environment.trim_matches('/')
    )
}

/// Result of a successful fetch-and-write pass.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Key/value pairs in store-response order.
    pub parameters: IndexMap<String, String>,
    pub json_path: PathBuf,
    pub env_path: PathBuf,
}

/// Fetch all parameters below the project/environment prefix and write the
/// JSON and env output files into `target_dir`. Nothing is written unless
/// the fetch succeeds.
pub async fn fetch_and_write<S: ParameterStore>(
    store: &S,
    profile: &str,
    target_dir: &Path,
    project: &str,
    environment: &str,
) -> Result<FetchOutcome, FetchError> {
    let prefix = parameter_path_prefix(project, environment);
    let job_id = Uuid::new_v4();
    let span = FetchSpan::start(job_id, &prefix);

    let result = fetch_inner(store, profile, target_dir, &prefix).await;
    match &result {
        Ok(outcome) => span.finish("succeeded", outcome.parameters.len()),
        Err(_) => span.finish("failed", 0),
    }
    result
}

async fn fetch_inner<S: ParameterStore>(
    store: &S,
    profile: &str,
    target_dir: &Path,
    prefix: &str,
) -> Result<FetchOutcome, FetchError> {
    let response = store.get_parameters_by_path(profile, prefix).await?;

    let mut parameters = IndexMap::new();
    for parameter in &response.parameters {
        let key = parameter.key().to_string();
        println!("{}: {}", key, parameter.value);
        parameters.insert(key, parameter.value.clone());
    }

    let (json_path, env_path) = output_fs::write_parameter_files(target_dir, &parameters)?;
    info!(
        target: "paramfetch::fetch",
        json_path = %json_path.display(),
        env_path = %env_path.display(),
        "Parameters saved"
    );

    Ok(FetchOutcome {
        parameters,
        json_path,
        env_path,
    })
}
