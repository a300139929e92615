//! Narrow interface over the external parameter-store CLI.

use std::path::PathBuf;

use tracing::info;

use crate::lib::{
    awscli,
    errors::{FetchError, ProfileError},
};

use super::response::ParametersResponse;

const OUTPUT_EXCERPT_LIMIT: usize = 2_000;

/// The two operations this tool needs from the external CLI. A test double
/// can substitute canned responses without spawning any process.
#[allow(async_fn_in_trait)]
pub trait ParameterStore {
    /// List configured credential profile names.
    async fn list_profiles(&self) -> Result<Vec<String>, ProfileError>;

    /// Fetch decrypted parameters below `path_prefix`, recursively, using
    /// the given credential profile.
    async fn get_parameters_by_path(
        &self,
        profile: &str,
        path_prefix: &str,
    ) -> Result<ParametersResponse, FetchError>;
}

/// Parameter store backed by the `aws` CLI. The selected profile is passed
/// explicitly on every call rather than exported into the process
/// environment.
#[derive(Debug, Clone)]
pub struct AwsCliStore {
    aws_binary: PathBuf,
    region: Option<String>,
}

impl AwsCliStore {
    pub fn new(aws_binary: PathBuf, region: Option<String>) -> Self {
        Self { aws_binary, region }
    }

    fn command_config<'a>(&'a self, profile: Option<&'a str>) -> awscli::AwsCommandConfig<'a> {
        awscli::AwsCommandConfig {
            aws_binary: &self.aws_binary,
            profile,
            region: self.region.as_deref(),
        }
    }
}

impl ParameterStore for AwsCliStore {
    async fn list_profiles(&self) -> Result<Vec<String>, ProfileError> {
        let mut command = awscli::build_list_profiles_command(&self.command_config(None));
        let output = command
            .output()
            .await
            .map_err(|err| ProfileError::Spawn { source: err })?;

        if !output.status.success() {
            return Err(ProfileError::CommandFailed {
                exit_code: output.status.code(),
                message: awscli::collect_output_excerpt(
                    &output.stdout,
                    &output.stderr,
                    OUTPUT_EXCERPT_LIMIT,
                ),
            });
        }

        let profiles: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        info!(profile_count = profiles.len(), "Listed AWS CLI profiles");
        Ok(profiles)
    }

    async fn get_parameters_by_path(
        &self,
        profile: &str,
        path_prefix: &str,
    ) -> Result<ParametersResponse, FetchError> {
        let mut command = awscli::build_get_parameters_by_path_command(
            &self.command_config(Some(profile)),
            path_prefix,
        );

        info!(
            target: "paramfetch::fetch",
            profile = %profile,
            path_prefix = %path_prefix,
            "Fetching parameters from the store"
        );

        let output = command
            .output()
            .await
            .map_err(|err| FetchError::Spawn { source: err })?;

        if !output.status.success() {
            return Err(FetchError::CommandFailed {
                exit_code: output.status.code(),
                message: awscli::collect_output_excerpt(
                    &output.stdout,
                    &output.stderr,
                    OUTPUT_EXCERPT_LIMIT,
                ),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|err| FetchError::Parse { source: err })
    }
}
