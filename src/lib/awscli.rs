//! Shared helpers for building `aws` CLI commands.

use std::path::Path;

use tokio::process::Command;

/// Invocation context shared by every `aws` call.
pub struct AwsCommandConfig<'a> {
    pub aws_binary: &'a Path,
    /// Credential profile, passed as `--profile` when present.
    pub profile: Option<&'a str>,
    /// Region override, passed as `--region` when present.
    pub region: Option<&'a str>,
}

/// Build an `aws configure list-profiles` command.
pub fn build_list_profiles_command(config: &AwsCommandConfig<'_>) -> Command {
    let mut command = Command::new(config.aws_binary);
    command.kill_on_drop(true);
    command.arg("configure").arg("list-profiles");
    command
}

/// Build an `aws ssm get-parameters-by-path` command for a path prefix,
/// with recursive traversal and decryption enabled.
pub fn build_get_parameters_by_path_command(
    config: &AwsCommandConfig<'_>,
    path_prefix: &str,
) -> Command {
    let mut command = Command::new(config.aws_binary);
    command.kill_on_drop(true);
    command.arg("ssm").arg("get-parameters-by-path");
    command.arg("--path").arg(path_prefix);
    command.arg("--recursive");
    command.arg("--with-decryption");
    command.arg("--output").arg("json");

    if let Some(profile) = config.profile {
        command.arg("--profile").arg(profile);
    }
    if let Some(region) = config.region {
        command.arg("--region").arg(region);
    }

    command
}

/// Merge stdout/stderr and take at most `limit` characters from the end.
pub fn collect_output_excerpt(stdout: &[u8], stderr: &[u8], limit: usize) -> String {
    let mut combined = Vec::with_capacity(stdout.len() + stderr.len());
    combined.extend_from_slice(stdout);
    combined.extend_from_slice(stderr);
    let text = String::from_utf8_lossy(&combined);
    if text.chars().count() <= limit {
        return text.to_string();
    }
    text.chars()
        .rev()
        .take(limit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect()
}
