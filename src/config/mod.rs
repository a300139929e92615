//! Load and validate tool configuration.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::error;

use crate::lib::errors::ConfigError;

pub const DEFAULT_ENVIRONMENTS_DIR: &str = "environments";
pub const DEFAULT_LOGS_DIR: &str = "logs";
pub const DEFAULT_AWS_BINARY: &str = "aws";

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub paths: PathsSection,
    pub aws: AwsSection,
}

/// Filesystem locations consumed and produced by the tool.
#[derive(Debug, Clone)]
pub struct PathsSection {
    /// Base directory holding one subdirectory per project.
    pub environments_dir: PathBuf,
    /// Directory receiving one log file per run.
    pub logs_dir: PathBuf,
}

/// External `aws` CLI settings.
#[derive(Debug, Clone)]
pub struct AwsSection {
    pub binary: PathBuf,
    /// Optional region override; when unset the ambient AWS config wins.
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAppConfig {
    paths: Option<RawPathsSection>,
    aws: Option<RawAwsSection>,
}

#[derive(Debug, Deserialize)]
pub struct RawPathsSection {
    pub environments_dir: Option<PathBuf>,
    pub logs_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct RawAwsSection {
    pub binary: Option<PathBuf>,
    pub region: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: PathsSection {
                environments_dir: PathBuf::from(DEFAULT_ENVIRONMENTS_DIR),
                logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            },
            aws: AwsSection {
                binary: PathBuf::from(DEFAULT_AWS_BINARY),
                region: None,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`. A missing file yields full defaults
    /// so the tool can run in a bare checkout; a malformed file is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_path(path.to_path_buf())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "paramfetch::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawAppConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "paramfetch::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, &path).map_err(|err| {
            error!(
                target: "paramfetch::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        Ok(config)
    }

    fn from_raw(raw: RawAppConfig, path: &Path) -> Result<Self, ConfigError> {
        let paths = parse_paths_section(raw.paths, path)?;
        let aws = parse_aws_section(raw.aws, path)?;
        Ok(Self { paths, aws })
    }
}

fn parse_paths_section(
    raw: Option<RawPathsSection>,
    path: &Path,
) -> Result<PathsSection, ConfigError> {
    let raw = raw.unwrap_or(RawPathsSection {
        environments_dir: None,
        logs_dir: None,
    });

    let environments_dir = raw
        .environments_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ENVIRONMENTS_DIR));
    validate_nonempty_path(path, "paths.environments_dir", &environments_dir)?;

    let logs_dir = raw
        .logs_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGS_DIR));
    validate_nonempty_path(path, "paths.logs_dir", &logs_dir)?;

    Ok(PathsSection {
        environments_dir,
        logs_dir,
    })
}

fn parse_aws_section(raw: Option<RawAwsSection>, path: &Path) -> Result<AwsSection, ConfigError> {
    let raw = raw.unwrap_or(RawAwsSection {
        binary: None,
        region: None,
    });

    let binary = raw.binary.unwrap_or_else(|| PathBuf::from(DEFAULT_AWS_BINARY));
    validate_nonempty_path(path, "aws.binary", &binary)?;

    let region = match raw.region {
        Some(region) if region.trim().is_empty() => {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "aws.region",
                message: "must not be blank".to_string(),
            });
        }
        other => other,
    };

    Ok(AwsSection { binary, region })
}

fn validate_nonempty_path(
    config_path: &Path,
    field: &'static str,
    value: &Path,
) -> Result<(), ConfigError> {
    if value.as_os_str().is_empty() {
        return Err(ConfigError::InvalidField {
            path: config_path.to_path_buf(),
            field,
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}
