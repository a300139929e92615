use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures while discovering AWS CLI profiles. All of these are fatal:
/// the tool cannot proceed without a usable credential profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Could not run `aws configure list-profiles`: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },
    #[error("`aws configure list-profiles` exited abnormally (exit={exit_code:?}): {message}")]
    CommandFailed {
        exit_code: Option<i32>,
        message: String,
    },
    #[error("No AWS profiles found. Please configure at least one profile.")]
    NoProfiles,
}

/// Failures while reading input for an interactive menu.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("No options were provided to choose from")]
    NoOptions,
    #[error("Input closed before a valid selection was made")]
    InputClosed,
    #[error("Failed to read user input: {message}")]
    Read { message: String },
}

/// Failures during the parameter-store fetch stage. These are non-fatal:
/// the run ends without output files but the process exits normally.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Could not run `aws ssm get-parameters-by-path`: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },
    #[error("`aws ssm get-parameters-by-path` exited abnormally (exit={exit_code:?}): {message}")]
    CommandFailed {
        exit_code: Option<i32>,
        message: String,
    },
    #[error("Failed to parse parameter store response: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Errors occurring while listing directories or writing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O failed for file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize parameters to JSON: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}
