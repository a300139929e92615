//! Directory listing and output-file helpers.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;

use crate::lib::errors::OutputError;

/// JSON output file name, created under the selected environment directory.
pub const JSON_OUTPUT_FILE: &str = "fetched_parameters.json";
/// Env-format output file name, created next to the JSON one.
pub const ENV_OUTPUT_FILE: &str = "fetched_parameters.env";

/// Names of the immediate subdirectories of `path`, sorted. Files are
/// skipped; the listing is non-recursive.
pub fn list_subdirectories(path: &Path) -> Result<Vec<String>, OutputError> {
    let entries = fs::read_dir(path).map_err(|err| OutputError::ReadDir {
        path: path.to_path_buf(),
        source: err,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| OutputError::ReadDir {
            path: path.to_path_buf(),
            source: err,
        })?;
        let file_type = entry.file_type().map_err(|err| OutputError::Io {
            path: entry.path(),
            source: err,
        })?;
        if file_type.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}

/// Write the fetched parameters as pretty JSON and as `key=value` lines,
/// overwriting any prior content. Returns the two output paths.
pub fn write_parameter_files(
    target_dir: &Path,
    parameters: &IndexMap<String, String>,
) -> Result<(PathBuf, PathBuf), OutputError> {
    let json_path = target_dir.join(JSON_OUTPUT_FILE);
    let env_path = target_dir.join(ENV_OUTPUT_FILE);

    let json =
        serde_json::to_string_pretty(parameters).map_err(|err| OutputError::Serialize {
            source: err,
        })?;
    fs::write(&json_path, json).map_err(|err| OutputError::Io {
        path: json_path.clone(),
        source: err,
    })?;

    let mut env_lines = String::new();
    for (key, value) in parameters {
        // `write!` into a String cannot fail.
        let _ = writeln!(env_lines, "{key}={value}");
    }
    fs::write(&env_path, env_lines).map_err(|err| OutputError::Io {
        path: env_path.clone(),
        source: err,
    })?;

    Ok((json_path, env_path))
}
