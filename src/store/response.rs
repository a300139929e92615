//! Serde models for the `aws ssm get-parameters-by-path` JSON response.

use serde::Deserialize;

/// Top-level response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParametersResponse {
    #[serde(rename = "Parameters", default)]
    pub parameters: Vec<Parameter>,
}

/// One parameter entry. Unmodeled fields (`Type`, `Version`, `ARN`, ...)
/// are ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Full store name, e.g. `/shop/dev/DB_HOST`.
    #[serde(rename = "Name")]
    pub name: String,
    /// Decrypted value.
    #[serde(rename = "Value")]
    pub value: String,
}

impl Parameter {
    /// Last `/`-delimited segment of the full parameter name.
    pub fn key(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or("")
    }
}
