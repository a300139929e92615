//! Parameter-store access: the narrow CLI interface and the fetch stage.

pub mod client;
pub mod fetch;
pub mod response;

pub use client::{AwsCliStore, ParameterStore};
pub use fetch::{fetch_and_write, parameter_path_prefix, FetchOutcome};
pub use response::{Parameter, ParametersResponse};
