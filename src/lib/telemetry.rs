//! Telemetry initialization and fetch job span helpers.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` with a per-run log file mirrored to the console.
///
/// Creates `logs_dir` if absent and opens a fresh log file named after the
/// start timestamp (second resolution). Returns the log file path so the
/// caller can tell the user where logs are stored.
pub fn init_tracing(logs_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create log directory {}", logs_dir.display()))?;
    let log_path = logs_dir.join(format!(
        "paramfetch_{}.log",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    ));

    if tracing::dispatcher::has_been_set() {
        return Ok(log_path);
    }

    let log_file = fs::File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path.display()))?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))?;

    Ok(log_path)
}

/// Span helper to record start and finish of a parameter fetch job.
pub struct FetchSpan {
    span: Span,
    started_at: Instant,
    job_id: Uuid,
}

impl FetchSpan {
    /// Start a fetch span for a path prefix.
    pub fn start(job_id: Uuid, path_prefix: &str) -> Self {
        let span = info_span!(
            target: "paramfetch::fetch",
            "parameter_fetch",
            %job_id,
            path_prefix = %path_prefix
        );
        Self {
            span,
            started_at: Instant::now(),
            job_id,
        }
    }

    /// Close the span while recording status and parameter count.
    pub fn finish(self, status: &'static str, parameter_count: usize) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "paramfetch::fetch",
            job_id = %self.job_id,
            status = status,
            parameter_count = parameter_count,
            elapsed_ms = elapsed_ms,
            "Completed parameter fetch"
        );
    }
}
