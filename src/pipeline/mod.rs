//! Pipeline orchestration for refactoring detection.
//!
//! Shared load → diff → report logic used by the CLI command handlers.

mod diff_stage;
mod load;
mod output;
mod report_stage;

pub use diff_stage::compute_diff;
pub use load::{load_hints, load_snapshot};
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::output_report;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or convert a snapshot or hints file
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// Diff computation failed
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success: nothing reported, or no failure mode requested
    pub const SUCCESS: i32 = 0;
    /// Refactorings were reported with `--fail-on-refactoring`
    pub const REFACTORINGS_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
