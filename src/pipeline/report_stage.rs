//! Report output stage.

use crate::config::DiffConfig;
use crate::diff::ModelDiff;
use crate::reports::{create_reporter_with_options, ReportConfig};
use anyhow::Result;

use super::{should_use_color, write_output, OutputTarget};

/// Render a diff report and write it to the configured destination.
pub fn output_report(config: &DiffConfig, diff: &ModelDiff) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let report_config = ReportConfig::for_paths(
        config.paths.before.to_string_lossy(),
        config.paths.after.to_string_lossy(),
    );

    // Color only makes sense on a terminal
    let use_color = should_use_color(config.output.no_color) && output_target.is_terminal();
    let reporter = create_reporter_with_options(config.output.format, use_color);
    let report = reporter.generate_diff_report(diff, &report_config)?;

    write_output(&report, &output_target, config.behavior.quiet)
}
