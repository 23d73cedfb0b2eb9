//! Summary report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ModelDiff, RefactoringType};

/// ANSI color codes, only applied when `colored` is set.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn kind_color(kind: RefactoringType) -> &'static str {
        use RefactoringType as T;
        match kind {
            T::ExtractInterface
            | T::ExtractSuperclass
            | T::ExtractClass
            | T::ExtractMethod
            | T::ExtractAndMoveMethod => "green",
            T::InlineMethod | T::RemoveParameter => "red",
            T::ChangeReturnType
            | T::ChangeParameterType
            | T::ChangeFieldType
            | T::ChangeMethodModifier
            | T::ChangeClassModifier => "yellow",
            _ => "cyan",
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(&self, diff: &ModelDiff, config: &ReportConfig) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        let title = config.title.as_deref().unwrap_or("Refactoring Summary");
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        if let (Some(before), Some(after)) = (&config.metadata.before_path, &config.metadata.after_path) {
            lines.push(format!("{}  {} → {}", self.color("Files:", "cyan"), before, after));
        }
        let summary = &diff.summary;
        lines.push(format!(
            "{}  {} matched, {} added, {} removed",
            self.color("Entities:", "cyan"),
            summary.matched,
            summary.added,
            summary.removed
        ));
        if summary.ambiguities > 0 {
            lines.push(format!(
                "{}  {}",
                self.color("Ambiguous:", "cyan"),
                plural(summary.ambiguities, "tie broken by order", "ties broken by order")
            ));
        }
        lines.push(String::new());

        if diff.refactorings.is_empty() {
            lines.push(format!("  {}", self.color("No refactorings detected", "dim")));
            return Ok(lines.join("\n"));
        }

        lines.push(self.color("Refactorings:", "bold"));
        for refactoring in &diff.refactorings {
            let kind = refactoring.refactoring_type;
            // Descriptions start with the display name; color that prefix only
            let rest = refactoring
                .description
                .strip_prefix(kind.display_name())
                .unwrap_or(&refactoring.description);
            lines.push(format!(
                "  {}{} {}",
                self.color(kind.display_name(), Self::kind_color(kind)),
                rest,
                self.color(&format!("({:.2})", refactoring.confidence), "dim")
            ));
        }

        lines.push(String::new());
        lines.push(self.color("Totals:", "bold"));
        for (kind, count) in &summary.by_type {
            lines.push(format!("  {:<28}{count:>4}", kind.display_name()));
        }
        lines.push(format!(
            "  {}",
            plural(summary.total_refactorings, "refactoring", "refactorings")
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
