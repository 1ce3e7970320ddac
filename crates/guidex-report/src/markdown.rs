//! Markdown report generation for Guidex sessions.
//!
//! This module provides the [`MarkdownGenerator`] struct for converting a
//! [`SessionReport`] into a human-readable Markdown document. The generated
//! report includes:
//!
//! - A summary table with score and duration
//! - A per-step results table
//! - A review section listing missed steps
//!
//! # Example
//!
//! ```rust
//! use guidex_report::{MarkdownGenerator, SessionReport, SessionSummary};
//!
//! let report = SessionReport {
//!     sequence_title: "Rigid Transformations".to_string(),
//!     concept_name: "Rotations".to_string(),
//!     summary: SessionSummary {
//!         total_steps: 3,
//!         correct_count: 2,
//!         duration_seconds: 95,
//!     },
//!     steps: vec![],
//! };
//!
//! let generator = MarkdownGenerator::new(&report);
//! let markdown = generator.generate();
//! assert!(markdown.contains("# Guidex Session Report"));
//! ```

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::{SessionReport, StepResult};

/// Generates Markdown reports from finished exercise sessions.
///
/// The generator takes a reference to a [`SessionReport`] and produces a
/// formatted Markdown string suitable for human review.
pub struct MarkdownGenerator<'a> {
    report: &'a SessionReport,
}

impl<'a> MarkdownGenerator<'a> {
    /// Creates a new Markdown generator for the given report.
    #[must_use]
    pub const fn new(report: &'a SessionReport) -> Self {
        Self { report }
    }

    /// Generates the complete Markdown report.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        self.write_title(&mut output);
        self.write_summary(&mut output);
        self.write_steps(&mut output);
        self.write_review(&mut output);
        Self::write_footer(&mut output);

        output
    }

    /// Writes the report title.
    fn write_title(&self, output: &mut String) {
        let _ = writeln!(
            output,
            "# Guidex Session Report: {}\n",
            escape_markdown(&self.report.sequence_title)
        );
    }

    /// Writes the summary section with a metrics table.
    fn write_summary(&self, output: &mut String) {
        let summary = &self.report.summary;

        let _ = writeln!(output, "## Summary\n");
        let _ = writeln!(output, "| Metric | Value |");
        let _ = writeln!(output, "|--------|-------|");
        let _ = writeln!(
            output,
            "| Concept | {} |",
            escape_markdown(&self.report.concept_name)
        );
        let _ = writeln!(output, "| Steps | {} |", summary.total_steps);
        let _ = writeln!(
            output,
            "| Correct | {} ({}%) |",
            summary.correct_count,
            summary.accuracy_percent()
        );
        let _ = writeln!(
            output,
            "| Duration | {} |",
            format_duration(summary.duration_seconds)
        );
        let _ = writeln!(output);
    }

    /// Writes the per-step results table.
    fn write_steps(&self, output: &mut String) {
        let _ = writeln!(output, "## Step Results\n");

        if self.report.steps.is_empty() {
            let _ = writeln!(output, "No steps were answered.\n");
            return;
        }

        let _ = writeln!(output, "| # | Prompt | Your Answer | Correct Answer | Result |");
        let _ = writeln!(output, "|---|--------|-------------|----------------|--------|");
        for step in &self.report.steps {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                step.index + 1,
                escape_markdown(&step.prompt),
                escape_markdown(&step.submitted_answer),
                escape_markdown(&step.correct_answer),
                result_label(step)
            );
        }
        let _ = writeln!(output);
    }

    /// Writes the review section listing missed steps, if any.
    fn write_review(&self, output: &mut String) {
        let missed = self.report.missed_steps();
        if missed.is_empty() {
            if !self.report.steps.is_empty() {
                let _ = writeln!(output, "Every step was answered correctly. Nice work!\n");
            }
            return;
        }

        let _ = writeln!(output, "## Steps to Review\n");
        for step in missed {
            let _ = writeln!(
                output,
                "- **Step {}** ({}): you answered \"{}\", the correct answer was \"{}\"",
                step.index + 1,
                escape_markdown(&step.step_id),
                escape_markdown(&step.submitted_answer),
                escape_markdown(&step.correct_answer)
            );
        }
        let _ = writeln!(output);
    }

    /// Writes the footer with the generation timestamp.
    fn write_footer(output: &mut String) {
        let _ = writeln!(output, "---");
        let timestamp = format_timestamp(&Utc::now());
        let _ = writeln!(output, "*Generated by Guidex at {timestamp}*");
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Returns the display label for a step result cell.
const fn result_label(step: &StepResult) -> &'static str {
    if step.was_correct {
        "correct"
    } else {
        "incorrect"
    }
}

/// Formats a duration in seconds to a human-readable string.
fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();

    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{secs}s"));
    }

    parts.join(" ")
}

/// Formats a timestamp to a human-readable string.
///
/// Format: "YYYY-MM-DD HH:MM:SS UTC"
fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Escapes Markdown special characters in user-supplied text.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '*' | '_' | '`' | '#' | '[' | ']' | '(' | ')' | '!' | '\\' | '<' | '>' | '|' => {
                result.push('\\');
                result.push(ch);
            }
            '\n' => {
                // Replace newlines with <br> for table cells
                result.push_str("<br>");
            }
            _ => result.push(ch),
        }
    }

    result
}
