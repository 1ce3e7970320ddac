//! Guidex Session Reports
//!
//! This crate provides types and utilities for generating reports from a
//! finished guided exercise run. Reports can be serialized to JSON for
//! programmatic access or rendered to Markdown for human consumption.
//!
//! # Types
//!
//! - [`SessionReport`] - The complete report structure for one run
//! - [`SessionSummary`] - High-level summary of the run
//! - [`StepResult`] - The outcome of one answered step
//! - [`ReportInput`] / [`InteractionInput`] - Raw run data handed in by hosts
//!
//! # Generators
//!
//! - [`json::JsonGenerator`] - Generate JSON reports with compact or pretty formatting
//! - [`MarkdownGenerator`] - Generate human-readable Markdown reports
//!
//! # Example
//!
//! ```rust
//! use guidex_report::{SessionReport, SessionSummary, StepResult};
//! use guidex_report::json::JsonGenerator;
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
//! let generator = JsonGenerator::new(&report);
//! let json = generator.generate_pretty().unwrap();
//! assert!(json.contains("Rigid Transformations"));
//! ```

pub mod json;
mod markdown;

pub use markdown::MarkdownGenerator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to serialize the report to JSON.
    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to read or write report files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid report data.
    #[error("invalid report data: {0}")]
    InvalidData(String),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

// ============================================================================
// SessionReport
// ============================================================================

/// Complete report for one guided exercise run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionReport {
    /// Title of the exercise sequence that was run.
    pub sequence_title: String,

    /// Name of the concept the sequence teaches.
    pub concept_name: String,

    /// High-level summary of the run.
    pub summary: SessionSummary,

    /// Per-step results in presentation order.
    pub steps: Vec<StepResult>,
}

impl SessionReport {
    /// Creates a new report builder.
    #[must_use]
    pub fn builder() -> SessionReportBuilder {
        SessionReportBuilder::default()
    }

    /// Serializes the report to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Serialization` if JSON serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ReportError::from)
    }

    /// Returns the steps answered incorrectly, for review sections.
    #[must_use]
    pub fn missed_steps(&self) -> Vec<&StepResult> {
        self.steps.iter().filter(|s| !s.was_correct).collect()
    }
}

// ============================================================================
// SessionSummary
// ============================================================================

/// High-level summary of a guided exercise run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Total number of steps in the sequence.
    pub total_steps: usize,

    /// Number of steps answered correctly on the first try.
    pub correct_count: usize,

    /// Total duration of the run in seconds.
    pub duration_seconds: u64,
}

impl SessionSummary {
    /// Returns the score as a whole percentage, rounded down.
    ///
    /// An empty run scores zero.
    #[must_use]
    pub const fn accuracy_percent(&self) -> usize {
        if self.total_steps == 0 {
            0
        } else {
            self.correct_count * 100 / self.total_steps
        }
    }

    /// Returns `true` if every step was answered correctly.
    #[must_use]
    pub const fn is_perfect(&self) -> bool {
        self.total_steps > 0 && self.correct_count == self.total_steps
    }
}

// ============================================================================
// StepResult
// ============================================================================

/// The outcome of one answered step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Zero-based position of the step in the sequence.
    pub index: usize,

    /// The step's stable identifier.
    pub step_id: String,

    /// The prompt text, flattened for display.
    pub prompt: String,

    /// The text the user submitted.
    pub submitted_answer: String,

    /// The display text of the correct option.
    pub correct_answer: String,

    /// Whether the submission was correct.
    pub was_correct: bool,

    /// When the step was answered.
    pub answered_at: DateTime<Utc>,
}

// ============================================================================
// SessionReportBuilder
// ============================================================================

/// Builder for constructing [`SessionReport`] instances.
#[derive(Debug, Clone, Default)]
pub struct SessionReportBuilder {
    sequence_title: Option<String>,
    concept_name: Option<String>,
    summary: Option<SessionSummary>,
    steps: Vec<StepResult>,
}

impl SessionReportBuilder {
    /// Sets the sequence title.
    #[must_use]
    pub fn sequence_title(mut self, title: impl Into<String>) -> Self {
        self.sequence_title = Some(title.into());
        self
    }

    /// Sets the concept name.
    #[must_use]
    pub fn concept_name(mut self, name: impl Into<String>) -> Self {
        self.concept_name = Some(name.into());
        self
    }

    /// Sets the run summary.
    #[must_use]
    pub fn summary(mut self, summary: SessionSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Adds a step result.
    #[must_use]
    pub fn step(mut self, step: StepResult) -> Self {
        self.steps.push(step);
        self
    }

    /// Sets all step results at once.
    #[must_use]
    pub fn steps(mut self, steps: Vec<StepResult>) -> Self {
        self.steps = steps;
        self
    }

    /// Builds the report.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidData` if required fields are missing.
    pub fn build(self) -> Result<SessionReport> {
        let sequence_title = self
            .sequence_title
            .ok_or_else(|| ReportError::InvalidData("sequence_title is required".to_string()))?;

        let summary = self
            .summary
            .ok_or_else(|| ReportError::InvalidData("summary is required".to_string()))?;

        Ok(SessionReport {
            sequence_title,
            concept_name: self.concept_name.unwrap_or_default(),
            summary,
            steps: self.steps,
        })
    }
}

// ============================================================================
// ReportInput
// ============================================================================

/// One recorded answer submission, as handed in by the host.
///
/// These are deliberately local types rather than the engine's event types,
/// so this crate has no cross-crate dependency; hosts convert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionInput {
    /// Zero-based position of the answered step.
    pub step_index: usize,

    /// The step's stable identifier.
    pub step_id: String,

    /// The prompt text of the answered step.
    pub prompt: String,

    /// The text the user submitted.
    pub answer_text: String,

    /// The display text of the correct option.
    pub correct_answer: String,

    /// Whether the submission was correct.
    pub is_correct: bool,

    /// When the submission was judged.
    pub timestamp: DateTime<Utc>,
}

/// Raw data for one finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    /// Title of the exercise sequence.
    pub sequence_title: String,

    /// Name of the concept the sequence teaches.
    pub concept_name: String,

    /// Total number of steps in the sequence.
    pub total_steps: usize,

    /// Number of first-try correct answers.
    pub correct_count: usize,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run finished.
    pub ended_at: DateTime<Utc>,

    /// All recorded submissions, in emission order.
    pub interactions: Vec<InteractionInput>,
}

// ============================================================================
// ReportGenerator
// ============================================================================

/// Builds a [`SessionReport`] from raw run data.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    input: ReportInput,
}

impl ReportGenerator {
    /// Creates a generator for the given run data.
    #[must_use]
    pub const fn new(input: ReportInput) -> Self {
        Self { input }
    }

    /// Generates the session report.
    #[must_use]
    pub fn generate(&self) -> SessionReport {
        let duration = self.input.ended_at - self.input.started_at;
        let duration_seconds = u64::try_from(duration.num_seconds()).unwrap_or(0);

        let steps = self
            .input
            .interactions
            .iter()
            .map(|i| StepResult {
                index: i.step_index,
                step_id: i.step_id.clone(),
                prompt: i.prompt.clone(),
                submitted_answer: i.answer_text.clone(),
                correct_answer: i.correct_answer.clone(),
                was_correct: i.is_correct,
                answered_at: i.timestamp,
            })
            .collect();

        SessionReport {
            sequence_title: self.input.sequence_title.clone(),
            concept_name: self.input.concept_name.clone(),
            summary: SessionSummary {
                total_steps: self.input.total_steps,
                correct_count: self.input.correct_count,
                duration_seconds,
            },
            steps,
        }
    }
}
