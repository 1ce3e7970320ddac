//! JSON report generation for Guidex sessions.
//!
//! This module provides [`JsonGenerator`] for serializing session reports to
//! JSON. Reports can be generated as compact single-line JSON or
//! pretty-printed for human readability.
//!
//! # Example
//!
//! ```rust
//! use guidex_report::{SessionReport, SessionSummary};
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
//! let compact = generator.generate().unwrap();
//! let pretty = generator.generate_pretty().unwrap();
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::{ReportError, Result, SessionReport};

/// JSON session report generator.
///
/// Wraps a [`SessionReport`] reference and provides methods for serializing
/// it to JSON in various formats.
pub struct JsonGenerator<'a> {
    report: &'a SessionReport,
}

impl<'a> JsonGenerator<'a> {
    /// Creates a new JSON generator for the given report.
    #[must_use]
    pub const fn new(report: &'a SessionReport) -> Self {
        Self { report }
    }

    /// Generates compact JSON output (single line, no extra whitespace).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialization`] if JSON serialization fails.
    pub fn generate(&self) -> Result<String> {
        serde_json::to_string(self.report).map_err(ReportError::from)
    }

    /// Generates pretty-printed JSON output with indentation.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialization`] if JSON serialization fails.
    pub fn generate_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self.report).map_err(ReportError::from)
    }

    /// Writes the JSON report directly to a file.
    ///
    /// Creates or overwrites the file at the specified path. Parent
    /// directories must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialization`] if JSON serialization fails.
    /// Returns [`ReportError::Io`] if file creation or writing fails.
    pub fn write_to_file(&self, path: &Path, pretty: bool) -> Result<()> {
        let json = if pretty {
            self.generate_pretty()?
        } else {
            self.generate()?
        };

        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}
