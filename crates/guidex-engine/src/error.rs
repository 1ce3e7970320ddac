//! Error types for the Guidex exercise engine.
//!
//! The engine itself cannot fail at runtime: submissions and advances are
//! plain state transitions that either apply or are ignored. Every error in
//! this hierarchy describes an authoring defect in a supplied sequence,
//! caught when the sequence is loaded or validated.

use std::path::PathBuf;

/// A specialized `Result` type for Guidex engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while loading or validating an exercise sequence.
///
/// Variants carry the offending step or option identifier and include
/// actionable suggestions to help sequence authors resolve issues.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    // ========================================================================
    // Sequence File Errors
    // ========================================================================
    /// Sequence definition file was not found at the specified path.
    #[error("Sequence file not found: '{path}'\n\nSuggestion: Check the path or create the sequence definition file")]
    SequenceNotFound {
        /// Path where the sequence file was expected.
        path: PathBuf,
    },

    /// Invalid JSON syntax in a sequence definition file.
    #[error("Invalid JSON in sequence file '{path}': {message}\n\nSuggestion: Validate the file with a JSON linter")]
    SequenceParse {
        /// Path to the sequence definition file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    // ========================================================================
    // Sequence Validation Errors
    // ========================================================================
    /// Sequence contains no steps.
    #[error("Sequence contains no steps\n\nSuggestion: Add at least one exercise step to the sequence")]
    EmptySequence,

    /// Two steps in the sequence share the same identifier.
    #[error("Duplicate step id '{id}' in sequence\n\nSuggestion: Give every step a unique id")]
    DuplicateStepId {
        /// The repeated step identifier.
        id: String,
    },

    // ========================================================================
    // Step Validation Errors
    // ========================================================================
    /// A step has no answer options, so it can never be completed.
    #[error("Step '{step_id}' has no answer options\n\nSuggestion: Add at least one option and mark one as correct")]
    EmptyOptions {
        /// Identifier of the malformed step.
        step_id: String,
    },

    /// No option in the step is marked correct.
    #[error("Step '{step_id}' has no option marked correct\n\nSuggestion: Mark exactly one option with \"is_correct\": true")]
    NoCorrectOption {
        /// Identifier of the malformed step.
        step_id: String,
    },

    /// More than one option in the step is marked correct.
    #[error("Step '{step_id}' has {count} options marked correct\n\nSuggestion: Mark exactly one option with \"is_correct\": true")]
    MultipleCorrectOptions {
        /// Identifier of the malformed step.
        step_id: String,
        /// How many options were marked correct.
        count: usize,
    },

    /// Two options within a step share the same identifier.
    #[error("Step '{step_id}' has duplicate option id '{option_id}'\n\nSuggestion: Give every option a unique id within its step")]
    DuplicateOptionId {
        /// Identifier of the malformed step.
        step_id: String,
        /// The repeated option identifier.
        option_id: String,
    },

    /// Two options within a step display identical text, making a text-based
    /// selection ambiguous.
    #[error("Step '{step_id}' has two options with identical text '{text}'\n\nSuggestion: Make option texts distinct so selections are unambiguous")]
    DuplicateOptionText {
        /// Identifier of the malformed step.
        step_id: String,
        /// The repeated display text.
        text: String,
    },

    /// A legacy `correct_answer_text` field disagrees with the option marked
    /// correct.
    #[error("Step '{step_id}' declares correct_answer_text '{declared}' but the option marked correct reads differently\n\nSuggestion: Remove correct_answer_text or make it match the correct option's text")]
    CorrectAnswerMismatch {
        /// Identifier of the malformed step.
        step_id: String,
        /// The declared canonical answer text.
        declared: String,
    },

    // ========================================================================
    // General I/O Errors
    // ========================================================================
    /// General I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Creates a new `SequenceNotFound` error.
    #[must_use]
    pub fn sequence_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SequenceNotFound { path: path.into() }
    }

    /// Creates a new `SequenceParse` error with the given path and message.
    #[must_use]
    pub fn sequence_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SequenceParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `DuplicateStepId` error.
    #[must_use]
    pub fn duplicate_step_id(id: impl Into<String>) -> Self {
        Self::DuplicateStepId { id: id.into() }
    }

    /// Creates a new `EmptyOptions` error.
    #[must_use]
    pub fn empty_options(step_id: impl Into<String>) -> Self {
        Self::EmptyOptions {
            step_id: step_id.into(),
        }
    }

    /// Creates a new `NoCorrectOption` error.
    #[must_use]
    pub fn no_correct_option(step_id: impl Into<String>) -> Self {
        Self::NoCorrectOption {
            step_id: step_id.into(),
        }
    }

    /// Creates a new `MultipleCorrectOptions` error.
    #[must_use]
    pub fn multiple_correct_options(step_id: impl Into<String>, count: usize) -> Self {
        Self::MultipleCorrectOptions {
            step_id: step_id.into(),
            count,
        }
    }

    /// Creates a new `DuplicateOptionId` error.
    #[must_use]
    pub fn duplicate_option_id(step_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self::DuplicateOptionId {
            step_id: step_id.into(),
            option_id: option_id.into(),
        }
    }

    /// Creates a new `DuplicateOptionText` error.
    #[must_use]
    pub fn duplicate_option_text(step_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::DuplicateOptionText {
            step_id: step_id.into(),
            text: text.into(),
        }
    }

    /// Creates a new `CorrectAnswerMismatch` error.
    #[must_use]
    pub fn correct_answer_mismatch(
        step_id: impl Into<String>,
        declared: impl Into<String>,
    ) -> Self {
        Self::CorrectAnswerMismatch {
            step_id: step_id.into(),
            declared: declared.into(),
        }
    }

    /// Returns `true` if this error describes an authoring defect in the
    /// sequence content, as opposed to an I/O or parse failure.
    #[must_use]
    pub const fn is_authoring_defect(&self) -> bool {
        matches!(
            self,
            Self::EmptySequence
                | Self::DuplicateStepId { .. }
                | Self::EmptyOptions { .. }
                | Self::NoCorrectOption { .. }
                | Self::MultipleCorrectOptions { .. }
                | Self::DuplicateOptionId { .. }
                | Self::DuplicateOptionText { .. }
                | Self::CorrectAnswerMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = EngineError::sequence_not_found("/path/to/sequence.json");
        let msg = err.to_string();
        assert!(msg.contains("Sequence file not found"));
        assert!(msg.contains("/path/to/sequence.json"));
        assert!(msg.contains("Suggestion"));
    }

    #[test]
    fn test_multiple_correct_options_display() {
        let err = EngineError::multiple_correct_options("q1", 3);
        let msg = err.to_string();
        assert!(msg.contains("'q1'"));
        assert!(msg.contains("3 options"));
    }

    #[test]
    fn test_duplicate_option_text_display() {
        let err = EngineError::duplicate_option_text("q2", "180 degrees");
        let msg = err.to_string();
        assert!(msg.contains("'q2'"));
        assert!(msg.contains("'180 degrees'"));
        assert!(msg.contains("unambiguous"));
    }

    #[test]
    fn test_is_authoring_defect() {
        assert!(EngineError::EmptySequence.is_authoring_defect());
        assert!(EngineError::no_correct_option("q1").is_authoring_defect());
        assert!(EngineError::duplicate_step_id("q1").is_authoring_defect());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EngineError = io_err.into();
        assert!(!err.is_authoring_defect());

        let parse = EngineError::sequence_parse("seq.json", "expected value");
        assert!(!parse.is_authoring_defect());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let engine_err: EngineError = io_err.into();
        assert!(matches!(engine_err, EngineError::Io(_)));
    }
}
