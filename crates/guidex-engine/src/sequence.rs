//! Exercise sequence definitions for the Guidex engine.
//!
//! This module defines the authoring-side data model: answer options, steps,
//! concept tags, and the sequence-level display configuration. Validation
//! happens here, at construction time, so that an engine never runs against
//! an ambiguous or unanswerable step.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::content::{Content, NotationMode};
use crate::error::{EngineError, Result};

/// Default for boolean options that default to true.
const fn default_true() -> bool {
    true
}

// ============================================================================
// AnswerOption
// ============================================================================

/// One selectable answer within an exercise step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Stable identifier, unique within its step.
    pub id: String,

    /// Display text for this option.
    pub text: Content,

    /// Whether this option is the designated correct answer.
    /// Exactly one option per step must set this.
    #[serde(default)]
    pub is_correct: bool,
}

impl AnswerOption {
    /// Creates a plain-text option.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: Content::detect(text),
            is_correct,
        }
    }
}

// ============================================================================
// ExerciseStep
// ============================================================================

/// One question/prompt in a guided sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseStep {
    /// Stable identifier, unique within a sequence.
    pub id: String,

    /// The question or prompt presented to the user.
    pub prompt: Content,

    /// Ordered, non-empty list of answer options.
    pub options: Vec<AnswerOption>,

    /// Legacy canonical-answer field. When present it must equal the display
    /// text of the option marked correct; validation rejects any mismatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer_text: Option<String>,

    /// Explanation shown after the step is answered.
    pub explanation: Content,

    /// Optional hint describing what the next step will ask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_hint: Option<String>,
}

impl ExerciseStep {
    /// Returns the option marked correct, if the step is well formed.
    ///
    /// Validated sequences always have exactly one such option.
    #[must_use]
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.is_correct)
    }

    /// Returns the display text of the correct option.
    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_option().map(|o| o.text.as_str())
    }

    /// Returns `true` if the submitted text selects the correct option.
    ///
    /// An unmatched or empty string is simply incorrect; there is nothing to
    /// validate because any string that names no option cannot be correct.
    #[must_use]
    pub fn is_correct_answer(&self, answer_text: &str) -> bool {
        self.correct_answer() == Some(answer_text)
    }

    /// Returns the option whose display text matches the submitted text.
    #[must_use]
    pub fn option_by_text(&self, answer_text: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.text.as_str() == answer_text)
    }

    /// Validates this step's authoring preconditions.
    ///
    /// # Errors
    ///
    /// Returns an authoring-defect error when the step has no options,
    /// duplicate option ids or texts, zero or multiple options marked
    /// correct, or a `correct_answer_text` that disagrees with the option
    /// marked correct.
    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(EngineError::empty_options(&self.id));
        }

        let mut seen_ids = HashSet::new();
        let mut seen_texts = HashSet::new();
        for option in &self.options {
            if !seen_ids.insert(option.id.as_str()) {
                return Err(EngineError::duplicate_option_id(&self.id, &option.id));
            }
            if !seen_texts.insert(option.text.as_str()) {
                return Err(EngineError::duplicate_option_text(
                    &self.id,
                    option.text.as_str(),
                ));
            }
        }

        let correct_count = self.options.iter().filter(|o| o.is_correct).count();
        if correct_count == 0 {
            return Err(EngineError::no_correct_option(&self.id));
        }
        if correct_count > 1 {
            return Err(EngineError::multiple_correct_options(
                &self.id,
                correct_count,
            ));
        }

        if let Some(declared) = &self.correct_answer_text {
            if self.correct_answer() != Some(declared.as_str()) {
                return Err(EngineError::correct_answer_mismatch(&self.id, declared));
            }
        }

        Ok(())
    }
}

// ============================================================================
// ConceptTags
// ============================================================================

/// Concept-tagging metadata copied into every emitted interaction event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConceptTags {
    /// Stable concept identifier (e.g., "product-rule").
    pub id: String,

    /// Human-readable concept name.
    pub name: String,

    /// Optional longer description of the concept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ConceptTags {
    /// Creates concept tags with an id and name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Display mode passed down explicitly through configuration.
///
/// Hosts receive the theme as data alongside the sequence rather than
/// reading an ambient application-level flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light display mode (default).
    #[default]
    Light,
    /// Dark display mode.
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

// ============================================================================
// ExerciseSequence
// ============================================================================

/// An ordered list of exercise steps plus display configuration.
///
/// Sequences are immutable input to the engine: construct (or load) one,
/// validate it, and hand it to an engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSequence {
    /// Sequence title shown by hosts.
    pub title: String,

    /// Concept metadata for event tagging.
    #[serde(default)]
    pub concept: ConceptTags,

    /// Whether hosts should render a progress indicator.
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Explicit display mode for rendering surfaces.
    #[serde(default)]
    pub theme: Theme,

    /// How content strings are prepared for display.
    #[serde(default)]
    pub notation: NotationMode,

    /// The ordered exercise steps.
    pub steps: Vec<ExerciseStep>,
}

impl ExerciseSequence {
    /// Loads and validates a sequence from a JSON definition file.
    ///
    /// Untagged content strings are classified with the notation heuristic
    /// during parsing; when the file selects [`NotationMode::Plain`], all
    /// notation is demoted to literal text afterwards.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::SequenceNotFound` if the file doesn't exist,
    /// `EngineError::SequenceParse` for invalid JSON, or any validation
    /// error from [`ExerciseSequence::validate`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EngineError::sequence_not_found(path)
            } else {
                EngineError::Io(e)
            }
        })?;

        let mut sequence: Self = serde_json::from_str(&contents)
            .map_err(|e| EngineError::sequence_parse(path, e.to_string()))?;
        sequence.apply_notation_mode();
        sequence.validate()?;
        Ok(sequence)
    }

    /// Validates the sequence and all of its steps.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptySequence` for a sequence with no steps,
    /// `EngineError::DuplicateStepId` for repeated step ids, or any step
    /// validation error from [`ExerciseStep::validate`].
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(EngineError::EmptySequence);
        }

        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.id.as_str()) {
                return Err(EngineError::duplicate_step_id(&step.id));
            }
            step.validate()?;
        }

        Ok(())
    }

    /// Returns the number of steps in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the sequence has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Demotes all notation content to plain text when the sequence selects
    /// [`NotationMode::Plain`]. No-op under [`NotationMode::Auto`].
    fn apply_notation_mode(&mut self) {
        if self.notation.renders_notation() {
            return;
        }
        for step in &mut self.steps {
            step.prompt.make_plain();
            step.explanation.make_plain();
            for option in &mut step.options {
                option.text.make_plain();
            }
        }
    }
}
