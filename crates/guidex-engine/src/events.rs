//! Interaction events and event sinks.
//!
//! The engine emits exactly one [`InteractionEvent`] per accepted answer
//! submission and one [`SequenceOutcome`] when the sequence finishes, both
//! delivered synchronously to a caller-supplied [`EventSink`]. Delivery is
//! fire-and-forget: the engine never retains, batches, replays, or retries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sequence::{ConceptTags, ExerciseStep};

// ============================================================================
// InteractionEvent
// ============================================================================

/// Normalized question payload carried in every interaction event.
///
/// Downstream analytics consume display strings, so content variants are
/// flattened to their raw text here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPayload {
    /// The prompt text of the answered step.
    pub prompt: String,

    /// The display texts of all options, in presentation order.
    pub options: Vec<String>,
}

impl QuestionPayload {
    /// Builds the payload from an exercise step.
    #[must_use]
    pub fn from_step(step: &ExerciseStep) -> Self {
        Self {
            prompt: step.prompt.as_str().to_string(),
            options: step
                .options
                .iter()
                .map(|o| o.text.as_str().to_string())
                .collect(),
        }
    }
}

/// A structured record describing one answer submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Synthetic identifier derived from step position, step id, and a
    /// millisecond timestamp so repeated attempts stay distinguishable.
    pub interaction_id: String,

    /// The text the user submitted.
    pub answer_text: String,

    /// Whether the submission selected the correct option.
    pub is_correct: bool,

    /// When the submission was judged.
    pub timestamp: DateTime<Utc>,

    /// Concept metadata copied from the sequence configuration.
    pub concept: ConceptTags,

    /// Normalized question payload for downstream analytics.
    pub question: QuestionPayload,
}

impl InteractionEvent {
    /// Creates an event for a judged submission with the current timestamp.
    #[must_use]
    pub fn new(
        step_index: usize,
        step: &ExerciseStep,
        answer_text: impl Into<String>,
        is_correct: bool,
        concept: &ConceptTags,
    ) -> Self {
        let timestamp = Utc::now();
        Self {
            interaction_id: format!(
                "step{}-{}-{}",
                step_index,
                step.id,
                timestamp.timestamp_millis()
            ),
            answer_text: answer_text.into(),
            is_correct,
            timestamp,
            concept: concept.clone(),
            question: QuestionPayload::from_step(step),
        }
    }
}

// ============================================================================
// SequenceOutcome
// ============================================================================

/// Final score tuple handed to the sink exactly once, on the advance that
/// leaves the last step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceOutcome {
    /// Total number of steps in the sequence.
    pub total_steps: usize,

    /// Number of steps whose first-submitted answer was correct.
    pub correct_count: usize,

    /// When the engine was constructed.
    pub started_at: DateTime<Utc>,

    /// When the final advance happened.
    pub completed_at: DateTime<Utc>,
}

impl SequenceOutcome {
    /// Creates an outcome completed at the current time.
    #[must_use]
    pub fn new(total_steps: usize, correct_count: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            total_steps,
            correct_count,
            started_at,
            completed_at: Utc::now(),
        }
    }

    /// Returns `true` if every step was answered correctly on the first try.
    #[must_use]
    pub const fn is_perfect(&self) -> bool {
        self.correct_count == self.total_steps
    }

    /// Returns the run duration.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}

// ============================================================================
// EventSink
// ============================================================================

/// Receiver for engine emissions.
///
/// Implementations must not assume more than at-most-once delivery per
/// accepted submission; ignored submissions (locked step, finished engine)
/// produce no call at all.
pub trait EventSink {
    /// Called synchronously for every accepted answer submission.
    fn record_interaction(&mut self, event: InteractionEvent);

    /// Called exactly once, when the sequence finishes.
    fn record_completion(&mut self, outcome: SequenceOutcome);
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record_interaction(&mut self, _event: InteractionEvent) {}

    fn record_completion(&mut self, _outcome: SequenceOutcome) {}
}

/// A sink that accumulates everything in memory.
///
/// Used by hosts that aggregate events after the run (report generation)
/// and by tests asserting emission cardinality.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<InteractionEvent>,
    outcome: Option<SequenceOutcome>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded interaction events in emission order.
    #[must_use]
    pub fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    /// Returns the recorded completion outcome, if the sequence finished.
    #[must_use]
    pub const fn outcome(&self) -> Option<&SequenceOutcome> {
        self.outcome.as_ref()
    }
}

impl EventSink for RecordingSink {
    fn record_interaction(&mut self, event: InteractionEvent) {
        self.events.push(event);
    }

    fn record_completion(&mut self, outcome: SequenceOutcome) {
        self.outcome = Some(outcome);
    }
}
