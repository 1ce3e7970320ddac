//! The guided exercise stepper.
//!
//! [`ExerciseEngine`] presents one step at a time, judges submissions,
//! tracks per-step completion and score, and emits interaction events to a
//! caller-supplied sink. All transitions are synchronous; operations in the
//! wrong phase are ignored rather than erroring, because the only inputs the
//! engine receives are discrete user selections.
//!
//! The phase diagram:
//!
//! - `AwaitingAnswer(i)` --submit--> `ShowingFeedback(i)`
//! - `ShowingFeedback(i)` --advance--> `AwaitingAnswer(i+1)` or `Finished`
//! - `Finished` is terminal; a fresh engine is required to restart.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::events::{EventSink, InteractionEvent, NullSink, SequenceOutcome};
use crate::sequence::{ExerciseSequence, ExerciseStep};

// ============================================================================
// Phase
// ============================================================================

/// Phase of the stepper with respect to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user to submit an answer to the current step.
    AwaitingAnswer,
    /// Feedback for the current step is showing; the answer is locked.
    ShowingFeedback,
    /// The user has advanced past the final step.
    Finished,
}

impl Phase {
    /// Returns `true` if this phase is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

// ============================================================================
// Operation outcomes
// ============================================================================

/// What a [`ExerciseEngine::submit_answer`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission was judged and feedback is now showing.
    Judged {
        /// Whether the submission selected the correct option.
        correct: bool,
    },
    /// The call was ignored: the step was locked or the sequence finished.
    Ignored,
}

/// What a [`ExerciseEngine::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the next step.
    Advanced {
        /// The new current step index.
        index: usize,
    },
    /// Advanced past the final step; the completion outcome was delivered.
    Finished,
    /// The call was ignored: no feedback showing, or already finished.
    Ignored,
}

// ============================================================================
// RunState
// ============================================================================

/// Mutable per-run state, owned exclusively by one engine instance.
#[derive(Debug, Clone)]
struct RunState {
    current_index: usize,
    selected_answer: Option<String>,
    answer_revealed: bool,
    step_completed: Vec<bool>,
    correct_count: usize,
    sequence_complete: bool,
    started_at: DateTime<Utc>,
}

impl RunState {
    fn new(step_count: usize) -> Self {
        Self {
            current_index: 0,
            selected_answer: None,
            answer_revealed: false,
            step_completed: vec![false; step_count],
            correct_count: 0,
            sequence_complete: false,
            started_at: Utc::now(),
        }
    }
}

// ============================================================================
// ExerciseEngine
// ============================================================================

/// The guided exercise stepper.
///
/// Constructed from a validated [`ExerciseSequence`] and an [`EventSink`];
/// a fresh instance always starts at step 0 with zero score. State is never
/// persisted or shared: discarding the engine discards all progress.
///
/// # Example
///
/// ```
/// use guidex_engine::{
///     AnswerOption, ConceptTags, Content, ExerciseEngine, ExerciseSequence, ExerciseStep,
///     NotationMode, RecordingSink, SubmitOutcome, Theme,
/// };
///
/// let sequence = ExerciseSequence {
///     title: "Rotations".to_string(),
///     concept: ConceptTags::new("rotations", "Rotations"),
///     show_progress: true,
///     theme: Theme::Light,
///     notation: NotationMode::Auto,
///     steps: vec![ExerciseStep {
///         id: "q1".to_string(),
///         prompt: Content::Text("How many degrees in a half turn?".to_string()),
///         options: vec![
///             AnswerOption::new("a", "180", true),
///             AnswerOption::new("b", "90", false),
///         ],
///         correct_answer_text: None,
///         explanation: Content::Text("A half turn is 180 degrees.".to_string()),
///         follow_up_hint: None,
///     }],
/// };
///
/// let mut engine = ExerciseEngine::new(sequence, RecordingSink::new()).unwrap();
/// assert_eq!(engine.submit_answer("180"), SubmitOutcome::Judged { correct: true });
/// engine.advance();
/// assert!(engine.is_finished());
/// assert_eq!(engine.sink().outcome().unwrap().correct_count, 1);
/// ```
#[derive(Debug)]
pub struct ExerciseEngine<S: EventSink> {
    sequence: ExerciseSequence,
    state: RunState,
    sink: S,
}

impl ExerciseEngine<NullSink> {
    /// Creates an engine that discards all emissions.
    ///
    /// Useful for hosts that only poll the query surface.
    ///
    /// # Errors
    ///
    /// Returns any validation error from [`ExerciseSequence::validate`].
    pub fn without_sink(sequence: ExerciseSequence) -> Result<Self> {
        Self::new(sequence, NullSink)
    }
}

impl<S: EventSink> ExerciseEngine<S> {
    /// Creates an engine for the given sequence, validating it first.
    ///
    /// # Errors
    ///
    /// Returns any validation error from [`ExerciseSequence::validate`];
    /// an engine never runs against a malformed sequence.
    pub fn new(sequence: ExerciseSequence, sink: S) -> Result<Self> {
        sequence.validate()?;
        let state = RunState::new(sequence.len());
        tracing::debug!(title = %sequence.title, steps = sequence.len(), "engine created");
        Ok(Self {
            sequence,
            state,
            sink,
        })
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Submits an answer for the current step.
    ///
    /// The submission is compared against the current step's options: a text
    /// that does not name the correct option (including an empty or unmatched
    /// string) is simply judged incorrect. On the first valid submission the
    /// step is marked completed, the score is updated, exactly one
    /// [`InteractionEvent`] is delivered to the sink, and feedback is shown.
    ///
    /// Ignored without side effects when feedback is already showing (the
    /// answer is locked) or the sequence has finished.
    pub fn submit_answer(&mut self, answer_text: &str) -> SubmitOutcome {
        let phase = self.phase();
        if phase != Phase::AwaitingAnswer {
            tracing::debug!(?phase, "submission ignored");
            return SubmitOutcome::Ignored;
        }

        let index = self.state.current_index;
        let Some(step) = self.sequence.steps.get(index) else {
            // Unreachable for a validated sequence; index stays in range.
            return SubmitOutcome::Ignored;
        };

        let correct = step.is_correct_answer(answer_text);
        let event =
            InteractionEvent::new(index, step, answer_text, correct, &self.sequence.concept);

        self.state.selected_answer = Some(answer_text.to_string());
        self.state.answer_revealed = true;
        if let Some(completed) = self.state.step_completed.get_mut(index) {
            if !*completed {
                *completed = true;
                if correct {
                    self.state.correct_count += 1;
                }
            }
        }

        tracing::debug!(
            step = %step.id,
            index,
            correct,
            score = self.state.correct_count,
            "answer judged"
        );
        self.sink.record_interaction(event);

        SubmitOutcome::Judged { correct }
    }

    /// Acknowledges feedback and moves on.
    ///
    /// From `ShowingFeedback(i)` this advances to the next step, or to the
    /// terminal phase when `i` was the last step, in which case the
    /// completion outcome is delivered to the sink exactly once.
    ///
    /// Ignored when no feedback is showing or the sequence has finished.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let phase = self.phase();
        if phase != Phase::ShowingFeedback {
            tracing::debug!(?phase, "advance ignored");
            return AdvanceOutcome::Ignored;
        }

        let next = self.state.current_index + 1;
        if next < self.sequence.len() {
            self.state.current_index = next;
            self.state.selected_answer = None;
            self.state.answer_revealed = false;
            tracing::debug!(index = next, "advanced to next step");
            return AdvanceOutcome::Advanced { index: next };
        }

        self.state.answer_revealed = false;
        self.state.sequence_complete = true;
        let outcome = SequenceOutcome::new(
            self.sequence.len(),
            self.state.correct_count,
            self.state.started_at,
        );
        tracing::info!(
            title = %self.sequence.title,
            total = outcome.total_steps,
            correct = outcome.correct_count,
            "sequence finished"
        );
        self.sink.record_completion(outcome);
        AdvanceOutcome::Finished
    }

    // ------------------------------------------------------------------------
    // Query surface (read-only projections of the run state)
    // ------------------------------------------------------------------------

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.state.sequence_complete {
            Phase::Finished
        } else if self.state.answer_revealed {
            Phase::ShowingFeedback
        } else {
            Phase::AwaitingAnswer
        }
    }

    /// Returns the current step index.
    ///
    /// Remains at the final step's index once the sequence has finished.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Returns the current step, or `None` once the sequence has finished.
    #[must_use]
    pub fn current_step(&self) -> Option<&ExerciseStep> {
        if self.state.sequence_complete {
            None
        } else {
            self.sequence.steps.get(self.state.current_index)
        }
    }

    /// Returns `true` if feedback for the current step is showing.
    #[must_use]
    pub const fn is_feedback_showing(&self) -> bool {
        matches!(self.phase(), Phase::ShowingFeedback)
    }

    /// Returns `true` if the sequence has finished.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.state.sequence_complete
    }

    /// Returns the per-step completion flags.
    #[must_use]
    pub fn completed_steps(&self) -> &[bool] {
        &self.state.step_completed
    }

    /// Returns `true` if step `index` has been answered.
    #[must_use]
    pub fn step_completed(&self, index: usize) -> bool {
        self.state.step_completed.get(index).copied().unwrap_or(false)
    }

    /// Returns the running count of first-try correct answers.
    #[must_use]
    pub const fn correct_count(&self) -> usize {
        self.state.correct_count
    }

    /// Returns the total number of steps.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.sequence.len()
    }

    /// Returns the text the user selected for the current step, if any.
    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.state.selected_answer.as_deref()
    }

    /// Returns the sequence this engine runs.
    #[must_use]
    pub const fn sequence(&self) -> &ExerciseSequence {
        &self.sequence
    }

    /// Returns a shared reference to the event sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the engine, returning the sink with everything it recorded.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}
