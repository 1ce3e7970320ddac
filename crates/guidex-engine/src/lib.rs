//! Guidex Exercise Engine
//!
//! A finite-state stepper for guided multiple-choice exercises: presents
//! steps one at a time, judges answers, tracks score, and emits interaction
//! events to a caller-supplied sink.

pub mod content;
pub mod engine;
pub mod error;
pub mod events;
pub mod sequence;

pub use content::{Content, NotationMode};
pub use engine::{AdvanceOutcome, ExerciseEngine, Phase, SubmitOutcome};
pub use error::{EngineError, Result};
pub use events::{
    EventSink, InteractionEvent, NullSink, QuestionPayload, RecordingSink, SequenceOutcome,
};
pub use sequence::{AnswerOption, ConceptTags, ExerciseSequence, ExerciseStep, Theme};
