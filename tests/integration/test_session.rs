//! End-to-end integration tests for Guidex sessions
//!
//! These tests validate the complete workflow from sequence loading through
//! engine completion, using the sample sequence fixture.

use std::path::PathBuf;

use guidex_engine::{
    AdvanceOutcome, ExerciseEngine, ExerciseSequence, Phase, RecordingSink, SubmitOutcome, Theme,
};

/// Path to the sample sequence fixture.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.join("tests/integration/fixtures/sample-sequence/sequence.json"))
        .expect("Failed to find fixture path")
}

/// Loads the fixture sequence, panicking on any defect.
fn load_fixture() -> ExerciseSequence {
    let path = fixture_path();
    assert!(path.exists(), "Sequence fixture not found at: {path:?}");
    ExerciseSequence::load_from_file(&path).expect("Failed to load sequence")
}

/// Tests that the sample sequence loads and validates successfully.
#[test]
fn test_sample_sequence_loads() {
    let sequence = load_fixture();

    assert_eq!(sequence.title, "Product Rule Basics");
    assert_eq!(sequence.concept.id, "product-rule");
    assert_eq!(sequence.concept.name, "Product Rule");
    assert_eq!(sequence.theme, Theme::Light);
    assert!(sequence.show_progress);
    assert_eq!(sequence.len(), 3);
}

/// Tests that the notation heuristic classifies fixture content.
#[test]
fn test_sample_sequence_notation_classification() {
    let sequence = load_fixture();

    // Prompts containing backslash commands or carets read as notation.
    assert!(sequence.steps[0].prompt.is_notation());
    assert!(sequence.steps[1].options[0].text.is_notation());
    // Plain answer texts stay literal.
    assert!(!sequence.steps[0].options[0].text.is_notation());
    assert!(!sequence.steps[2].options[1].text.is_notation());
}

/// Tests a complete session driven against the fixture: two correct answers
/// and one wrong one.
#[test]
fn test_full_session_against_fixture() {
    let sequence = load_fixture();
    let mut engine =
        ExerciseEngine::new(sequence, RecordingSink::new()).expect("Failed to create engine");

    assert_eq!(engine.phase(), Phase::AwaitingAnswer);
    assert_eq!(engine.current_step().expect("no current step").id, "recognize-product");

    // Step 1: correct.
    assert_eq!(
        engine.submit_answer("The product rule"),
        SubmitOutcome::Judged { correct: true }
    );
    assert_eq!(engine.advance(), AdvanceOutcome::Advanced { index: 1 });

    // Step 2: wrong option.
    assert_eq!(
        engine.submit_answer("2x \\cos(x)"),
        SubmitOutcome::Judged { correct: false }
    );
    assert_eq!(engine.advance(), AdvanceOutcome::Advanced { index: 2 });

    // Step 3: correct.
    assert_eq!(
        engine.submit_answer("1"),
        SubmitOutcome::Judged { correct: true }
    );
    assert_eq!(engine.advance(), AdvanceOutcome::Finished);

    assert!(engine.is_finished());
    assert_eq!(engine.correct_count(), 2);
    assert!(engine.current_step().is_none());

    let sink = engine.into_sink();
    let events = sink.events();
    assert_eq!(events.len(), 3);
    assert!(events[0].is_correct);
    assert!(!events[1].is_correct);
    assert!(events[2].is_correct);

    // Every event carries the sequence's concept tags and a stable id prefix.
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.concept.id, "product-rule");
        assert!(
            event.interaction_id.starts_with(&format!("step{i}-")),
            "unexpected interaction id: {}",
            event.interaction_id
        );
    }

    let outcome = sink.outcome().expect("no completion outcome");
    assert_eq!(outcome.total_steps, 3);
    assert_eq!(outcome.correct_count, 2);
    assert!(!outcome.is_perfect());
    assert!(outcome.completed_at >= outcome.started_at);
}

/// Tests that the answer lock holds across a fixture-driven run.
#[test]
fn test_answer_lock_on_fixture() {
    let sequence = load_fixture();
    let mut engine =
        ExerciseEngine::new(sequence, RecordingSink::new()).expect("Failed to create engine");

    engine.submit_answer("The chain rule");
    assert_eq!(engine.correct_count(), 0);

    // Retrying with the right answer after feedback changes nothing.
    assert_eq!(
        engine.submit_answer("The product rule"),
        SubmitOutcome::Ignored
    );
    assert_eq!(engine.correct_count(), 0);
    assert_eq!(engine.sink().events().len(), 1);
}

/// Tests that interaction events serialize to JSON with the expected shape.
#[test]
fn test_event_serialization_shape() {
    let sequence = load_fixture();
    let mut engine =
        ExerciseEngine::new(sequence, RecordingSink::new()).expect("Failed to create engine");
    engine.submit_answer("The product rule");

    let event = &engine.sink().events()[0];
    let json = serde_json::to_value(event).expect("Failed to serialize event");

    assert_eq!(json["is_correct"], true);
    assert_eq!(json["answer_text"], "The product rule");
    assert_eq!(json["concept"]["name"], "Product Rule");
    assert!(json["question"]["prompt"]
        .as_str()
        .expect("prompt not a string")
        .contains("Which rule applies"));
    assert_eq!(
        json["question"]["options"]
            .as_array()
            .expect("options not an array")
            .len(),
        3
    );
}

/// Tests that a defective sequence file is rejected at load time.
#[test]
fn test_defective_sequence_rejected() {
    let dir = std::env::temp_dir();
    let path = dir.join("guidex_integration_defect.json");

    // No option is marked correct.
    let json = r#"{
        "title": "Broken",
        "steps": [{
            "id": "q1",
            "prompt": "Pick one",
            "options": [
                { "id": "a", "text": "A" },
                { "id": "b", "text": "B" }
            ],
            "explanation": "n/a"
        }]
    }"#;
    std::fs::write(&path, json).expect("Failed to write temp sequence");

    let err = ExerciseSequence::load_from_file(&path).expect_err("defect should be rejected");
    assert!(err.is_authoring_defect());
    assert!(err.to_string().contains("Suggestion:"));

    std::fs::remove_file(&path).ok();
}
