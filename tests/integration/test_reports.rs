//! Integration tests for the session-to-report pipeline
//!
//! These tests drive a full engine run against the sample fixture and feed
//! the recorded events through report generation, the same conversion the
//! CLI host performs.

use std::path::PathBuf;

use guidex_engine::{ExerciseEngine, ExerciseSequence, RecordingSink};
use guidex_report::{
    json::JsonGenerator, InteractionInput, MarkdownGenerator, ReportGenerator, ReportInput,
    SessionReport,
};

/// Path to the sample sequence fixture.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.join("tests/integration/fixtures/sample-sequence/sequence.json"))
        .expect("Failed to find fixture path")
}

/// Runs the fixture sequence with the given answers and converts the
/// recorded session into report input.
fn run_session(answers: &[&str]) -> ReportInput {
    let sequence = ExerciseSequence::load_from_file(fixture_path()).expect("Failed to load");
    let mut engine =
        ExerciseEngine::new(sequence, RecordingSink::new()).expect("Failed to create engine");

    for answer in answers {
        engine.submit_answer(answer);
        engine.advance();
    }
    assert!(engine.is_finished(), "session did not finish");

    let sequence = engine.sequence().clone();
    let sink = engine.into_sink();
    let outcome = sink.outcome().expect("no completion outcome").clone();

    let interactions = sink
        .events()
        .iter()
        .zip(&sequence.steps)
        .enumerate()
        .map(|(index, (event, step))| InteractionInput {
            step_index: index,
            step_id: step.id.clone(),
            prompt: event.question.prompt.clone(),
            answer_text: event.answer_text.clone(),
            correct_answer: step.correct_answer().unwrap_or_default().to_string(),
            is_correct: event.is_correct,
            timestamp: event.timestamp,
        })
        .collect();

    ReportInput {
        sequence_title: sequence.title,
        concept_name: sequence.concept.name,
        total_steps: outcome.total_steps,
        correct_count: outcome.correct_count,
        started_at: outcome.started_at,
        ended_at: outcome.completed_at,
        interactions,
    }
}

fn mixed_report() -> SessionReport {
    let input = run_session(&["The product rule", "2x \\cos(x)", "1"]);
    ReportGenerator::new(input).generate()
}

/// Tests that a mixed-score session produces a faithful report.
#[test]
fn test_report_from_mixed_session() {
    let report = mixed_report();

    assert_eq!(report.sequence_title, "Product Rule Basics");
    assert_eq!(report.concept_name, "Product Rule");
    assert_eq!(report.summary.total_steps, 3);
    assert_eq!(report.summary.correct_count, 2);
    assert_eq!(report.summary.accuracy_percent(), 66);
    assert!(!report.summary.is_perfect());

    assert_eq!(report.steps.len(), 3);
    assert!(report.steps[0].was_correct);
    assert!(!report.steps[1].was_correct);
    assert_eq!(report.steps[1].step_id, "apply-rule");
    assert_eq!(report.steps[1].submitted_answer, "2x \\cos(x)");
    assert_eq!(report.steps[1].correct_answer, "2x \\sin(x) + x^2 \\cos(x)");

    let missed = report.missed_steps();
    assert_eq!(missed.len(), 1);
    assert_eq!(missed[0].step_id, "apply-rule");
}

/// Tests that a perfect session reports 100% with nothing to review.
#[test]
fn test_report_from_perfect_session() {
    let input = run_session(&[
        "The product rule",
        "2x \\sin(x) + x^2 \\cos(x)",
        "1",
    ]);
    let report = ReportGenerator::new(input).generate();

    assert_eq!(report.summary.correct_count, 3);
    assert_eq!(report.summary.accuracy_percent(), 100);
    assert!(report.summary.is_perfect());
    assert!(report.missed_steps().is_empty());
}

/// Tests the Markdown rendering of a real session.
#[test]
fn test_markdown_report_from_session() {
    let report = mixed_report();
    let markdown = MarkdownGenerator::new(&report).generate();

    assert!(markdown.contains("# Guidex Session Report: Product Rule Basics"));
    assert!(markdown.contains("| Concept | Product Rule |"));
    assert!(markdown.contains("| Correct | 2 (66%) |"));
    assert!(markdown.contains("## Steps to Review"));
    assert!(markdown.contains("apply-rule"));
    // Notation answers come through with Markdown escaping.
    assert!(markdown.contains(r"2x \\cos\(x\)"));
}

/// Tests the JSON rendering of a real session round-trips.
#[test]
fn test_json_report_from_session() {
    let report = mixed_report();
    let json = JsonGenerator::new(&report)
        .generate_pretty()
        .expect("Failed to serialize report");

    let restored: SessionReport =
        serde_json::from_str(&json).expect("Failed to parse generated JSON");
    assert_eq!(restored.sequence_title, report.sequence_title);
    assert_eq!(restored.summary.correct_count, 2);
    assert_eq!(restored.steps.len(), 3);
}

/// Tests writing both report formats to disk, as the CLI host does.
#[test]
fn test_reports_written_to_disk() {
    let report = mixed_report();
    let dir = std::env::temp_dir().join("guidex_integration_reports");
    std::fs::create_dir_all(&dir).expect("Failed to create output dir");

    let json_path = dir.join("session.json");
    JsonGenerator::new(&report)
        .write_to_file(&json_path, true)
        .expect("Failed to write JSON report");

    let md_path = dir.join("session.md");
    std::fs::write(&md_path, MarkdownGenerator::new(&report).generate())
        .expect("Failed to write Markdown report");

    assert!(json_path.exists());
    assert!(md_path.exists());

    std::fs::remove_dir_all(&dir).ok();
}
