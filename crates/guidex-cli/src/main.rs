//! Guidex CLI
//!
//! A terminal host for Guidex exercise sequences: loads a sequence
//! definition, drives the engine interactively, and writes session reports.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use guidex_engine::{
    AdvanceOutcome, Content, ExerciseEngine, ExerciseSequence, ExerciseStep, RecordingSink,
    SequenceOutcome, SubmitOutcome, Theme,
};
use guidex_report::{
    json::JsonGenerator, InteractionInput, MarkdownGenerator, ReportGenerator, ReportInput,
};
use tracing_subscriber::EnvFilter;

/// Guidex - Guided Exercise Runner
///
/// Runs a guided multiple-choice exercise sequence in the terminal, one step
/// at a time, and writes a session report when the sequence finishes.
#[derive(Parser, Debug)]
#[command(name = "guidex")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the sequence definition file (JSON)
    #[arg(value_name = "SEQUENCE")]
    sequence: String,

    /// Output directory for session reports
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: String,

    /// Override the display theme declared in the sequence file
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Skip report generation
    #[arg(long)]
    no_report: bool,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

/// Display theme selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    /// Light display mode.
    Light,
    /// Dark display mode.
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing subscriber with appropriate filter
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Guidex starting");
    tracing::debug!(sequence = %args.sequence, "Sequence file");
    tracing::debug!(output_dir = %args.output_dir, "Output directory");

    match run_session(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Runs one interactive session end to end.
///
/// 1. Load and validate the sequence
/// 2. Drive the engine step by step against stdin
/// 3. Print a summary
/// 4. Generate reports
fn run_session(args: &Args) -> anyhow::Result<()> {
    let mut sequence = load_sequence(&args.sequence)?;

    if let Some(theme) = args.theme {
        sequence.theme = theme.into();
    }

    print_sequence_info(&sequence);

    let mut engine = ExerciseEngine::new(sequence, RecordingSink::new())?;

    while let Some(step) = engine.current_step().cloned() {
        let index = engine.current_index();
        let total = engine.total_steps();

        println!();
        if engine.sequence().show_progress {
            println!("--- Step {} of {} ---", index + 1, total);
        } else {
            println!("---");
        }
        println!("{}", render_content(&step.prompt));
        for (n, option) in step.options.iter().enumerate() {
            println!("  {}) {}", n + 1, render_content(&option.text));
        }

        let selection = prompt_selection(&step)?;
        let outcome = engine.submit_answer(&selection);
        print_feedback(&step, outcome);

        if !engine.is_finished() {
            print!("Press Enter to continue...");
            std::io::stdout().flush()?;
            read_line()?;
        }

        if engine.advance() == AdvanceOutcome::Finished {
            break;
        }
    }

    let Some(outcome) = engine.sink().outcome().cloned() else {
        anyhow::bail!("Session ended before the sequence finished");
    };

    println!();
    print_summary(engine.sequence(), &outcome);

    if !args.no_report {
        let report_dir = PathBuf::from(&args.output_dir);
        generate_reports(&engine, &outcome, &report_dir)?;
    }

    Ok(())
}

/// Loads the sequence definition.
fn load_sequence(path: &str) -> anyhow::Result<ExerciseSequence> {
    tracing::info!(path, "Loading sequence");
    Ok(ExerciseSequence::load_from_file(path)?)
}

/// Prints the loaded sequence configuration.
fn print_sequence_info(sequence: &ExerciseSequence) {
    println!("Sequence loaded:");
    println!("  Title: {}", sequence.title);
    println!("  Concept: {}", sequence.concept.name);
    println!("  Steps: {}", sequence.len());
    println!("  Theme: {}", sequence.theme);
}

/// Prompts for a selection and returns the chosen option's display text.
///
/// A numeric entry picks the corresponding option; anything else is passed
/// through verbatim and judged by the engine (an unmatched string is simply
/// incorrect).
fn prompt_selection(step: &ExerciseStep) -> anyhow::Result<String> {
    print!("Your answer: ");
    std::io::stdout().flush()?;
    let entry = read_line()?;

    if let Ok(n) = entry.parse::<usize>() {
        if let Some(option) = n.checked_sub(1).and_then(|i| step.options.get(i)) {
            return Ok(option.text.as_str().to_string());
        }
    }

    Ok(entry)
}

/// Prints feedback for a judged submission.
fn print_feedback(step: &ExerciseStep, outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Judged { correct: true } => {
            println!("Correct!");
        }
        SubmitOutcome::Judged { correct: false } => {
            println!("Not quite.");
            if let Some(answer) = step.correct_answer() {
                println!("Correct answer: {answer}");
            }
        }
        SubmitOutcome::Ignored => {
            // The loop only submits while awaiting an answer.
            tracing::warn!(step = %step.id, "submission was ignored");
            return;
        }
    }

    println!("{}", render_content(&step.explanation));
    if let Some(hint) = &step.follow_up_hint {
        println!("Up next: {hint}");
    }
}

/// Prints the end-of-session summary.
fn print_summary(sequence: &ExerciseSequence, outcome: &SequenceOutcome) {
    println!("=== Session Summary ===");
    println!("Sequence: {}", sequence.title);
    println!(
        "Score: {}/{}",
        outcome.correct_count, outcome.total_steps
    );
    if outcome.is_perfect() {
        println!("Perfect run!");
    }

    let elapsed = outcome.duration();
    println!(
        "Duration: {}m {}s",
        elapsed.num_minutes(),
        elapsed.num_seconds() % 60
    );
}

/// Renders content for the terminal.
///
/// Notation is displayed raw; a richer host would route it through a
/// notation renderer.
fn render_content(content: &Content) -> &str {
    content.as_str()
}

/// Generates Markdown and JSON reports from the finished session.
fn generate_reports(
    engine: &ExerciseEngine<RecordingSink>,
    outcome: &SequenceOutcome,
    output_dir: &Path,
) -> anyhow::Result<()> {
    println!();
    println!("Generating reports...");

    let input = create_report_input(engine, outcome);
    let generator = ReportGenerator::new(input);
    let report = generator.generate();

    std::fs::create_dir_all(output_dir)?;

    let md_generator = MarkdownGenerator::new(&report);
    let markdown = md_generator.generate();
    let md_path = output_dir.join("guidex-session.md");
    std::fs::write(&md_path, markdown)?;
    println!("  Markdown report: {}", md_path.display());

    let json_path = output_dir.join("guidex-session.json");
    let json_generator = JsonGenerator::new(&report);
    json_generator.write_to_file(&json_path, true)?;
    println!("  JSON report: {}", json_path.display());

    Ok(())
}

/// Converts the recorded run into report input.
///
/// The engine emits exactly one event per step, in order, so events line up
/// with the sequence's steps.
fn create_report_input(
    engine: &ExerciseEngine<RecordingSink>,
    outcome: &SequenceOutcome,
) -> ReportInput {
    let sequence = engine.sequence();
    let interactions = engine
        .sink()
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
        sequence_title: sequence.title.clone(),
        concept_name: sequence.concept.name.clone(),
        total_steps: outcome.total_steps,
        correct_count: outcome.correct_count,
        started_at: outcome.started_at,
        ended_at: outcome.completed_at,
        interactions,
    }
}

/// Reads one trimmed line from stdin.
fn read_line() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}
