//! The `readlab summary` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;

use readlab_core::ingest::parse_attempts;
use readlab_core::model::QuizAttempt;
use readlab_core::statistics::{self, ProgressSummary};

pub fn execute(attempts_path: PathBuf, learner: Option<u64>, format: String) -> Result<()> {
    let content = std::fs::read_to_string(&attempts_path)
        .with_context(|| format!("failed to read attempts from {}", attempts_path.display()))?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse attempts JSON: {}", attempts_path.display()))?;

    let (attempts, failures) = parse_attempts(&values);
    for (index, err) in &failures {
        eprintln!("  skipping attempt record {index}: {err}");
    }

    let scoped: Vec<QuizAttempt> = match learner {
        Some(id) => attempts
            .iter()
            .filter(|a| a.learner_id == id)
            .cloned()
            .collect(),
        None => attempts,
    };

    let summary = match learner {
        Some(id) => ProgressSummary::for_learner(&scoped, id),
        None => ProgressSummary::for_cohort(&scoped),
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        "table" => print_dashboard(&summary, &scoped, learner),
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }
    Ok(())
}

fn print_dashboard(summary: &ProgressSummary, attempts: &[QuizAttempt], learner: Option<u64>) {
    match learner {
        Some(id) => println!("Learner {id}"),
        None => println!(
            "Cohort — {} learners with activity",
            statistics::distinct_learners(attempts)
        ),
    }

    let mut table = Table::new();
    table.set_header(vec!["Attempts", "Avg score", "Avg speed (wpm)", "Avg stutter"]);
    table.add_row(vec![
        summary.attempt_count.to_string(),
        format!("{:.2}", summary.mean_score),
        format!("{:.2}", summary.mean_speed),
        format!("{:.2}", summary.mean_stutter),
    ]);
    println!("{table}");

    let mut weekly = Table::new();
    weekly.set_header(
        summary
            .weekly
            .iter()
            .map(|d| d.day.to_string())
            .collect::<Vec<_>>(),
    );
    weekly.add_row(
        summary
            .weekly
            .iter()
            .map(|d| format!("{:.2}", d.score))
            .collect::<Vec<_>>(),
    );
    println!("\nWeekly average score");
    println!("{weekly}");

    let latest = statistics::recent(attempts, 10);
    if latest.is_empty() {
        return;
    }
    let mut recent_table = Table::new();
    recent_table.set_header(vec!["Date", "Learner", "Language", "Type", "Score"]);
    for attempt in latest {
        recent_table.add_row(vec![
            attempt.taken_at.format("%Y-%m-%d %H:%M").to_string(),
            attempt.learner_id.to_string(),
            attempt
                .language
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".into()),
            attempt
                .quiz_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".into()),
            format!("{:.2}", attempt.score),
        ]);
    }
    println!("\nRecent attempts");
    println!("{recent_table}");
}
