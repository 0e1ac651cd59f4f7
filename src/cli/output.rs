//! CLI output formatting

use crate::{
    core::{PipelineCompleted, PipelineStatus, StepCompleted},
    execution::{RunReport, StepOutcome, StepReport},
};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a progress bar sized to the registry
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    if let Ok(bar_style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        progress.set_style(bar_style.progress_chars("#>-"));
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format a pipeline status for display
pub fn format_status(status: PipelineStatus) -> String {
    match status {
        PipelineStatus::Idle => style("IDLE").dim().to_string(),
        PipelineStatus::Running => style("RUNNING").yellow().to_string(),
        PipelineStatus::Completed => style("COMPLETED").green().to_string(),
        PipelineStatus::Faulted => style("FAULTED").red().to_string(),
    }
}

/// Format a per-step completion event
pub fn format_step_completed(event: &StepCompleted) -> String {
    format!(
        "{} [{}] {}",
        CHECK,
        style(event.index).dim(),
        style(&event.name).green()
    )
}

/// Format the whole-pipeline completion event
pub fn format_pipeline_completed(event: &PipelineCompleted) -> String {
    format!(
        "{} Pipeline ({}) initialized after {} steps",
        ROCKET,
        style(&event.run_id.to_string()[..8]).dim(),
        style(event.steps).cyan()
    )
}

/// Format one step report line
pub fn format_step_report(report: &StepReport) -> String {
    let elapsed = report
        .finished_at
        .signed_duration_since(report.started_at)
        .num_milliseconds();
    match &report.outcome {
        StepOutcome::Succeeded => format!(
            "  {} [{}] {} {}",
            CHECK,
            report.index,
            style(&report.name).green(),
            style(format!("{}ms", elapsed)).dim()
        ),
        StepOutcome::Failed { error } => format!(
            "  {} [{}] {}: {}",
            CROSS,
            report.index,
            style(&report.name).red(),
            style(error).dim()
        ),
    }
}

/// Format the final summary line of a run
pub fn format_run_summary(report: &RunReport) -> String {
    if report.skipped {
        return format!("{} Pipeline already initialized, nothing to run", INFO);
    }

    let failed = report.failed_steps().count();
    let total = report.outcomes.len();
    match (&report.fault, failed) {
        (Some(fault), _) => format!(
            "{} {}: {}",
            CROSS,
            format_status(report.status),
            style(fault).red()
        ),
        (None, 0) => format!("{} {} ({} steps)", CHECK, format_status(report.status), total),
        (None, failed) => format!(
            "{} {} with {} of {} steps failed",
            WARN,
            format_status(report.status),
            style(failed).red(),
            total
        ),
    }
}
