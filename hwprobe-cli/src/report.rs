//! Final report rendering
//!
//! Per-target summary lines for the end of a diagnostic run.

use colored::*;

use hwprobe_core::domain::TaskState;
use hwprobe_engine::{DiagnosticPool, DiagnosticTask};

/// Print the final per-target states for a finished pool
pub fn print_report(pool: &DiagnosticPool) {
    println!();
    println!(
        "{}",
        format!("Diagnostic results for '{}':", pool.command()).bold()
    );
    println!();

    for task in pool.members() {
        print_task_summary(task);
    }

    let total = pool.members().count();
    let completed = pool
        .members()
        .filter(|t| t.state() == TaskState::Completed)
        .count();

    println!();
    println!(
        "{}",
        format!(
            "{}/{} targets completed in {:.0?}",
            completed,
            total,
            pool.elapsed()
        )
        .bold()
    );
}

fn print_task_summary(task: &DiagnosticTask) {
    println!("  {} {}", state_badge(task.state()), task.target());

    if let Some(envelope) = task.run_payload() {
        if let (Some(start), Some(end)) = (&envelope.start_time, &envelope.end_time) {
            println!("    {} {} .. {}", "time:".dimmed(), start, end);
        }

        for message in &envelope.diagnostic_messages {
            println!("    {}", message.dimmed());
        }
    }
}

fn state_badge(state: TaskState) -> ColoredString {
    let name = state.to_string();
    match state {
        TaskState::Completed => name.green(),
        TaskState::New | TaskState::Running => name.yellow(),
        _ => name.red(),
    }
}
