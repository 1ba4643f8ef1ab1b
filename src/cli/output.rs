//! Table rendering for human-readable output.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};

use crate::domain::models::{ScoreReport, TaskRef};

/// Render per-category scores as a table.
pub fn score_table(report: &ScoreReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Category", "Score", "Total", "Percent"]);
    for (name, score) in &report.scores {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.2}", score.score)),
            Cell::new(score.total),
            Cell::new(format!("{:.1}%", score.percentage())),
        ]);
    }
    table
}

/// Render a completed task set as a table.
pub fn task_table(tasks: &[TaskRef]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Task ID", "State", "Name"]);
    for task in tasks {
        table.add_row(vec![
            Cell::new(&task.task_id),
            Cell::new(task.state.as_str()),
            Cell::new(&task.name),
        ]);
    }
    table
}
