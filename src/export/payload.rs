use chrono::{DateTime, Local};

use crate::domain::{duration, DayWindow, Summary, Task};

/// Table header shared by every export
pub const TABLE_HEAD: [&str; 3] = ["#", "Task", "Time (H:MM:SS)"];

/// Everything the document renderer needs, assembled from app state.
/// The renderer owns layout and styling; this is data only.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub title: String,
    /// Human-readable generation timestamp line
    pub generated: String,
    /// Canonical day-window bounds; empty when unset
    pub day_start: String,
    pub day_end: String,
    pub head: [&'static str; 3],
    /// One row per task: 1-based index, display title, formatted time or empty
    pub rows: Vec<[String; 3]>,
    pub summary_lines: Vec<String>,
    /// Filesystem-safe name without extension, "<sanitized-title>-<YYYY-MM-DD>"
    pub file_stem: String,
}

/// Assemble the export payload from the current task list and day window
pub fn build_payload(
    tasks: &[Task],
    window: &DayWindow,
    day_start: &str,
    day_end: &str,
    title: &str,
    now: DateTime<Local>,
) -> ExportPayload {
    let title = if title.trim().is_empty() {
        "Today's Agenda".to_string()
    } else {
        title.trim().to_string()
    };

    let rows = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let time = task
                .duration
                .map(|secs| duration::format(secs as i64))
                .unwrap_or_default();
            [(idx + 1).to_string(), task.display_title(idx), time]
        })
        .collect();

    let summary = Summary::compute(tasks, window);

    ExportPayload {
        generated: format!("Generated: {}", now.format("%Y-%m-%d %H:%M:%S")),
        day_start: day_start.to_string(),
        day_end: day_end.to_string(),
        head: TABLE_HEAD,
        rows,
        summary_lines: summary.lines(),
        file_stem: format!("{}-{}", sanitize_title(&title), now.format("%Y-%m-%d")),
        title,
    }
}

/// Make a title safe for use as a file name: strip characters illegal in
/// file names, turn whitespace runs into single dashes, collapse dash
/// runs, trim dashes at the edges
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            continue;
        }
        if c.is_whitespace() || c == '-' {
            if !out.ends_with('-') {
                out.push('-');
            }
        } else {
            out.push(c);
        }
    }
    out.trim_matches('-').to_string()
}
