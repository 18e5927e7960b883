use super::duration;
use super::task::Task;
use super::window::DayWindow;

/// Aggregate figures for the day: time allotted by the window, time
/// taken across tasks, and what remains. Remaining may go negative;
/// over-budget is representable, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub allotted_seconds: Option<i64>,
    pub taken_seconds: i64,
    pub remaining_seconds: Option<i64>,
}

impl Summary {
    /// Compute aggregates from the task list and the day window
    pub fn compute(tasks: &[Task], window: &DayWindow) -> Self {
        let taken_seconds: i64 = tasks
            .iter()
            .filter_map(|t| t.duration)
            .map(|secs| secs as i64)
            .sum();
        let allotted_seconds = window.planned_minutes().map(|mins| i64::from(mins) * 60);
        let remaining_seconds = allotted_seconds.map(|allotted| allotted - taken_seconds);
        Self {
            allotted_seconds,
            taken_seconds,
            remaining_seconds,
        }
    }

    /// Labeled summary lines for the export document (H:MM precision).
    /// Figures whose input is absent are omitted, not zeroed.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(allotted) = self.allotted_seconds {
            lines.push(format!("Total Hours Alloted: {}", duration::format_hm(allotted)));
        }
        lines.push(format!("Time Taken: {}", duration::format_hm(self.taken_seconds)));
        if let Some(remaining) = self.remaining_seconds {
            lines.push(format!("Time Remaining: {}", duration::format_hm(remaining)));
        }
        lines
    }

    /// One-line totals bar for the live UI (H:MM:SS precision)
    pub fn status_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(allotted) = self.allotted_seconds {
            parts.push(format!("Total Hours Alloted: {}", duration::format(allotted)));
        }
        parts.push(format!("Time taken: {}", duration::format(self.taken_seconds)));
        if let Some(remaining) = self.remaining_seconds {
            parts.push(format!("Time Remaining: {}", duration::format(remaining)));
        }
        parts.join(" | ")
    }
}
