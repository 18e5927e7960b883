use chrono::Local;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::{
    default_day_end, default_day_start, duration, toggle_text, DayWindow, Parsed, Summary, Task,
    TimeOfDay,
};
use crate::export::{build_payload, write_document};
use crate::persistence::{Snapshot, StatePort, TaskRecord};

/// Which field an edit session targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    TaskTitle,
    TaskDuration,
    DayStart,
    DayEnd,
    PlannerTitle,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Editing(EditTarget),
}

/// A free-text field with an inline validity marker
#[derive(Debug, Clone, Default)]
pub struct Field {
    pub text: String,
    pub invalid: bool,
}

impl Field {
    fn valid(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            invalid: false,
        }
    }
}

/// Main application state. Owns the task list, the day-window fields and
/// the planner title; every mutating operation flags `needs_save` and the
/// event loop persists when it sees the flag.
pub struct AppState {
    pub tasks: Vec<Task>,
    pub day_start: Field,
    pub day_end: Field,
    pub title: String,
    pub selected: usize,
    pub ui_mode: UiMode,
    pub edit_buffer: String,
    pub notice: Option<String>,
    pub needs_save: bool,
    /// Invalid duration text per task, shown in place of the value and
    /// excluded from aggregates until corrected
    invalid_durations: HashMap<Uuid, String>,
    /// Typed duration text briefly shown over a running timer; the next
    /// tick or stop replaces it and base seconds are never touched by it
    live_override: Option<(Uuid, String)>,
    store: Box<dyn StatePort>,
    clock: Box<dyn Clock>,
}

impl AppState {
    /// Build app state from whatever the store holds (or the seeded
    /// default when the store is empty or unreadable)
    pub fn new(store: Box<dyn StatePort>, clock: Box<dyn Clock>) -> Self {
        let snapshot = store.load().unwrap_or_else(|_| Snapshot::seeded());

        let tasks = snapshot
            .tasks
            .iter()
            .map(|record| Task::new(record.title.clone(), record.actual_seconds))
            .collect();

        Self {
            tasks,
            day_start: commit_time_field(&snapshot.day_start),
            day_end: commit_time_field(&snapshot.day_end),
            title: snapshot.title,
            selected: 0,
            ui_mode: UiMode::Normal,
            edit_buffer: String::new(),
            notice: None,
            needs_save: false,
            invalid_durations: HashMap::new(),
            live_override: None,
            store,
            clock,
        }
    }

    // --- Task list mutations ---

    pub fn add_task(&mut self) {
        self.tasks.push(Task::new("", None));
        self.selected = self.tasks.len() - 1;
        self.needs_save = true;
    }

    pub fn remove_task(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let removed = self.tasks.remove(self.selected);
        self.invalid_durations.remove(&removed.id);
        if self.selected >= self.tasks.len() && self.selected > 0 {
            self.selected -= 1;
        }
        self.needs_save = true;
    }

    pub fn move_task_up(&mut self) {
        if self.selected > 0 {
            self.tasks.swap(self.selected, self.selected - 1);
            self.selected -= 1;
            self.needs_save = true;
        }
    }

    pub fn move_task_down(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.tasks.swap(self.selected, self.selected + 1);
            self.selected += 1;
            self.needs_save = true;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    // --- Timer operations ---

    /// Start the selected task's timer, or stop it (committing the run)
    pub fn toggle_timer(&mut self) {
        let now = self.clock.now();
        if let Some(task) = self.tasks.get_mut(self.selected) {
            if task.timer.is_running() {
                task.stop(now);
                self.needs_save = true;
            } else {
                task.start(now);
            }
            self.live_override = None;
        }
    }

    pub fn reset_timer(&mut self) {
        let now = self.clock.now();
        if let Some(task) = self.tasks.get_mut(self.selected) {
            task.reset(now);
            self.invalid_durations.remove(&task.id);
            self.live_override = None;
            self.needs_save = true;
        }
    }

    /// Periodic refresh; running displays are derived from the clock, so
    /// the only work is expiring a live edit override
    pub fn tick(&mut self) {
        if let Some((id, _)) = &self.live_override {
            let running = self
                .tasks
                .iter()
                .any(|t| t.id == *id && t.timer.is_running());
            if running {
                self.live_override = None;
            }
        }
    }

    /// Duration text a task's field should show right now
    pub fn duration_text(&self, index: usize) -> Field {
        let task = &self.tasks[index];
        if let Some(text) = self.invalid_durations.get(&task.id) {
            return Field {
                text: text.clone(),
                invalid: true,
            };
        }
        if let Some((id, text)) = &self.live_override {
            if *id == task.id {
                return Field::valid(text.clone());
            }
        }
        let text = task
            .display_seconds(self.clock.now())
            .map(|secs| duration::format(secs as i64))
            .unwrap_or_default();
        Field::valid(text)
    }

    // --- Field editing ---

    pub fn begin_edit(&mut self, target: EditTarget) {
        if matches!(target, EditTarget::TaskTitle | EditTarget::TaskDuration)
            && self.tasks.is_empty()
        {
            return;
        }
        self.edit_buffer = match target {
            EditTarget::TaskTitle => self.tasks[self.selected].title.clone(),
            EditTarget::TaskDuration => self.duration_text(self.selected).text,
            EditTarget::DayStart => self.day_start.text.clone(),
            EditTarget::DayEnd => self.day_end.text.clone(),
            EditTarget::PlannerTitle => self.title.clone(),
        };
        self.ui_mode = UiMode::Editing(target);
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.ui_mode = UiMode::Normal;
    }

    /// Commit the edit buffer into its target field
    pub fn commit_edit(&mut self) {
        let UiMode::Editing(target) = self.ui_mode else {
            return;
        };
        let text = self.edit_buffer.clone();

        match target {
            EditTarget::TaskTitle => {
                self.tasks[self.selected].title = text.trim().to_string();
            }
            EditTarget::TaskDuration => self.commit_duration_edit(&text),
            EditTarget::DayStart => {
                self.day_start = commit_time_field(&text);
            }
            EditTarget::DayEnd => {
                self.day_end = commit_time_field(&text);
            }
            EditTarget::PlannerTitle => {
                self.title = text.trim().to_string();
            }
        }

        self.edit_buffer.clear();
        self.ui_mode = UiMode::Normal;
        self.needs_save = true;
    }

    fn commit_duration_edit(&mut self, text: &str) {
        let idx = self.selected;
        let id = self.tasks[idx].id;
        let running = self.tasks[idx].timer.is_running();
        match duration::parse(text) {
            Parsed::Value(secs) => {
                self.invalid_durations.remove(&id);
                if running {
                    // Display-only until the next stop
                    self.live_override = Some((id, duration::format(secs as i64)));
                } else {
                    self.tasks[idx].set_duration(Some(secs));
                }
            }
            Parsed::Empty => {
                self.invalid_durations.remove(&id);
                if !running {
                    self.tasks[idx].set_duration(None);
                }
            }
            Parsed::Invalid => {
                // Flagged inline, value excluded until corrected
                self.invalid_durations.insert(id, text.to_string());
                if !running {
                    self.tasks[idx].set_duration(None);
                }
            }
        }
    }

    pub fn toggle_day_start_meridiem(&mut self) {
        self.day_start = Field::valid(toggle_text(&self.day_start.text, default_day_start()));
        self.needs_save = true;
    }

    pub fn toggle_day_end_meridiem(&mut self) {
        self.day_end = Field::valid(toggle_text(&self.day_end.text, default_day_end()));
        self.needs_save = true;
    }

    // --- Aggregates ---

    pub fn day_window(&self) -> DayWindow {
        DayWindow::new(field_minutes(&self.day_start), field_minutes(&self.day_end))
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.tasks, &self.day_window())
    }

    /// Planner title with the default applied
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Today's Agenda"
        } else {
            self.title.trim()
        }
    }

    // --- Persistence and export ---

    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self
                .tasks
                .iter()
                .enumerate()
                .map(|(idx, task)| TaskRecord {
                    title: task.display_title(idx),
                    actual_seconds: task.duration,
                })
                .collect(),
            day_start: self.day_start.text.clone(),
            day_end: self.day_end.text.clone(),
            title: self.title.clone(),
        }
    }

    /// Best-effort save; a storage failure never interrupts the session
    pub fn save(&mut self) {
        let snapshot = self.to_snapshot();
        let _ = self.store.save(&snapshot);
        self.needs_save = false;
    }

    /// Render the Markdown export into `dir`. Failures surface as a
    /// single notice; no partial output is left behind.
    pub fn export(&mut self, dir: &Path) -> Option<PathBuf> {
        if self.tasks.is_empty() {
            self.notice = Some("Add at least one task before exporting".to_string());
            return None;
        }
        let payload = build_payload(
            &self.tasks,
            &self.day_window(),
            &self.day_start.text,
            &self.day_end.text,
            &self.title,
            Local::now(),
        );
        match write_document(&payload, dir) {
            Ok(path) => {
                self.notice = Some(format!("Exported {}", path.display()));
                Some(path)
            }
            Err(_) => {
                self.notice = Some("Export failed; nothing was written".to_string());
                None
            }
        }
    }
}

/// Intake rule for a day-window field, applied on edit commit and on
/// load: valid input is canonicalized, empty means unset, anything
/// else keeps the text but flags it
fn commit_time_field(text: &str) -> Field {
    match TimeOfDay::parse(text) {
        Parsed::Value(t) => Field::valid(t.format()),
        Parsed::Empty => Field::valid(""),
        Parsed::Invalid => Field {
            text: text.to_string(),
            invalid: true,
        },
    }
}

fn field_minutes(field: &Field) -> Option<u32> {
    TimeOfDay::parse(&field.text).value().map(|t| t.to_minutes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::persistence::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn app_with(store: MemoryStore, clock: Rc<ManualClock>) -> AppState {
        AppState::new(Box::new(store), Box::new(clock))
    }

    fn fresh_app() -> (AppState, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        (app_with(MemoryStore::new(), Rc::clone(&clock)), clock)
    }

    #[test]
    fn test_new_app_seeds_default_state() {
        let (app, _) = fresh_app();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].title, "Focus Session");
        assert_eq!(app.tasks[0].duration, Some(3600));
        assert_eq!(app.day_start.text, "08:00 AM");
        assert_eq!(app.day_end.text, "09:00 PM");
        assert_eq!(app.title, "Today's Agenda");
    }

    #[test]
    fn test_add_remove_move() {
        let (mut app, _) = fresh_app();
        app.add_task();
        app.add_task();
        assert_eq!(app.tasks.len(), 3);
        assert_eq!(app.selected, 2);

        app.begin_edit(EditTarget::TaskTitle);
        app.edit_buffer = "Last".to_string();
        app.commit_edit();

        app.move_task_up();
        assert_eq!(app.selected, 1);
        assert_eq!(app.tasks[1].title, "Last");

        app.remove_task();
        assert_eq!(app.tasks.len(), 2);
        assert!(app.needs_save);
    }

    #[test]
    fn test_timer_toggle_commits_on_stop() {
        let (mut app, clock) = fresh_app();
        app.toggle_timer();
        assert!(app.tasks[0].timer.is_running());

        clock.advance_secs(65);
        app.toggle_timer();
        assert!(!app.tasks[0].timer.is_running());
        assert_eq!(app.tasks[0].duration, Some(3665));
        assert!(app.needs_save);
    }

    #[test]
    fn test_reset_clears_duration_and_display() {
        let (mut app, clock) = fresh_app();
        app.toggle_timer();
        clock.advance_secs(10);
        app.reset_timer();

        assert_eq!(app.tasks[0].duration, None);
        assert_eq!(app.duration_text(0).text, "");
    }

    #[test]
    fn test_duration_edit_while_idle() {
        let (mut app, _) = fresh_app();
        app.begin_edit(EditTarget::TaskDuration);
        app.edit_buffer = "2:05:09".to_string();
        app.commit_edit();

        assert_eq!(app.tasks[0].duration, Some(7509));
        assert_eq!(app.duration_text(0).text, "2:05:09");
    }

    #[test]
    fn test_invalid_duration_flagged_and_excluded() {
        let (mut app, _) = fresh_app();
        app.begin_edit(EditTarget::TaskDuration);
        app.edit_buffer = "abc".to_string();
        app.commit_edit();

        let field = app.duration_text(0);
        assert!(field.invalid);
        assert_eq!(field.text, "abc");
        assert_eq!(app.tasks[0].duration, None);
        assert_eq!(app.summary().taken_seconds, 0);
    }

    #[test]
    fn test_running_edit_overrides_display_only() {
        let (mut app, clock) = fresh_app();
        app.toggle_timer();
        clock.advance_secs(5);

        app.begin_edit(EditTarget::TaskDuration);
        app.edit_buffer = "9:00:00".to_string();
        app.commit_edit();
        assert_eq!(app.duration_text(0).text, "9:00:00");

        // The next tick drops the override and the stop commits only
        // the real elapsed time
        app.tick();
        clock.advance_secs(5);
        app.toggle_timer();
        assert_eq!(app.tasks[0].duration, Some(3610));
    }

    #[test]
    fn test_day_window_and_summary() {
        let (mut app, _) = fresh_app();
        // Defaults: 08:00 AM .. 09:00 PM -> 780 minutes allotted
        assert_eq!(app.day_window().planned_minutes(), Some(780));
        let summary = app.summary();
        assert_eq!(summary.allotted_seconds, Some(46_800));
        assert_eq!(summary.taken_seconds, 3600);
        assert_eq!(summary.remaining_seconds, Some(43_200));

        // Overnight window: 10:00 PM .. 06:00 AM
        app.begin_edit(EditTarget::DayStart);
        app.edit_buffer = "10:00 PM".to_string();
        app.commit_edit();
        app.begin_edit(EditTarget::DayEnd);
        app.edit_buffer = "06:00".to_string();
        app.commit_edit();
        assert_eq!(app.day_window().planned_minutes(), Some(480));
        assert_eq!(app.day_end.text, "06:00 AM");
    }

    #[test]
    fn test_invalid_day_field_treated_as_absent() {
        let (mut app, _) = fresh_app();
        app.begin_edit(EditTarget::DayStart);
        app.edit_buffer = "noonish".to_string();
        app.commit_edit();

        assert!(app.day_start.invalid);
        assert_eq!(app.day_window().planned_minutes(), None);
        assert_eq!(app.summary().allotted_seconds, None);
    }

    #[test]
    fn test_loaded_invalid_day_field_stays_flagged() {
        let store = MemoryStore::new();
        let mut snapshot = Snapshot::seeded();
        snapshot.day_start = "noonish".to_string();
        store.save(&snapshot).unwrap();

        let app = app_with(store, Rc::new(ManualClock::new()));
        assert!(app.day_start.invalid);
        assert_eq!(app.day_start.text, "noonish");
        assert_eq!(app.day_window().planned_minutes(), None);
        // The untouched bound loads canonical and unflagged
        assert!(!app.day_end.invalid);
        assert_eq!(app.day_end.text, "09:00 PM");
    }

    #[test]
    fn test_toggle_meridiem() {
        let (mut app, _) = fresh_app();
        app.toggle_day_start_meridiem();
        assert_eq!(app.day_start.text, "08:00 PM");

        app.day_end = Field::valid("");
        app.toggle_day_end_meridiem();
        assert_eq!(app.day_end.text, "09:00 PM");
    }

    #[test]
    fn test_save_round_trips_through_store() {
        let clock = Rc::new(ManualClock::new());
        let store = MemoryStore::new();
        let mut app = app_with(store, Rc::clone(&clock));

        app.add_task();
        app.begin_edit(EditTarget::TaskTitle);
        app.edit_buffer = "Review PRs".to_string();
        app.commit_edit();
        app.begin_edit(EditTarget::TaskDuration);
        app.edit_buffer = "0:30".to_string();
        app.commit_edit();
        app.save();
        assert!(!app.needs_save);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let clock = Rc::new(ManualClock::new());
        let mut store = MemoryStore::new();
        store.fail_saves = true;
        let mut app = app_with(store, clock);

        app.add_task();
        app.save();
        // Session continues with in-memory state
        assert!(!app.needs_save);
        assert_eq!(app.tasks.len(), 2);
    }

    #[test]
    fn test_blank_titles_persist_with_fallback() {
        let (mut app, _) = fresh_app();
        app.add_task();
        let snapshot = app.to_snapshot();
        assert_eq!(snapshot.tasks[1].title, "Task 2");
    }

    #[test]
    fn test_export_writes_document() {
        let (mut app, _) = fresh_app();
        let dir = tempfile::tempdir().unwrap();
        let path = app.export(dir.path()).unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Today's-Agenda-"));
        assert!(name.ends_with(".md"));
    }

    #[test]
    fn test_export_requires_a_task() {
        let (mut app, _) = fresh_app();
        app.remove_task();
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export(dir.path()).is_none());
        assert!(app.notice.as_deref().unwrap().contains("at least one task"));
    }
}
