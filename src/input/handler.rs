use crate::app::{AppState, EditTarget, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Editing(_) => handle_editing_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    app.notice = None;

    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task_up();
            } else {
                app.move_selection_up();
            }
            Ok(false)
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task_down();
            } else {
                app.move_selection_down();
            }
            Ok(false)
        }

        // Timer on the selected task
        KeyCode::Enter => {
            app.toggle_timer();
            Ok(false)
        }
        KeyCode::Char('r') => {
            app.reset_timer();
            Ok(false)
        }

        // Task list
        KeyCode::Char('a') => {
            app.add_task();
            app.begin_edit(EditTarget::TaskTitle);
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            app.remove_task();
            Ok(false)
        }

        // Field editing
        KeyCode::Char('t') => {
            app.begin_edit(EditTarget::TaskTitle);
            Ok(false)
        }
        KeyCode::Char('e') => {
            app.begin_edit(EditTarget::TaskDuration);
            Ok(false)
        }
        KeyCode::Char('s') => {
            app.begin_edit(EditTarget::DayStart);
            Ok(false)
        }
        KeyCode::Char('d') => {
            app.begin_edit(EditTarget::DayEnd);
            Ok(false)
        }
        KeyCode::Char('S') => {
            app.toggle_day_start_meridiem();
            Ok(false)
        }
        KeyCode::Char('D') => {
            app.toggle_day_end_meridiem();
            Ok(false)
        }
        KeyCode::Char('p') => {
            app.begin_edit(EditTarget::PlannerTitle);
            Ok(false)
        }

        // Export
        KeyCode::Char('w') => {
            let dir = crate::persistence::ensure_agenda_dir()?;
            app.export(&dir);
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while a text field is being edited
fn handle_editing_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.commit_edit();
        }
        KeyCode::Esc => {
            app.cancel_edit();
        }
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.edit_buffer.push(c);
        }
        _ => {}
    }
    Ok(false)
}
