use crate::app::{AppState, EditTarget, UiMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // day window
            Constraint::Min(3),    // task list
            Constraint::Length(3), // totals
            Constraint::Length(2), // edit line / notice + key hints
        ])
        .split(f.size());

    render_header(f, app, chunks[0]);
    render_day_window(f, app, chunks[1]);
    render_tasks(f, app, chunks[2]);
    render_totals(f, app, chunks[3]);
    render_footer(f, app, chunks[4]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let date = chrono::Local::now().format("%A, %B %d").to_string();
    let line = Line::from(vec![
        Span::styled(
            app.display_title().to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(date, Style::default().fg(Color::DarkGray)),
    ]);
    let block = Block::default().borders(Borders::ALL).title(" agenda ");
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_day_window(f: &mut Frame, app: &AppState, area: Rect) {
    let field_span = |label: &str, field: &crate::app::Field| {
        let style = if field.invalid {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let text = if field.text.is_empty() { "--:-- --" } else { field.text.as_str() };
        vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(text.to_string(), style),
        ]
    };

    let mut spans = field_span("Start", &app.day_start);
    spans.push(Span::raw("   "));
    spans.extend(field_span("End", &app.day_end));
    if let Some(planned) = app.day_window().planned_minutes() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("({} min planned)", planned),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let block = Block::default().borders(Borders::ALL).title(" Day Window ");
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_tasks(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();
    for (idx, task) in app.tasks.iter().enumerate() {
        let selected = idx == app.selected;
        let running = task.timer.is_running();
        let field = app.duration_text(idx);

        let marker = if selected { "> " } else { "  " };
        let state = if running { "[RUN] " } else { "      " };

        let title_style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let time_style = if field.invalid {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if running {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Cyan)
        };

        lines.push(Line::from(vec![
            Span::raw(marker.to_string()),
            Span::styled(format!("{:>2}. ", idx + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(
                state.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<30} ", task.display_title(idx)), title_style),
            Span::styled(field.text, time_style),
        ]));
    }
    if app.tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No tasks - press 'a' to add one",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default().borders(Borders::ALL).title(" Tasks ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_totals(f: &mut Frame, app: &AppState, area: Rect) {
    let summary = app.summary();
    let block = Block::default().borders(Borders::ALL).title(" Totals ");
    let line = Line::from(Span::styled(
        summary.status_line(),
        Style::default().fg(Color::Yellow),
    ));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match app.ui_mode {
        UiMode::Editing(target) => {
            let label = match target {
                EditTarget::TaskTitle => "task title",
                EditTarget::TaskDuration => "time (H, H:MM or H:MM:SS)",
                EditTarget::DayStart => "day start (HH:MM AM/PM)",
                EditTarget::DayEnd => "day end (HH:MM AM/PM)",
                EditTarget::PlannerTitle => "planner title",
            };
            Line::from(vec![
                Span::styled(
                    format!("Edit {}: ", label),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(app.edit_buffer.clone()),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ])
        }
        UiMode::Normal => {
            if let Some(notice) = &app.notice {
                Line::from(Span::styled(
                    notice.clone(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    "Enter start/stop  r reset  a add  x remove  e time  t title  s/d day  S/D am-pm  p planner  w export  q quit",
                    Style::default().fg(Color::DarkGray),
                ))
            }
        }
    };
    f.render_widget(Paragraph::new(line), area);
}
