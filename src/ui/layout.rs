//! Layout components (progress sidebar, status bar)

use super::components::{render_step_button, StepButtonState, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{shortcut_label, CONTINUE_KEY, PREVIOUS_KEY, RESET_KEY, SAVE_KEY};
use crate::state::WizardStep;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SIDEBAR_WIDTH: u16 = 30;
const QUIT_HINT: &str = " ^C:quit ";

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Sidebar
            Constraint::Min(0),                // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Progress text shown above the step list
pub fn progress_label(step: WizardStep) -> String {
    if step.is_review() {
        "Review & Submit".to_string()
    } else {
        format!(
            "Step {} of {}",
            step.number(),
            WizardStep::LAST_ENTRY.number()
        )
    }
}

/// Draw the sidebar: progress heading and one box per step
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.state.step();

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(WizardStep::all().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let heading = Paragraph::new(Line::from(Span::styled(
        format!(" {}", progress_label(current)),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(heading, chunks[0]);

    for (idx, step) in WizardStep::all().enumerate() {
        let state = if step == current {
            StepButtonState::Current
        } else if step < current {
            StepButtonState::Done
        } else {
            StepButtonState::Upcoming
        };
        render_step_button(frame, chunks[idx + 1], step, state);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];
    spans.push(Span::styled(
        step_hints(app.state.step()),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(QUIT_HINT.len() as u16),
        y: area.height.saturating_sub(1),
        width: (QUIT_HINT.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(QUIT_HINT).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current step
fn step_hints(step: WizardStep) -> String {
    if step.is_review() {
        format!(
            "j/k:nav  Space:collapse  e:edit  c:certify  {}:submit  {}:back  t/v:export  y:copy",
            shortcut_label(SAVE_KEY),
            shortcut_label(PREVIOUS_KEY),
        )
    } else {
        format!(
            "Tab:next  Space/Enter:select  Del:remove  {}:continue  {}:back  {}:save  {}:reset",
            shortcut_label(CONTINUE_KEY),
            shortcut_label(PREVIOUS_KEY),
            shortcut_label(SAVE_KEY),
            shortcut_label(RESET_KEY),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_label() {
        assert_eq!(progress_label(WizardStep::FIRST), "Step 1 of 6");
        assert_eq!(progress_label(WizardStep::LAST_ENTRY), "Step 6 of 6");
        assert_eq!(progress_label(WizardStep::REVIEW), "Review & Submit");
    }

    #[test]
    fn test_review_hints_mention_submit() {
        assert!(step_hints(WizardStep::REVIEW).contains(":submit"));
        assert!(step_hints(WizardStep::FIRST).contains(":continue"));
    }
}
