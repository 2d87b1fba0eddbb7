//! Button component for TUI

use crate::state::WizardStep;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Where a step sits relative to the one being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepButtonState {
    Done,
    Current,
    Upcoming,
}

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Sidebar box for one wizard step
pub fn render_step_button(frame: &mut Frame, area: Rect, step: WizardStep, state: StepButtonState) {
    let content = step_button_text(step, state);
    render_button(
        frame,
        area,
        &content,
        state == StepButtonState::Current,
        state != StepButtonState::Upcoming,
    );
}

fn step_button_text(step: WizardStep, state: StepButtonState) -> String {
    let marker = match state {
        StepButtonState::Done => "✓".to_string(),
        _ if step.is_review() => "»".to_string(),
        _ => step.number().to_string(),
    };
    format!("{marker} {}", step.title())
}
