//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod review;
mod widgets;

pub use widgets::render_scrollable_list;

use crate::app::App;
use crate::state::SubmissionStatus;
use components::{render_error_dialog, render_submitted_dialog, render_submitting_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the main layout with the progress sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar_area, app);

    if app.state.step().is_review() {
        review::draw(frame, main_area, app);
    } else {
        forms::draw_step(frame, main_area, app);
    }

    layout::draw_status_bar(frame, app);

    match &app.state.submission {
        SubmissionStatus::Idle => {}
        SubmissionStatus::Submitting => render_submitting_dialog(frame),
        SubmissionStatus::Submitted(ack) => render_submitted_dialog(frame, ack),
    }

    // Errors sit above everything else
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}
