//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_step_button, StepButtonState, BUTTON_HEIGHT};
pub use dialog::{render_error_dialog, render_submitted_dialog, render_submitting_dialog};
