//! Dialog components for TUI

mod base;
mod error_dialog;
mod submission_dialog;

pub use error_dialog::render_error_dialog;
pub use submission_dialog::{render_submitted_dialog, render_submitting_dialog};
