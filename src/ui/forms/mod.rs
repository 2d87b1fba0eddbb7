//! Form rendering module
//!
//! - `field_renderer`: row values, error lines and upload gauges
//! - `step_form`: the focusable list for the current data-entry step

mod field_renderer;
mod step_form;

pub use step_form::draw_step;
