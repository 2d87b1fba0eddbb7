//! Submission service for the intake form
//!
//! Nothing leaves the machine: submitting and verification are simulated
//! with a fixed delay, and the submitted record is written to the log.

mod simulated;
mod traits;

pub use simulated::SimulatedSubmitter;
pub use traits::SubmissionService;

#[cfg(test)]
pub use traits::MockSubmissionService;
