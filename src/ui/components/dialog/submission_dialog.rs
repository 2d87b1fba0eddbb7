//! Submission progress and confirmation dialogs

use super::base::{key_hint, render_dialog, DialogConfig};
use crate::state::SubmissionAck;
use ratatui::{style::Color, Frame};

/// Shown while the application is being sent
pub fn render_submitting_dialog(frame: &mut Frame) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Submitting...",
            title_color: Color::Yellow,
            border_color: Color::Yellow,
            message: "Sending your application. Please wait.",
            hint: None,
            max_width: 50,
        },
    );
}

/// Confirmation once the submission is acknowledged
pub fn render_submitted_dialog(frame: &mut Frame, ack: &SubmissionAck) {
    let message = submitted_message(ack);
    let hint = key_hint(&["Enter"], "to start a new application");

    render_dialog(
        frame,
        DialogConfig {
            title: "Application Submitted",
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            hint: Some(hint),
            max_width: 64,
        },
    );
}

fn submitted_message(ack: &SubmissionAck) -> String {
    format!(
        "Thank you. Your accreditation quote request has been received.\n\nReference: {}\nSubmitted: {}",
        ack.id,
        ack.submitted_at.format("%m/%d/%Y %H:%M UTC")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_submitted_message_has_reference() {
        let ack = SubmissionAck {
            id: Uuid::nil(),
            submitted_at: Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap(),
        };
        let message = submitted_message(&ack);
        assert!(message.contains("Reference: 00000000-0000-0000-0000-000000000000"));
        assert!(message.ends_with("Submitted: 03/07/2024 14:05 UTC"));
    }
}
