//! Field rendering utilities for step forms

use crate::state::record::{FormRecord, UploadedFile};
use crate::state::upload::UploadProgress;
use crate::state::{FieldKind, FormField};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const CURSOR: &str = "▌";
const PLACEHOLDER: &str = "(empty)";
const READ_ONLY_NOTE: &str = "  (read-only)";
const BAR_WIDTH: usize = 20;

/// What a row shows next to its label
pub fn field_value(field: &FormField, record: &FormRecord, draft: &str) -> String {
    match field.kind {
        FieldKind::Text(text_field) => record.text(text_field).to_string(),
        FieldKind::Toggle(flag) => checkbox(record.flag(flag)).to_string(),
        FieldKind::Facility => record
            .facility_type
            .map(|t| format!("‹ {} ›", t.label()))
            .unwrap_or_else(|| "‹ Select a facility type ›".to_string()),
        FieldKind::SiteMode => record
            .has_multiple_sites
            .map(|m| format!("‹ {} ›", m.label()))
            .unwrap_or_else(|| "‹ Select ›".to_string()),
        FieldKind::UploadMethod => format!("‹ {} ›", record.upload_method.label()),
        FieldKind::UploadPath | FieldKind::Standard | FieldKind::Date(_) => draft.to_string(),
        FieldKind::UploadedFile(_) | FieldKind::StandardEntry(_) | FieldKind::DateEntry(..) => {
            "[remove]".to_string()
        }
        FieldKind::VerifyEmail => {
            if record.primary_contact.email_verified {
                "✓ Verified".to_string()
            } else {
                "[ Send ]".to_string()
            }
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Text gauge such as `██████░░░░ 60%`
pub fn progress_bar(percent: u16, width: usize) -> String {
    let percent = percent.min(100) as usize;
    let filled = width * percent / 100;
    format!(
        "{}{} {percent}%",
        "█".repeat(filled),
        "░".repeat(width - filled)
    )
}

/// Text rows that currently mirror another field
pub fn is_read_only(field: &FormField, record: &FormRecord) -> bool {
    matches!(field.kind, FieldKind::Text(text_field) if record.is_read_only(text_field))
}

/// Upload indicator for the attached file shown on `field`, if still running
pub fn upload_for<'a>(
    field: &FormField,
    files: &[UploadedFile],
    uploads: &'a [UploadProgress],
) -> Option<&'a UploadProgress> {
    let FieldKind::UploadedFile(index) = field.kind else {
        return None;
    };
    let file = files.get(index)?;
    uploads.iter().find(|u| u.file_name == file.name)
}

/// One row: label, value (with cursor when focused and editable), optional error line
pub fn field_lines<'a>(
    field: &'a FormField,
    value: String,
    is_active: bool,
    read_only: bool,
    error: Option<&'a str>,
    upload: Option<&UploadProgress>,
) -> Vec<Line<'a>> {
    let label_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let value_style = if read_only {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let prefix = if is_active { "▸ " } else { "  " };
    let mut spans = vec![Span::styled(prefix, label_style)];

    if let FieldKind::Toggle(_) = field.kind {
        // Checkbox before the label reads like a form
        spans.push(Span::styled(format!("{value} "), value_style));
        spans.push(Span::styled(field.label.as_str(), label_style));
    } else {
        spans.push(Span::styled(format!("{}: ", field.label), label_style));
        let shown = if value.is_empty() && !is_active {
            PLACEHOLDER.to_string()
        } else {
            value
        };
        spans.push(Span::styled(shown, value_style));
        if read_only {
            spans.push(Span::styled(
                READ_ONLY_NOTE,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else if is_active && field.kind.accepts_text() {
            spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
        }
    }

    if let Some(upload) = upload {
        spans.push(Span::styled(
            format!("  {}", progress_bar(upload.percent(), BAR_WIDTH)),
            Style::default().fg(Color::Yellow),
        ));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!("    {error}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::record::{FacilityType, FlagField, PrimaryField, TextField};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "░░░░ 0%");
        assert_eq!(progress_bar(50, 4), "██░░ 50%");
        assert_eq!(progress_bar(250, 4), "████ 100%");
    }

    #[test]
    fn test_field_values() {
        let mut record = FormRecord::default();
        record.primary_contact.email = "ada@riverside.org".into();
        record.facility_type = Some(FacilityType::Ltac);

        let email = FormField::text("", "Email", TextField::Primary(PrimaryField::Email));
        assert_eq!(field_value(&email, &record, ""), "ada@riverside.org");

        let facility = FormField::new("", "Facility Type", FieldKind::Facility);
        assert_eq!(
            field_value(&facility, &record, ""),
            "‹ Long-Term Acute Care (LTAC) ›"
        );

        let toggle = FormField::toggle("", "Same", FlagField::SameAsLegalEntity);
        assert_eq!(field_value(&toggle, &record, ""), "[ ]");

        let standard = FormField::new("", "Add Standard", FieldKind::Standard);
        assert_eq!(field_value(&standard, &record, "NIAHO"), "NIAHO");
    }

    #[test]
    fn test_error_adds_line() {
        let field = FormField::text("", "City", TextField::LegalEntityName);
        let lines = field_lines(
            &field,
            String::new(),
            false,
            false,
            Some("City is required"),
            None,
        );
        assert_eq!(lines.len(), 2);
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_mirrored_dba_renders_read_only() {
        let mut record = FormRecord::default();
        record.legal_entity_name = "Riverside".into();
        record.dba_name = "Riverside".into();
        let dba = FormField::text("", "d/b/a Name", TextField::DbaName);
        assert!(!is_read_only(&dba, &record));

        record.same_as_legal_entity = true;
        assert!(is_read_only(&dba, &record));
        let lines = field_lines(&dba, field_value(&dba, &record, ""), true, true, None, None);
        let text = line_text(&lines[0]);
        assert!(text.ends_with("Riverside  (read-only)"));
        assert!(!text.contains(CURSOR));

        let editable = field_lines(&dba, "Riverside".into(), true, false, None, None);
        assert!(line_text(&editable[0]).ends_with(CURSOR));
    }

    #[test]
    fn test_upload_matches_file_name() {
        let files = vec![UploadedFile {
            name: "sites.csv".into(),
            size: 10,
            handle: PathBuf::from("sites.csv"),
        }];
        let uploads = vec![UploadProgress::new("sites.csv", Duration::from_secs(5))];
        let row = FormField::new("", "sites.csv", FieldKind::UploadedFile(0));
        assert!(upload_for(&row, &files, &uploads).is_some());

        let other = FormField::new("", "x", FieldKind::UploadedFile(3));
        assert!(upload_for(&other, &files, &uploads).is_none());
    }
}
