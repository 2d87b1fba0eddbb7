//! Data-entry step rendering

use super::field_renderer::{field_lines, field_value, is_read_only, upload_for};
use crate::app::App;
use crate::state::{FieldKind, WizardStep};
use crate::ui::render_scrollable_list;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the rows of the current step
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.state.step();
    let form = &app.state.form;
    let record = app.state.store.get();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let intro = Paragraph::new(step_intro(step))
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(intro, chunks[0]);

    let mut previous_group = "";
    let items: Vec<ListItem> = form
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let mut lines = Vec::new();
            if field.group != previous_group {
                if idx > 0 {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(Span::styled(
                    field.group,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                previous_group = field.group;
            }

            let is_active = idx == form.active_field_index;
            let draft = if is_active { form.draft.as_str() } else { "" };
            let value = field_value(field, record, draft);
            let upload = upload_for(field, &record.uploaded_files, &app.state.uploads);
            lines.extend(field_lines(
                field,
                value,
                is_active,
                is_read_only(field, record),
                app.state.field_error(field.error_key),
                upload,
            ));
            if is_active {
                if let Some(help) = field_help(field.kind) {
                    lines.push(Line::from(Span::styled(
                        format!("    {help}"),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Step {}: {} ", step.number(), step.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    render_scrollable_list(frame, chunks[1], list, form.active_field_index);
}

fn step_intro(step: WizardStep) -> &'static str {
    match step.number() {
        1 => "Identify your healthcare organization and who we should contact about this quote.",
        2 => "Tell us what kind of facility is applying.",
        3 => "CEO and Invoicing Contact details are required. Director of Quality is optional.",
        4 => "Single location, or several? Multi-site organizations can attach a spreadsheet.",
        5 => "Select every service provided at your sites, or describe one under Other.",
        _ => "Select the services to certify, the standards to apply for and your stroke certification dates.",
    }
}

/// Extra line under the focused row
fn field_help(kind: FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::Facility | FieldKind::SiteMode | FieldKind::UploadMethod => {
            Some("Space/Enter to change")
        }
        FieldKind::UploadPath => Some("Type a path to a .csv, .xlsx or .xls file, then Enter"),
        FieldKind::Standard => Some("Type a standard name, then Enter to add"),
        FieldKind::Date(_) => Some("MM/DD/YYYY or YYYY-MM-DD, then Enter to add"),
        FieldKind::UploadedFile(_) | FieldKind::StandardEntry(_) | FieldKind::DateEntry(..) => {
            Some("Enter or Del to remove")
        }
        FieldKind::VerifyEmail => Some("Enter to send a verification email to the address above"),
        FieldKind::Text(_) | FieldKind::Toggle(_) => None,
    }
}
