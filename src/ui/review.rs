//! Review step: collapsible summary sections and certification

use super::render_scrollable_list;
use crate::app::App;
use crate::state::summary::{project_section, ReviewSection, SummaryRow};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Width of the field column in expanded sections
const FIELD_COLUMN: usize = 34;

/// Draw the review summary
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let review = &app.state.review;
    let record = app.state.store.get();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let items: Vec<ListItem> = ReviewSection::ALL
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            let is_selected = idx == review.selected_section;
            let collapsed = review.is_collapsed(*section);
            let rows = if collapsed {
                Vec::new()
            } else {
                project_section(record, *section)
            };
            ListItem::new(section_lines(*section, &rows, is_selected, collapsed))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Review Your Application ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    render_scrollable_list(frame, chunks[0], list, review.selected_section);

    draw_certification(frame, chunks[1], review.certified);
}

fn section_lines(
    section: ReviewSection,
    rows: &[SummaryRow],
    is_selected: bool,
    collapsed: bool,
) -> Vec<Line<'static>> {
    let heading_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };
    let arrow = if collapsed { "▸" } else { "▾" };

    let mut heading = vec![Span::styled(
        format!("{arrow} {}", section.title()),
        heading_style,
    )];
    if is_selected {
        heading.push(Span::styled(
            format!("  [e] edit step {}", section.edit_step().number()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(heading)];
    lines.extend(rows.iter().map(|row| {
        Line::from(vec![
            Span::styled(
                format!("    {:<width$}", row.field, width = FIELD_COLUMN),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(row.value.clone()),
        ])
    }));
    lines.push(Line::from(""));
    lines
}

fn draw_certification(frame: &mut Frame, area: Rect, certified: bool) {
    let (checkbox, color) = if certified {
        ("[x]", Color::Green)
    } else {
        ("[ ]", Color::Yellow)
    };
    let content = vec![
        Line::from(vec![
            Span::styled(
                format!("{checkbox} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("I certify that the information provided is accurate and complete."),
        ]),
        Line::from(Span::styled(
            "Press c to certify, then submit.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(paragraph, area);
}
