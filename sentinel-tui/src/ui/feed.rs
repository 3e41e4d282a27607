//! Feed view rendering.
//!
//! Displays the packet log newest first, with the buffer fill indicator and
//! the active filter in the title.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::ui::format_clock;

/// Render the packet log.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let history = app.aggregator.history();
    let packets = app.filtered_packets();

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let title = format!(
        " Live Feed ({}) SEQ_BUF {}/{}{} ",
        packets.len(),
        history.len(),
        history.capacity(),
        filter_info
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if packets.is_empty() {
        let message = if history.is_empty() {
            "  Waiting for telemetry..."
        } else {
            "  No packets match the filter"
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled(message, Style::default().add_modifier(Modifier::DIM)),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from("Source"),
        Cell::from("Location"),
        Cell::from("Value"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = packets
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(format_clock(p.timestamp_ms)),
                Cell::from(p.source.as_str()),
                Cell::from(p.location.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(p.value.clone()),
                Cell::from(p.status.as_str()),
            ])
            .style(app.theme.packet_style(p.status))
        })
        .collect();

    let widths = [
        Constraint::Length(9),  // Time
        Constraint::Length(8),  // Source
        Constraint::Fill(1),    // Location
        Constraint::Fill(2),    // Value
        Constraint::Length(8),  // Status
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index().min(packets.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}
