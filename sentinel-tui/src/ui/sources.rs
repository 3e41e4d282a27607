//! Sources view rendering.
//!
//! One row per source with its link status. Ages are recomputed on every
//! frame so a silent source visibly decays from CONNECTED to DISCONNECTED.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_age;

/// Render the source table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let liveness = app.aggregator.source_liveness(app.now_ms(), &app.thresholds);

    let header = Row::new(vec![
        Cell::from("Source"),
        Cell::from("Link"),
        Cell::from("Last seen"),
        Cell::from("Last value"),
        Cell::from("Buffered"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = liveness
        .iter()
        .map(|l| {
            let age = l.age.map(format_age).unwrap_or_else(|| "never".to_string());
            let last_value = l
                .latest
                .map(|p| p.value.clone())
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Cell::from(l.source.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(l.status.as_str()).style(app.theme.link_style(l.status)),
                Cell::from(age),
                Cell::from(last_value),
                Cell::from(l.buffered.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),  // Source
        Constraint::Length(13), // Link
        Constraint::Length(10), // Last seen
        Constraint::Fill(1),    // Last value
        Constraint::Length(9),  // Buffered
    ];

    let title = format!(
        " Sources [connected <{}s, intermittent <{}s] ",
        app.thresholds.connected_within.as_secs(),
        app.thresholds.intermittent_within.as_secs()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index().min(liveness.len().saturating_sub(1))));

    frame.render_stateful_widget(table, area, &mut state);
}
