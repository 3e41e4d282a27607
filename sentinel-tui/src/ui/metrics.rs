//! Metrics view rendering.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::HealthStatus;

/// Width of the confidence bar in cells.
const GAUGE_WIDTH: usize = 10;

/// Render the metric table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let metrics = app.aggregator.metrics();

    let header = Row::new(vec![
        Cell::from("Metric"),
        Cell::from("Value"),
        Cell::from("Unit"),
        Cell::from("Trend"),
        Cell::from("Confidence"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = metrics
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.label.clone()),
                Cell::from(m.value.to_string()),
                Cell::from(m.unit.clone()),
                Cell::from(Span::styled(m.trend.arrow(), app.theme.trend_style(m.trend))),
                Cell::from(Span::styled(
                    confidence_gauge(m.confidence),
                    app.theme.status_style(confidence_health(m.confidence)),
                )),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),                        // Metric
        Constraint::Fill(2),                        // Value
        Constraint::Length(6),                      // Unit
        Constraint::Length(5),                      // Trend
        Constraint::Length(GAUGE_WIDTH as u16 + 7), // Confidence
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Metrics ({}) ", metrics.len()))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !metrics.is_empty() {
        state.select(Some(app.selected_index().min(metrics.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// "█████████░  94%"
fn confidence_gauge(confidence: f64) -> String {
    let confidence = confidence.clamp(0.0, 100.0);
    let filled = ((confidence / 100.0) * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "{}{} {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH - filled),
        confidence
    )
}

fn confidence_health(confidence: f64) -> HealthStatus {
    if confidence >= 80.0 {
        HealthStatus::Healthy
    } else if confidence >= 50.0 {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_fills_proportionally() {
        assert_eq!(confidence_gauge(100.0), "██████████ 100%");
        assert_eq!(confidence_gauge(0.0), "░░░░░░░░░░   0%");
        assert_eq!(confidence_gauge(94.0), "█████████░  94%");
    }

    #[test]
    fn gauge_clamps_out_of_range() {
        assert_eq!(confidence_gauge(140.0), confidence_gauge(100.0));
        assert_eq!(confidence_gauge(-3.0), confidence_gauge(0.0));
    }

    #[test]
    fn confidence_bands() {
        assert_eq!(confidence_health(99.0), HealthStatus::Healthy);
        assert_eq!(confidence_health(60.0), HealthStatus::Warning);
        assert_eq!(confidence_health(10.0), HealthStatus::Critical);
    }
}
