//! Detail overlay rendering.
//!
//! Displays a modal overlay with every field of the selected packet.

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_age;
use crate::ui::format_clock;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the packet detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(packet) = app.detail_packet() else {
        return;
    };

    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = MIN_OVERLAY_HEIGHT;
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(10),   // Fields
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: String| {
        Line::from(vec![Span::raw(format!(" {:<10}", name)), Span::styled(value, bold)])
    };

    let age = Duration::from_millis(packet.age_ms(app.now_ms()));
    let reading = packet
        .reading
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        field("Id", packet.id.clone()),
        field("Source", packet.source.to_string()),
        field(
            "Captured",
            format!("{} ({} ago)", format_clock(packet.timestamp_ms), format_age(age)),
        ),
        field("Location", packet.location.clone().unwrap_or_else(|| "-".to_string())),
        field("Value", packet.value.clone()),
        field("Reading", reading),
        Line::from(vec![
            Span::raw(format!(" {:<10}", "Status")),
            Span::styled(
                packet.status.as_str(),
                app.theme
                    .packet_style(packet.status)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let block = Block::default()
        .title(" Packet Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.accent));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " ↑/↓: previous/next  Esc: close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[1]);
}
