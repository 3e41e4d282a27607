//! Common UI components shared across views.
//!
//! This module contains the header bar, alert banner, tab bar, status bar,
//! and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::HealthStatus;

/// Render the header bar with per-source link indicators.
///
/// Displays: overall stream state, one colored dot per source, packet count.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let liveness = app.aggregator.source_liveness(app.now_ms(), &app.thresholds);
    let health = app.stream_health();

    let state = match (app.feed_running(), health) {
        (Some(false), _) => "PAUSED",
        (_, HealthStatus::Healthy) => "LIVE",
        (_, HealthStatus::Warning) => "DEGRADED",
        (_, HealthStatus::Critical) => "NO SIGNAL",
    };

    let mut spans = vec![
        Span::styled(" ● ", app.theme.status_style(health)),
        Span::styled("HIMALAYAN SENTINEL ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(state, app.theme.status_style(health).add_modifier(Modifier::BOLD)),
        Span::raw(" │"),
    ];

    for link in &liveness {
        spans.push(Span::styled(" ●", app.theme.link_style(link.status)));
        spans.push(Span::raw(format!("{}", link.source)));
    }

    spans.push(Span::raw(format!(" │ {} pkts", app.aggregator.received())));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Height of the alert banner: one line per active alert.
pub fn alerts_height(app: &App) -> u16 {
    app.aggregator.alerts().len() as u16
}

/// Render active hazard alerts, one per line.
pub fn render_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .aggregator
        .alerts()
        .iter()
        .map(|alert| {
            let style = app.theme.status_style(alert.severity);
            let tag = match alert.severity {
                HealthStatus::Critical => app.theme.alert_tag,
                _ => style.add_modifier(Modifier::REVERSED),
            };
            Line::from(vec![
                Span::styled(format!(" ▲ {} ", alert.kind.as_str()), tag),
                Span::styled(format!(" {}", alert.description), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Feed "),
        Line::from(" 2:Metrics "),
        Line::from(" 3:Sources "),
    ];

    let selected = View::ALL.iter().position(|v| *v == app.current_view).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: source description, time since the last packet, available controls.
/// Also displays temporary status messages and source errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.accent));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Feed if app.filter_active => "Type to search | Enter:apply Esc:cancel",
        View::Feed => "/:search Enter:detail p:pause e:export ?:help q:quit",
        View::Metrics => "Tab:switch p:pause e:export ?:help q:quit",
        View::Sources => "Enter:last packet Tab:switch p:pause ?:help q:quit",
    };

    let status = if let Some(ref err) = app.load_error {
        format!(" {} | Error: {} | {}", app.source_description(), err, controls)
    } else if let Some(last) = app.aggregator.last_received() {
        format!(
            " {} | Last packet {:.1}s ago | {}",
            app.source_description(),
            last.elapsed().as_secs_f64(),
            controls,
        )
    } else {
        format!(" {} | Waiting for packets... | {}", app.source_description(), controls)
    };

    let style = if app.load_error.is_some() {
        Style::default().fg(app.theme.degraded)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1 2 3       Feed / Metrics / Sources"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Packet detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Feed"),
        Line::from("  /           Filter packets"),
        Line::from("  c           Clear filter"),
        Line::from(""),
        section(" General"),
        Line::from("  p           Pause/resume generator"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.accent));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
