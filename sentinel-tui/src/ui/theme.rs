//! Dashboard palette.
//!
//! Link and hazard colors follow the field-station convention: green for a
//! live link, amber for a degraded one, red for a lost link or a critical
//! hazard. Light terminals get darker variants so amber stays readable.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use sentinel_types::{LinkStatus, PacketStatus, Trend};

use crate::data::{link_health, HealthStatus};

/// Palette and table styles for the dashboard.
///
/// [`Theme::auto_detect()`] picks [`Theme::dark()`] or [`Theme::light()`] from
/// the terminal background.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Titles, overlay borders and status-bar messages.
    pub accent: Color,
    /// Live links and confident metrics.
    pub nominal: Color,
    /// Intermittent links and source errors.
    pub degraded: Color,
    /// Lost links and critical hazards.
    pub hazard: Color,
    pub border: Color,
    pub header: Style,
    pub selected: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    /// Feed rows flagged WARNING (seismic events above the magnitude threshold).
    pub warning_row: Style,
    /// Tag on the left of each alert line.
    pub alert_tag: Style,
    pub border_type: BorderType,
}

impl Theme {
    /// Palette for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            accent: Color::Cyan,
            nominal: Color::Green,
            degraded: Color::Yellow,
            hazard: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            warning_row: Style::default().fg(Color::Yellow).bg(Color::Rgb(48, 36, 0)),
            alert_tag: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Palette for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            accent: Color::Blue,
            nominal: Color::Rgb(0, 120, 40),
            degraded: Color::Rgb(160, 100, 0),
            hazard: Color::Rgb(180, 0, 0),
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            warning_row: Style::default()
                .fg(Color::Rgb(120, 70, 0))
                .bg(Color::Rgb(255, 240, 200)),
            alert_tag: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(180, 0, 0))
                .add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn status_style(&self, status: HealthStatus) -> Style {
        match status {
            HealthStatus::Healthy => Style::default().fg(self.nominal),
            HealthStatus::Warning => Style::default().fg(self.degraded),
            HealthStatus::Critical => {
                Style::default().fg(self.hazard).add_modifier(Modifier::BOLD)
            }
        }
    }

    pub fn link_style(&self, status: LinkStatus) -> Style {
        self.status_style(link_health(status))
    }

    pub fn packet_style(&self, status: PacketStatus) -> Style {
        match status {
            PacketStatus::Success => Style::default(),
            PacketStatus::Warning => self.warning_row,
            PacketStatus::Error => self.status_style(HealthStatus::Critical),
        }
    }

    /// Rising values are the hazardous direction for every seeded metric.
    pub fn trend_style(&self, trend: Trend) -> Style {
        match trend {
            Trend::Up => Style::default().fg(self.degraded),
            Trend::Down => Style::default().fg(self.accent),
            Trend::Stable => Style::default().add_modifier(Modifier::DIM),
        }
    }
}
