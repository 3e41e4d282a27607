//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`feed`]: Live packet log with the buffer indicator and text filter
//! - [`metrics`]: Metric table with trend arrows and confidence gauges
//! - [`sources`]: Link status, age and last reading per source
//! - [`detail`]: Modal overlay showing one packet in full
//! - [`common`]: Shared components (header, alerts, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the current view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Alerts (common::render_alerts)       │  only while an alert holds
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (feed/metrics/sources::render)       │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod detail;
pub mod feed;
pub mod metrics;
pub mod sources;
pub mod theme;

pub use theme::Theme;

/// Render a packet's capture time as local wall-clock time.
pub(crate) fn format_clock(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|utc| utc.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_has_fixed_width() {
        assert_eq!(format_clock(1_703_160_000_000).len(), 8);
        assert_eq!(format_clock(u64::MAX), "--:--:--");
    }
}
