//! Application state and navigation logic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sentinel_types::{current_timestamp_ms, Packet, Source};
use serde_json::json;

use crate::config::DashboardConfig;
use crate::control::FeedControl;
use crate::data::{link_health, Aggregator, HealthStatus, PacketHistory, Thresholds};
use crate::source::PacketSource;
use crate::ui::Theme;

/// How long a status-bar message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
///
/// Packet detail is shown as an overlay (controlled by `App::show_detail_overlay`)
/// rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Live packet log, newest first.
    Feed,
    /// Folded metric set.
    Metrics,
    /// Link status per source.
    Sources,
}

impl View {
    pub const ALL: [View; 3] = [View::Feed, View::Metrics, View::Sources];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Feed => View::Metrics,
            View::Metrics => View::Sources,
            View::Sources => View::Feed,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Feed => View::Sources,
            View::Metrics => View::Feed,
            View::Sources => View::Metrics,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Feed => "Feed",
            View::Metrics => "Metrics",
            View::Sources => "Sources",
        }
    }

    fn index(self) -> usize {
        match self {
            View::Feed => 0,
            View::Metrics => 1,
            View::Sources => 2,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Packet input
    source: Box<dyn PacketSource>,
    feed: Option<FeedControl>,
    pub aggregator: Aggregator,
    pub thresholds: Thresholds,
    pub load_error: Option<String>,

    // Selection per view, indexed by `View::index`
    selected: [usize; 3],

    // Search/filter (Feed view)
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,
    pub export_path: PathBuf,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`.
    pub fn new(source: Box<dyn PacketSource>, config: &DashboardConfig) -> Self {
        Self {
            running: true,
            current_view: View::Feed,
            show_help: false,
            show_detail_overlay: false,
            source,
            feed: None,
            aggregator: Aggregator::new(
                PacketHistory::new(config.history_capacity),
                sentinel_types::Metric::seed_set(),
            ),
            thresholds: config.thresholds.clone(),
            load_error: None,
            selected: [0; 3],
            filter_text: String::new(),
            filter_active: false,
            theme: Theme::auto_detect(),
            export_path: config.export_path.clone(),
            status_message: None,
        }
    }

    /// Attach the local generator so it can be paused and resumed.
    pub fn with_feed_control(mut self, feed: FeedControl) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Returns a description of the current packet source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Whether the local generator is running. `None` for remote sources.
    pub fn feed_running(&self) -> Option<bool> {
        self.feed.as_ref().map(FeedControl::is_running)
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Drain the packet source into the aggregator.
    ///
    /// Returns the number of packets applied.
    pub fn reload_data(&mut self) -> usize {
        let packets = self.source.poll();
        let applied = packets.len();
        for packet in packets {
            self.aggregator.on_packet(packet);
        }

        self.load_error = self.source.error();
        self.clamp_selection();
        applied
    }

    /// Wall-clock time used for ages and link status.
    pub fn now_ms(&self) -> u64 {
        current_timestamp_ms()
    }

    /// Worst link health across all sources.
    pub fn stream_health(&self) -> HealthStatus {
        self.aggregator
            .source_liveness(self.now_ms(), &self.thresholds)
            .iter()
            .map(|l| link_health(l.status))
            .max()
            .unwrap_or(HealthStatus::Critical)
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Selected row in the current view.
    pub fn selected_index(&self) -> usize {
        self.selected[self.current_view.index()]
    }

    fn row_count(&self, view: View) -> usize {
        match view {
            View::Feed => self.filtered_packets().len(),
            View::Metrics => self.aggregator.metrics().len(),
            View::Sources => Source::ALL.len(),
        }
    }

    fn clamp_selection(&mut self) {
        for view in View::ALL {
            let max = self.row_count(view).saturating_sub(1);
            let slot = &mut self.selected[view.index()];
            *slot = (*slot).min(max);
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.row_count(self.current_view).saturating_sub(1);
        let slot = &mut self.selected[self.current_view.index()];
        *slot = (*slot + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        let slot = &mut self.selected[self.current_view.index()];
        *slot = slot.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected[self.current_view.index()] = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected[self.current_view.index()] =
            self.row_count(self.current_view).saturating_sub(1);
    }

    /// Buffered packets matching the filter, newest first.
    pub fn filtered_packets(&self) -> Vec<&Packet> {
        self.aggregator
            .history()
            .iter()
            .filter(|p| self.matches_filter(p))
            .collect()
    }

    /// Check if a packet matches the current filter.
    ///
    /// Matches source, location, value, status and id, case-insensitively.
    pub fn matches_filter(&self, packet: &Packet) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        let search = self.filter_text.to_lowercase();
        [
            packet.source.as_str(),
            packet.location.as_deref().unwrap_or(""),
            packet.value.as_str(),
            packet.status.as_str(),
            packet.id.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&search))
    }

    /// The packet the detail overlay shows.
    ///
    /// In the Feed view this is the selected row; in the Sources view it is
    /// the latest packet of the selected source.
    pub fn detail_packet(&self) -> Option<&Packet> {
        match self.current_view {
            View::Feed => self.filtered_packets().get(self.selected_index()).copied(),
            View::Sources => {
                let source = Source::ALL.get(self.selected_index())?;
                self.aggregator.history().latest(*source)
            }
            View::Metrics => None,
        }
    }

    /// Open the detail overlay for the current selection.
    pub fn enter_detail(&mut self) {
        if self.detail_packet().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then clear the filter, then go to Feed.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else if !self.filter_text.is_empty() {
            self.clear_filter();
        } else {
            self.current_view = View::Feed;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.current_view = View::Feed;
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.selected[View::Feed.index()] = 0;
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.clamp_selection();
    }

    /// Pause or resume the local generator.
    pub fn toggle_feed(&mut self) {
        let Some(feed) = self.feed.as_mut() else {
            self.set_status_message("Remote source: nothing to pause".to_string());
            return;
        };

        let message = match feed.toggle() {
            Ok(true) => "Feed resumed".to_string(),
            Ok(false) => {
                // Packets queued before the stop must not reach the aggregator
                let mut discarded = 0;
                loop {
                    let drained = self.source.poll().len();
                    if drained == 0 {
                        break;
                    }
                    discarded += drained;
                }
                tracing::debug!(discarded, "feed paused");
                "Feed paused".to_string()
            }
            Err(e) => format!("Could not resume feed: {}", e),
        };
        self.set_status_message(message);
    }

    /// Export to the configured path and report the outcome in the status bar.
    pub fn export(&mut self) {
        let path = self.export_path.clone();
        let message = match self.export_state(&path) {
            Ok(()) => format!("Exported to {}", path.display()),
            Err(e) => format!("Export failed: {:#}", e),
        };
        self.set_status_message(message);
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    ///
    /// Writes the packet buffer, metrics, source statuses and active alerts.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let now_ms = self.now_ms();
        let history = self.aggregator.history();

        let mut export = serde_json::Map::new();

        export.insert(
            "summary".to_string(),
            json!({
                "exported_at_ms": now_ms,
                "source": self.source_description(),
                "packets_received": self.aggregator.received(),
                "buffered": history.len(),
                "capacity": history.capacity(),
                "stream_health": self.stream_health().symbol(),
            }),
        );

        let packets: Vec<&Packet> = history.iter().collect();
        export.insert("packets".to_string(), serde_json::to_value(packets)?);
        export.insert("metrics".to_string(), serde_json::to_value(self.aggregator.metrics())?);

        let sources: Vec<serde_json::Value> = self
            .aggregator
            .source_liveness(now_ms, &self.thresholds)
            .iter()
            .map(|l| {
                json!({
                    "source": l.source,
                    "status": l.status,
                    "age_ms": l.age.map(|d| d.as_millis() as u64),
                    "buffered": l.buffered,
                    "last_value": l.latest.map(|p| p.value.as_str()),
                })
            })
            .collect();
        export.insert("sources".to_string(), serde_json::Value::Array(sources));

        let alerts: Vec<serde_json::Value> = self
            .aggregator
            .alerts()
            .iter()
            .map(|a| {
                json!({
                    "kind": a.kind.as_str(),
                    "severity": a.severity.symbol(),
                    "description": a.description,
                })
            })
            .collect();
        export.insert("alerts".to_string(), serde_json::Value::Array(alerts));

        let json = serde_json::to_string_pretty(&serde_json::Value::Object(export))?;
        std::fs::write(path, json)
            .with_context(|| format!("could not write {}", path.display()))?;

        tracing::info!(path = %path.display(), "exported dashboard state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sentinel_types::PacketStatus;
    use tokio::sync::mpsc;

    use super::*;
    use crate::source::ChannelSource;

    fn app() -> (mpsc::UnboundedSender<Packet>, App) {
        let (tx, source) = ChannelSource::create("test");
        (tx, App::new(Box::new(source), &DashboardConfig::default()))
    }

    fn packet(id: &str, source: Source, value: &str) -> Packet {
        Packet::builder(source)
            .id(id)
            .timestamp_ms(current_timestamp_ms())
            .value(value)
            .location("Lhasa")
            .build()
    }

    #[test]
    fn reload_applies_packets_in_arrival_order() {
        let (tx, mut app) = app();
        tx.send(packet("a", Source::Gnss, "Convergence: 39.10mm/yr")).unwrap();
        tx.send(packet("b", Source::Climate, "Ambient: 1.0°C")).unwrap();

        assert_eq!(app.reload_data(), 2);
        let ids: Vec<_> = app.filtered_packets().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(app.reload_data(), 0);
    }

    #[test]
    fn view_cycling() {
        let (_tx, mut app) = app();
        assert_eq!(app.current_view, View::Feed);
        app.next_view();
        assert_eq!(app.current_view, View::Metrics);
        app.next_view();
        app.next_view();
        assert_eq!(app.current_view, View::Feed);
        app.prev_view();
        assert_eq!(app.current_view, View::Sources);
    }

    #[test]
    fn selection_is_clamped_per_view() {
        let (tx, mut app) = app();
        for n in 0..5 {
            tx.send(packet(&n.to_string(), Source::Insar, "Deformation: 1.00mm")).unwrap();
        }
        app.reload_data();

        app.select_next_n(10);
        assert_eq!(app.selected_index(), 4);

        app.set_view(View::Sources);
        app.select_last();
        assert_eq!(app.selected_index(), 3);

        app.set_view(View::Feed);
        assert_eq!(app.selected_index(), 4);
        app.select_first();
        assert_eq!(app.selected_index(), 0);
    }

    #[test]
    fn filter_matches_any_field() {
        let (tx, mut app) = app();
        tx.send(packet("a", Source::Gnss, "Convergence: 39.10mm/yr")).unwrap();
        tx.send(
            Packet::builder(Source::Seismic)
                .id("quake")
                .timestamp_ms(current_timestamp_ms())
                .value("Event: Mag 4.8")
                .status(PacketStatus::Warning)
                .build(),
        )
        .unwrap();
        app.reload_data();

        for text in "warning".chars() {
            app.filter_push(text);
        }
        let hits = app.filtered_packets();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "quake");

        app.clear_filter();
        app.filter_text = "lhasa".into();
        assert_eq!(app.filtered_packets().len(), 1);
    }

    #[test]
    fn detail_follows_view() {
        let (tx, mut app) = app();
        tx.send(packet("g1", Source::Gnss, "Convergence: 39.10mm/yr")).unwrap();
        tx.send(packet("c1", Source::Climate, "Ambient: 1.0°C")).unwrap();
        app.reload_data();

        app.enter_detail();
        assert!(app.show_detail_overlay);
        assert_eq!(app.detail_packet().unwrap().id, "c1");
        app.go_back();
        assert!(!app.show_detail_overlay);

        // Sources view: first row is GNSS
        app.set_view(View::Sources);
        assert_eq!(app.detail_packet().unwrap().id, "g1");

        // Nothing to detail on the metrics view
        app.set_view(View::Metrics);
        app.enter_detail();
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn go_back_clears_filter_before_leaving_view() {
        let (_tx, mut app) = app();
        app.set_view(View::Metrics);
        app.filter_text = "gnss".into();

        app.go_back();
        assert!(app.filter_text.is_empty());
        assert_eq!(app.current_view, View::Metrics);

        app.go_back();
        assert_eq!(app.current_view, View::Feed);
    }

    #[test]
    fn stream_health_reflects_silent_sources() {
        let (tx, mut app) = app();
        assert_eq!(app.stream_health(), HealthStatus::Critical);

        for source in Source::ALL {
            tx.send(packet(source.as_str(), source, "x")).unwrap();
        }
        app.reload_data();
        assert_eq!(app.stream_health(), HealthStatus::Healthy);
    }

    #[test]
    fn status_message_is_visible_after_set() {
        let (_tx, mut app) = app();
        assert!(app.get_status_message().is_none());
        app.set_status_message("hello".into());
        assert_eq!(app.get_status_message(), Some("hello"));
    }

    #[test]
    fn toggle_without_local_feed_explains_itself() {
        let (_tx, mut app) = app();
        assert_eq!(app.feed_running(), None);
        app.toggle_feed();
        assert!(app.get_status_message().unwrap().contains("Remote"));
    }

    #[test]
    fn export_writes_buffer_metrics_sources_and_alerts() {
        let (tx, mut app) = app();
        tx.send(packet("a", Source::Gnss, "Convergence: 40.00mm/yr")).unwrap();
        app.reload_data();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        app.export_state(&path).unwrap();

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported["summary"]["packets_received"], 1);
        assert_eq!(exported["summary"]["capacity"], 50);
        assert_eq!(exported["packets"][0]["id"], "a");
        assert_eq!(exported["metrics"][0]["value"], 40.0);
        assert_eq!(exported["sources"].as_array().unwrap().len(), 4);
        assert_eq!(exported["sources"][0]["status"], "CONNECTED");
        assert_eq!(exported["alerts"][0]["kind"], "LOCKED_SEGMENT");
    }

    #[test]
    fn export_to_bad_path_reports_failure() {
        let (_tx, mut app) = app();
        let dir = tempfile::tempdir().unwrap();
        app.export_path = dir.path().join("missing").join("export.json");

        app.export();
        assert!(app.get_status_message().unwrap().starts_with("Export failed"));
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_pauses_and_resumes_local_feed() {
        let (tx, source) = ChannelSource::create("local");
        let interval = Duration::from_millis(100)..Duration::from_millis(200);
        let control = FeedControl::new(interval, Some(3), tx, tokio::runtime::Handle::current());
        let mut app =
            App::new(Box::new(source), &DashboardConfig::default()).with_feed_control(control);

        assert_eq!(app.feed_running(), Some(false));
        app.toggle_feed();
        assert_eq!(app.feed_running(), Some(true));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(app.reload_data() > 0);

        app.toggle_feed();
        assert_eq!(app.feed_running(), Some(false));
        assert_eq!(app.get_status_message(), Some("Feed paused"));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_discards_packets_queued_before_stop() {
        let (tx, source) = ChannelSource::create("local");
        let interval = Duration::from_millis(100)..Duration::from_millis(200);
        let control = FeedControl::new(interval, Some(3), tx, tokio::runtime::Handle::current());
        let mut app =
            App::new(Box::new(source), &DashboardConfig::default()).with_feed_control(control);

        app.toggle_feed();
        tokio::time::sleep(Duration::from_secs(1)).await;

        // No poll between emission and pause
        app.toggle_feed();
        assert_eq!(app.feed_running(), Some(false));
        assert_eq!(app.reload_data(), 0);
        assert_eq!(app.aggregator.received(), 0);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(app.reload_data(), 0);
        assert!(app.aggregator.history().is_empty());
    }
}
