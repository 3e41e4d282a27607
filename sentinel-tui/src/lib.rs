//! # sentinel-tui
//!
//! Terminal dashboard for the Himalayan Sentinel telemetry stream.
//!
//! Packets arrive from a [`PacketSource`], are folded into a bounded history
//! and a metric set by the [`Aggregator`], and are rendered as a live feed,
//! a metric table and a per-source link panel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(aggregate)    │(rendering)   │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── ChannelSource (local feed) | StreamSource   │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, export and feed control
//! - **[`source`]**: The [`PacketSource`] trait with channel and TCP stream inputs
//! - **[`data`]**: History buffer, metric fold, link liveness and alerts
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (file, environment, flags)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Local synthetic feed
//! sentinel
//!
//! # Headless feed server, then a dashboard attached to it
//! sentinel --serve 127.0.0.1:7878
//! sentinel --connect 127.0.0.1:7878
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use sentinel_tui::{App, ChannelSource, DashboardConfig};
//!
//! let (tx, source) = ChannelSource::create("local generator");
//! let app = App::new(Box::new(source), &DashboardConfig::default());
//! ```
//!
//! ### Folding packets without a terminal
//!
//! ```
//! use sentinel_tui::Aggregator;
//! use sentinel_types::{Packet, Source};
//!
//! let mut aggregator = Aggregator::default();
//! aggregator.on_packet(
//!     Packet::builder(Source::Gnss)
//!         .timestamp_ms(0)
//!         .value("Convergence: 39.20mm/yr")
//!         .build(),
//! );
//! assert_eq!(aggregator.history().len(), 1);
//! ```

pub mod app;
pub mod config;
pub mod control;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::{DashboardConfig, Overrides, Settings};
pub use control::FeedControl;
pub use data::{Aggregator, HealthStatus, PacketHistory, Thresholds};
pub use source::{ChannelSource, PacketSource, StreamSource};
