//! Dashboard settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `SENTINEL_*` environment variables, then command-line flags.
//!
//! ```toml
//! history_capacity = 50
//! connected_within = "12s"
//! intermittent_within = "25s"
//! interval_min = "3s"
//! interval_max = "7s"
//! seed = 7
//! refresh = "1s"
//! log_file = "sentinel.log"
//! export_path = "sentinel_export.json"
//! ```

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::data::{Thresholds, DEFAULT_HISTORY_SIZE};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sentinel.toml";

/// Environment variable prefix (`SENTINEL_HISTORY_CAPACITY`, ...).
pub const ENV_PREFIX: &str = "SENTINEL";

/// Raw settings as read from file and environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub history_capacity: usize,
    pub connected_within: String,
    pub intermittent_within: String,
    pub interval_min: String,
    pub interval_max: String,
    pub seed: Option<u64>,
    pub refresh: String,
    pub log_file: Option<PathBuf>,
    pub export_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_SIZE,
            connected_within: "12s".to_string(),
            intermittent_within: "25s".to_string(),
            interval_min: "3000ms".to_string(),
            interval_max: "7000ms".to_string(),
            seed: None,
            refresh: "1s".to_string(),
            log_file: None,
            export_path: PathBuf::from("sentinel_export.json"),
        }
    }
}

/// Command-line overrides, applied last.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Packets kept in the history buffer (at most 50)
    #[arg(long)]
    pub history: Option<usize>,

    /// Age below which a source counts as connected (e.g., "12s")
    #[arg(long)]
    pub connected_within: Option<String>,

    /// Age below which a source counts as intermittent (e.g., "25s")
    #[arg(long)]
    pub intermittent_within: Option<String>,

    /// Shortest delay between generated packets (e.g., "3s")
    #[arg(long)]
    pub interval_min: Option<String>,

    /// Longest delay between generated packets (e.g., "7s")
    #[arg(long)]
    pub interval_max: Option<String>,

    /// Seed for the packet generator, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// UI refresh interval for time-dependent fields (e.g., "1s")
    #[arg(short, long)]
    pub refresh: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Where the `e` key writes its JSON export
    #[arg(long)]
    pub export_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`] if present) and
    /// the `SENTINEL_*` environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_layered(path, ENV_PREFIX)
    }

    fn load_layered(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()
            .context("failed to load configuration")?;

        config.try_deserialize().context("invalid configuration")
    }

    /// Apply command-line overrides on top of the loaded settings.
    pub fn apply(&mut self, overrides: &Overrides) {
        let Overrides {
            history,
            connected_within,
            intermittent_within,
            interval_min,
            interval_max,
            seed,
            refresh,
            log_file,
            export_path,
        } = overrides.clone();

        if let Some(v) = history {
            self.history_capacity = v;
        }
        if let Some(v) = connected_within {
            self.connected_within = v;
        }
        if let Some(v) = intermittent_within {
            self.intermittent_within = v;
        }
        if let Some(v) = interval_min {
            self.interval_min = v;
        }
        if let Some(v) = interval_max {
            self.interval_max = v;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(v) = refresh {
            self.refresh = v;
        }
        if log_file.is_some() {
            self.log_file = log_file;
        }
        if let Some(v) = export_path {
            self.export_path = v;
        }
    }

    /// Parse and validate into the typed configuration the dashboard runs on.
    pub fn resolve(&self) -> Result<DashboardConfig> {
        if self.history_capacity == 0 {
            bail!("history_capacity must be at least 1");
        }
        if self.history_capacity > DEFAULT_HISTORY_SIZE {
            bail!(
                "history_capacity ({}) cannot exceed {} packets",
                self.history_capacity,
                DEFAULT_HISTORY_SIZE
            );
        }

        let thresholds = Thresholds {
            connected_within: parse_setting("connected_within", &self.connected_within)?,
            intermittent_within: parse_setting("intermittent_within", &self.intermittent_within)?,
        };
        if thresholds.connected_within >= thresholds.intermittent_within {
            bail!(
                "connected_within ({}) must be shorter than intermittent_within ({})",
                self.connected_within,
                self.intermittent_within
            );
        }

        let interval = parse_setting("interval_min", &self.interval_min)?
            ..parse_setting("interval_max", &self.interval_max)?;
        if interval.is_empty() {
            bail!(
                "interval_min ({}) must be shorter than interval_max ({})",
                self.interval_min,
                self.interval_max
            );
        }

        let refresh = parse_setting("refresh", &self.refresh)?;
        if refresh.is_zero() {
            bail!("refresh must be greater than zero");
        }

        Ok(DashboardConfig {
            history_capacity: self.history_capacity,
            thresholds,
            interval,
            seed: self.seed,
            refresh,
            log_file: self.log_file.clone(),
            export_path: self.export_path.clone(),
        })
    }
}

fn parse_setting(name: &str, value: &str) -> Result<Duration> {
    parse_duration(value).with_context(|| format!("invalid {name}"))
}

/// Validated settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub history_capacity: usize,
    pub thresholds: Thresholds,
    pub interval: Range<Duration>,
    pub seed: Option<u64>,
    pub refresh: Duration,
    pub log_file: Option<PathBuf>,
    pub export_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_SIZE,
            thresholds: Thresholds::default(),
            interval: sentinel_feed::DEFAULT_INTERVAL,
            seed: None,
            refresh: Duration::from_secs(1),
            log_file: None,
            export_path: PathBuf::from("sentinel_export.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_resolve_to_documented_values() {
        let config = Settings::default().resolve().unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.thresholds.connected_within, Duration::from_secs(12));
        assert_eq!(config.thresholds.intermittent_within, Duration::from_secs(25));
        assert_eq!(config.interval, Duration::from_millis(3000)..Duration::from_millis(7000));
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            history_capacity = 20
            connected_within = "5s"
            seed = 99
            export_path = "out.json"
            "#,
        );

        let settings = Settings::load_layered(Some(file.path()), "SENTINEL_TEST_FILE").unwrap();
        assert_eq!(settings.history_capacity, 20);
        assert_eq!(settings.connected_within, "5s");
        assert_eq!(settings.intermittent_within, "25s");
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.export_path, PathBuf::from("out.json"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load_layered(Some(&missing), "SENTINEL_TEST_MISSING").is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config("history_capacity = 20\n");
        std::env::set_var("SENTINEL_TEST_ENV_HISTORY_CAPACITY", "30");

        let settings = Settings::load_layered(Some(file.path()), "SENTINEL_TEST_ENV").unwrap();
        std::env::remove_var("SENTINEL_TEST_ENV_HISTORY_CAPACITY");

        assert_eq!(settings.history_capacity, 30);
    }

    #[test]
    fn overrides_win() {
        let mut settings = Settings {
            seed: Some(1),
            ..Settings::default()
        };
        settings.apply(&Overrides {
            history: Some(10),
            intermittent_within: Some("40s".into()),
            seed: Some(2),
            ..Overrides::default()
        });

        assert_eq!(settings.history_capacity, 10);
        assert_eq!(settings.intermittent_within, "40s");
        assert_eq!(settings.seed, Some(2));
        // Unset overrides leave values alone
        assert_eq!(settings.connected_within, "12s");
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let settings = Settings {
            connected_within: "30s".into(),
            ..Settings::default()
        };
        let err = settings.resolve().unwrap_err();
        assert!(err.to_string().contains("connected_within"));
    }

    #[test]
    fn rejects_empty_interval() {
        let settings = Settings {
            interval_min: "5s".into(),
            interval_max: "5s".into(),
            ..Settings::default()
        };
        assert!(settings.resolve().is_err());
    }

    #[test]
    fn rejects_zero_capacity_and_bad_durations() {
        let zero = Settings {
            history_capacity: 0,
            ..Settings::default()
        };
        assert!(zero.resolve().is_err());

        let garbage = Settings {
            refresh: "soon".into(),
            ..Settings::default()
        };
        let err = garbage.resolve().unwrap_err();
        assert!(err.to_string().contains("refresh"));
    }

    #[test]
    fn rejects_capacity_above_50() {
        let settings = Settings {
            history_capacity: DEFAULT_HISTORY_SIZE + 1,
            ..Settings::default()
        };
        let err = settings.resolve().unwrap_err();
        assert!(err.to_string().contains("history_capacity"));

        let at_cap = Settings {
            history_capacity: DEFAULT_HISTORY_SIZE,
            ..Settings::default()
        };
        assert_eq!(at_cap.resolve().unwrap().history_capacity, 50);
    }
}
