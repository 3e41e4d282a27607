//! Link status - how recently a source has been heard from.

use core::fmt;

/// Connectivity of a source, derived from the age of its latest packet.
///
/// Ordered from best to worst so the worst link can be found with `max()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum LinkStatus {
    Connected,
    Intermittent,
    Disconnected,
}

impl LinkStatus {
    /// Wire/display name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Connected => "CONNECTED",
            LinkStatus::Intermittent => "INTERMITTENT",
            LinkStatus::Disconnected => "DISCONNECTED",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
