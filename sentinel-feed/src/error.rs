use std::time::Duration;

use thiserror::Error;

/// Errors raised while configuring or serving a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The emission interval range contains no values.
    #[error("emission interval {min:?}..{max:?} is empty")]
    EmptyInterval { min: Duration, max: Duration },

    /// Accepting or writing to a client failed.
    #[error("feed I/O error: {0}")]
    Io(#[from] std::io::Error),
}
