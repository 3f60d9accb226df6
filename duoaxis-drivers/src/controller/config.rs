//! Driver configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pause between writing a command and reading its reply, in microseconds
///
/// Chosen empirically on the reference hardware; shorter waits overrun the
/// controller's processing window.
pub const DEFAULT_SETTLE_INTERVAL_US: u32 = 5_000;

/// Motor controller driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ControllerConfig {
    /// Settle interval between write and read
    pub settle_interval_us: u32,
    /// Reject replies that fail the start marker or checksum check
    ///
    /// Off by default: replies are trusted as received.
    pub verify_replies: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            settle_interval_us: DEFAULT_SETTLE_INTERVAL_US,
            verify_replies: false,
        }
    }
}
