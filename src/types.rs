//! Shared types used across the library.

/// A station-local timestamp exactly as written on the wire.
///
/// `date` is `yyyymmdd` and `time` is `hhmmss`. The codec stores timestamps
/// verbatim; the UTC offset a file declares in its `SO` record is preserved
/// on the header for calendar-aware consumers to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp {
    /// Calendar date as `yyyymmdd`.
    pub date: u32,
    /// Time of day as `hhmmss`.
    pub time: u32,
}

impl Timestamp {
    /// Construct a timestamp from its wire components.
    pub fn new(date: u32, time: u32) -> Self {
        Timestamp { date, time }
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:08},{:06}", self.date, self.time)
    }
}
