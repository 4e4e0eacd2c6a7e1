//! Tally records and the part-order mechanism.
//!
//! A tally line's field layout is not fixed: it is derived from the header.
//! Each resolved [`TallyPart`] contributes one semicolon-delimited segment to
//! the body line, in part order. [`parts::resolve`] produces that order from
//! header state alone, so the layout is always reproducible.

pub mod parts;

pub use parts::TallyPart;

use crate::{header::Header, header::TotalField, types::Timestamp};

/// A period-aggregated count record for one channel.
///
/// Each active classification dimension carries one count per bin; the array
/// length must equal that dimension's declared bin count. Decode enforces
/// this under strict mode and re-sizes silently under lenient mode; encode
/// assumes it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TallyRecord {
    /// Logical channel the counts belong to.
    pub channel: u16,
    /// Sub-hourly period index; 0 means the full hour.
    pub period: u8,
    /// Period start, station-local.
    pub timestamp: Timestamp,
    /// One value per declared total field, by position. Metric storage.
    pub totals: Vec<f64>,
    /// One count per vehicle-type bin.
    pub vehicle_type_counts: Vec<u32>,
    /// One count per speed bin.
    pub speed_counts: Vec<u32>,
    /// One count per length bin.
    pub length_counts: Vec<u32>,
    /// Raw segments of unrecognized parts from an explicit part order, as
    /// `(part token, raw segment)` pairs in encounter order. Preserved so
    /// forward-compatible files round-trip losslessly.
    pub unknown_parts: Vec<(String, String)>,
}

impl TallyRecord {
    /// Create an empty tally for a channel and period.
    pub fn new(channel: u16, period: u8, timestamp: Timestamp) -> Self {
        TallyRecord {
            channel,
            period,
            timestamp,
            ..TallyRecord::default()
        }
    }

    /// Look up a total value through the header-declared total order.
    ///
    /// Returns `None` when the header does not declare the field or the
    /// record carries no value at its position.
    pub fn total(&self, header: &Header, field: &TotalField) -> Option<f64> {
        let position = header.tally.totals.iter().position(|f| f == field)?;
        self.totals.get(position).copied()
    }
}
