//! Dataset summary indexes.
//!
//! A [`DatasetIndex`] is a lightweight JSON-serializable summary of one TCD
//! file: station identity, declared channels, record counts and the tally
//! time range. Building an index of a large archive lets tooling answer
//! "which file covers station X in March" without re-decoding bodies.
//!
//! ```no_run
//! use tcd_rs::{DatasetIndex, Result};
//!
//! fn index_one() -> Result<()> {
//!     let index = DatasetIndex::from_file("station_042.tcd")?;
//!     index.save_to_file("station_042.tcd.index")?;
//!
//!     let reloaded = DatasetIndex::load_from_file("station_042.tcd.index")?;
//!     println!("{} tallies", reloaded.tally_count);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{Dataset, Error, Result, types::Timestamp};

/// A lightweight, serializable summary of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetIndex {
    /// Format version from the `FV` record, if declared.
    pub format_version: Option<(u16, u16)>,
    /// Station identifier from the `SI` record, if declared.
    pub station_id: Option<String>,
    /// Station display name.
    pub station_name: String,
    /// Declared logical channel IDs, in declaration order.
    pub channel_ids: Vec<u16>,
    /// Number of tally records.
    pub tally_count: usize,
    /// Number of vehicle observations.
    pub vehicle_count: usize,
    /// Number of monitoring events.
    pub event_count: usize,
    /// Earliest tally timestamp, if any tallies exist.
    pub first_tally: Option<Timestamp>,
    /// Latest tally timestamp, if any tallies exist.
    pub last_tally: Option<Timestamp>,
}

impl DatasetIndex {
    /// Summarize an in-memory dataset.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let timestamps = dataset.tallies.iter().map(|t| t.timestamp);
        DatasetIndex {
            format_version: dataset.header.file.version,
            station_id: dataset.header.station.id.clone(),
            station_name: dataset.header.station.name.clone(),
            channel_ids: dataset.header.channels.iter().map(|c| c.id).collect(),
            tally_count: dataset.tallies.len(),
            vehicle_count: dataset.vehicles.len(),
            event_count: dataset.events.len(),
            first_tally: timestamps.clone().min(),
            last_tally: timestamps.max(),
        }
    }

    /// Decode a `.tcd` file and summarize it.
    pub fn from_file(path: &str) -> Result<Self> {
        let dataset = Dataset::from_file(path)?;
        Ok(Self::from_dataset(&dataset))
    }

    /// Serialize the index to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::IndexSerialization(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a previously saved index from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| Error::IndexSerialization(e.to_string()))
    }
}
