//! The in-memory dataset: one header plus the decoded body records.

use crate::{
    Error, Result,
    body::{MonitoringEvent, VehicleRecord},
    decode::{DecodeOptions, DecodeSummary, decode_str},
    header::Header,
    tally::TallyRecord,
};

/// High level representation of one TCD dataset.
///
/// A dataset is a single logical header plus the body records that were
/// decoded (or added programmatically) against it. Body collections keep
/// insertion order; callers wanting temporal order sort before encoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    /// The dataset header. Its field layout governs every body record.
    pub header: Header,
    /// Tally records, in insertion order.
    pub tallies: Vec<TallyRecord>,
    /// Monitoring events, in insertion order.
    pub events: Vec<MonitoringEvent>,
    /// Vehicle observations, in insertion order.
    pub vehicles: Vec<VehicleRecord>,
}

impl Dataset {
    /// An empty dataset with a default header.
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Decode a `.tcd` file from disk with default (strict) options.
    ///
    /// # Arguments
    /// * `path` - Path to the file; also used as the error source identifier.
    ///
    /// # Returns
    /// A new [`Dataset`] on success or [`crate::Error`] on failure.
    pub fn from_file(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let (dataset, _) = decode_str(&text, DecodeOptions::new().with_source(path))?;
        Ok(dataset)
    }

    /// Decode a complete input held in memory with default (strict) options.
    pub fn from_str(text: &str) -> Result<Self> {
        let (dataset, _) = decode_str(text, DecodeOptions::new())?;
        Ok(dataset)
    }

    /// Decode with explicit options, returning the line summary as well.
    pub fn from_str_with(text: &str, opts: DecodeOptions) -> Result<(Self, DecodeSummary)> {
        decode_str(text, opts)
    }

    /// Add a tally record.
    ///
    /// # Errors
    /// [`Error::UnknownChannel`] if the record's channel is not declared.
    pub fn add_tally(&mut self, record: TallyRecord) -> Result<()> {
        self.require_channel(record.channel)?;
        self.tallies.push(record);
        Ok(())
    }

    /// Add a vehicle observation.
    ///
    /// # Errors
    /// [`Error::UnknownChannel`] if the record's channel is not declared.
    pub fn add_vehicle(&mut self, record: VehicleRecord) -> Result<()> {
        self.require_channel(record.channel)?;
        self.vehicles.push(record);
        Ok(())
    }

    /// Add a monitoring event. Events carry no channel and always succeed.
    pub fn add_event(&mut self, event: MonitoringEvent) {
        self.events.push(event);
    }

    /// Remap a logical channel ID across the whole dataset.
    ///
    /// The header definition, channel equipment, and every body record
    /// referencing `old` move to `new` in one pass, so no collaborator is
    /// left holding a stale ID.
    ///
    /// # Errors
    /// [`Error::UnknownChannel`] if `old` is not declared,
    /// [`Error::ChannelIdTaken`] if `new` already is.
    pub fn renumber_channel(&mut self, old: u16, new: u16) -> Result<()> {
        self.header.renumber_channel(old, new)?;
        for tally in &mut self.tallies {
            if tally.channel == old {
                tally.channel = new;
            }
        }
        for vehicle in &mut self.vehicles {
            if vehicle.channel == old {
                vehicle.channel = new;
            }
        }
        Ok(())
    }

    fn require_channel(&self, channel: u16) -> Result<()> {
        if !self.header.has_channel(channel) {
            return Err(Error::UnknownChannel { channel });
        }
        Ok(())
    }
}
