//! The in-memory header model.
//!
//! A dataset has exactly one logical [`Header`], a composite of independently
//! owned sub-records: file metadata, station metadata, channel definitions,
//! labels and equipment, the tally layout (classification definitions and
//! part order) and the observation layout (vehicle/axle field lists). The
//! header is built incrementally while header lines are decoded and its field
//! layout is treated as frozen once the first body record arrives.

mod fields;

pub use fields::{AxleField, ObservationField, TotalField};

use crate::{
    Error, Result,
    classification::{LengthClassification, SpeedClassification, VehicleTypeClassification},
    tally::TallyPart,
    types::Timestamp,
    units::UnitSystem,
};

/// File-level metadata: format version, units, generator, change log.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileInfo {
    /// Format version as `(major, minor)` from the `FV` record.
    pub version: Option<(u16, u16)>,
    /// Display units declared by the `FU` record. Storage is always metric.
    pub units: UnitSystem,
    /// Generating program / contact from the `FG` record.
    pub generator: Option<String>,
    /// File change log, one entry per `FC` record, in file order.
    pub changes: Vec<FileChange>,
}

/// One entry of the file change log (`FC` record).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileChange {
    /// When the change was made, station-local.
    pub timestamp: Timestamp,
    /// Who or what edited the file.
    pub editor: String,
    /// Free-text description of the change.
    pub note: String,
}

/// Station metadata: identity, description, time offset, labels.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationInfo {
    /// Station identifier from the `SI` record.
    pub id: Option<String>,
    /// Station display name from the `SI` record.
    pub name: String,
    /// Free-text station description from the `SD` record.
    pub description: Option<String>,
    /// Signed UTC offset of station-local timestamps, minutes (`SO` record).
    pub utc_offset_minutes: Option<i32>,
    /// Station labels, one per `SL` record.
    pub labels: Vec<StationLabel>,
}

/// A keyed station label (`SL` record).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationLabel {
    /// Label key.
    pub key: String,
    /// Label text.
    pub text: String,
}

/// A channel definition (`CD` record).
///
/// A channel is a logical counting point identified by a small integer ID,
/// declared once in the header and referenced by every body record.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelDef {
    /// Logical channel ID.
    pub id: u16,
    /// Compass direction code of the counted traffic.
    pub direction: u8,
    /// Lane number within the direction.
    pub lane: u8,
    /// Free-text description.
    pub description: String,
}

/// Equipment installed at the station (`ES` record).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationEquipment {
    /// Serial number.
    pub serial: String,
    /// Equipment kind.
    pub kind: String,
    /// Free-text note.
    pub note: String,
}

/// Equipment attached to a single channel (`EC` record).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelEquipment {
    /// Logical channel ID the equipment serves.
    pub channel: u16,
    /// Serial number.
    pub serial: String,
    /// Equipment kind.
    pub kind: String,
}

/// Tally layout: interval, totals, classification definitions, part order.
///
/// This sub-record determines the field layout of every tally body line.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TallyLayout {
    /// Sub-hourly tally interval in minutes (`SP` record). `None` means the
    /// station records full hours only.
    pub interval_minutes: Option<u8>,
    /// Total fields recorded per tally, in record order (`TT` record).
    pub totals: Vec<TotalField>,
    /// Speed classification (`TS` record), if the station bins by speed.
    pub speed: Option<SpeedClassification>,
    /// Length classification (`TL` record), if the station bins by length.
    pub length: Option<LengthClassification>,
    /// Vehicle-type classification (`TC` record), if the station bins by type.
    pub vehicle_type: Option<VehicleTypeClassification>,
    /// Explicit tally part order (`TO` record). `None` derives the order from
    /// the declared classifications.
    pub explicit_order: Option<Vec<TallyPart>>,
}

/// Observation layout: the field lists of vehicle and axle records.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationLayout {
    /// Scalar fields of each vehicle record, in record order (`VF` record).
    pub fields: Vec<ObservationField>,
    /// Scalar fields of each axle sub-record, in record order (`VA` record).
    pub axle_fields: Vec<AxleField>,
}

/// The complete dataset header.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// File metadata.
    pub file: FileInfo,
    /// Station metadata.
    pub station: StationInfo,
    /// Channel definitions, keyed by logical channel ID.
    pub channels: Vec<ChannelDef>,
    /// Equipment installed at the station.
    pub station_equipment: Vec<StationEquipment>,
    /// Equipment attached to individual channels.
    pub channel_equipment: Vec<ChannelEquipment>,
    /// Tally body-record layout.
    pub tally: TallyLayout,
    /// Vehicle/axle body-record layout.
    pub observation: ObservationLayout,
}

impl Header {
    /// An empty header with every sub-record at its default.
    pub fn new() -> Self {
        Header::default()
    }

    /// Look up a channel definition by logical ID.
    pub fn channel(&self, id: u16) -> Option<&ChannelDef> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// Whether the header declares the given channel.
    pub fn has_channel(&self, id: u16) -> bool {
        self.channel(id).is_some()
    }

    /// Declare a channel.
    ///
    /// # Errors
    /// [`Error::ChannelIdTaken`] if the logical ID is already declared.
    pub fn add_channel(&mut self, def: ChannelDef) -> Result<()> {
        if self.has_channel(def.id) {
            return Err(Error::ChannelIdTaken { channel: def.id });
        }
        self.channels.push(def);
        Ok(())
    }

    /// Remap a logical channel ID across the header.
    ///
    /// Updates the channel definition and every channel-equipment record in
    /// one pass. Body records are remapped by
    /// [`Dataset::renumber_channel`](crate::Dataset::renumber_channel), which
    /// calls this.
    ///
    /// # Errors
    /// [`Error::UnknownChannel`] if `old` is not declared,
    /// [`Error::ChannelIdTaken`] if `new` already is.
    pub fn renumber_channel(&mut self, old: u16, new: u16) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if self.has_channel(new) {
            return Err(Error::ChannelIdTaken { channel: new });
        }
        let def = self
            .channels
            .iter_mut()
            .find(|c| c.id == old)
            .ok_or(Error::UnknownChannel { channel: old })?;
        def.id = new;
        for eq in &mut self.channel_equipment {
            if eq.channel == old {
                eq.channel = new;
            }
        }
        Ok(())
    }
}
