//! Per-vehicle and monitoring body records.

use crate::{
    header::{Header, ObservationField},
    types::Timestamp,
};

/// An axle sub-record nested inside a vehicle observation.
///
/// The identity and order of the values is declared by the header's `VA`
/// field list.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxleRecord {
    /// One scalar per declared axle field, in `VA` order. Metric storage.
    pub values: Vec<f64>,
}

/// A single observed vehicle.
///
/// The identity and order of `values` is declared by the header's `VF` field
/// list; the record itself carries no field names.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRecord {
    /// Logical channel the vehicle was observed on.
    pub channel: u16,
    /// Observation time, station-local.
    pub timestamp: Timestamp,
    /// One scalar per declared observation field, in `VF` order. Metric
    /// storage.
    pub values: Vec<f64>,
    /// Axle sub-records, if the station records per-axle data.
    pub axles: Vec<AxleRecord>,
}

impl VehicleRecord {
    /// Create an observation with no field values yet.
    pub fn new(channel: u16, timestamp: Timestamp) -> Self {
        VehicleRecord {
            channel,
            timestamp,
            ..VehicleRecord::default()
        }
    }

    /// Look up a value through the header-declared observation field order.
    ///
    /// Returns `None` when the header does not declare the field or this
    /// record carries no value at its position.
    pub fn value(&self, header: &Header, field: &ObservationField) -> Option<f64> {
        let position = header.observation.fields.iter().position(|f| f == field)?;
        self.values.get(position).copied()
    }
}

/// The well-known monitoring event vocabulary, plus a user-defined escape.
///
/// User-defined kinds are written with a `*` prefix on the wire. A code
/// outside the known set decodes into the `UserDefined` arm with its raw
/// token preserved, so it re-encodes byte-identically.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Mains power failed. Code `PF`.
    PowerFailure,
    /// Equipment restarted. Code `RS`.
    Restart,
    /// Station clock was set. Code `CS`.
    ClockSet,
    /// Cabinet or sensor tamper. Code `TM`.
    Tamper,
    /// On-device storage overflowed; records may be missing. Code `OV`.
    StorageOverflow,
    /// Sensors were calibrated. Code `CA`.
    Calibration,
    /// Any other kind, stored as its raw wire token.
    UserDefined(String),
}

impl EventKind {
    /// Create a user-defined event kind with the `*` wire prefix applied.
    pub fn user(name: &str) -> Self {
        EventKind::UserDefined(format!("*{name}"))
    }

    /// Map a wire token to an event kind. Unrecognized tokens are preserved.
    pub fn from_code(code: &str) -> Self {
        match code {
            "PF" => EventKind::PowerFailure,
            "RS" => EventKind::Restart,
            "CS" => EventKind::ClockSet,
            "TM" => EventKind::Tamper,
            "OV" => EventKind::StorageOverflow,
            "CA" => EventKind::Calibration,
            other => EventKind::UserDefined(other.into()),
        }
    }

    /// The wire token for this kind.
    pub fn as_code(&self) -> &str {
        match self {
            EventKind::PowerFailure => "PF",
            EventKind::Restart => "RS",
            EventKind::ClockSet => "CS",
            EventKind::Tamper => "TM",
            EventKind::StorageOverflow => "OV",
            EventKind::Calibration => "CA",
            EventKind::UserDefined(code) => code,
        }
    }
}

/// A monitoring event reported by the station equipment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonitoringEvent {
    /// When the event occurred, station-local.
    pub timestamp: Timestamp,
    /// Event vocabulary tag.
    pub kind: EventKind,
    /// Free-text payload.
    pub text: String,
}

impl MonitoringEvent {
    /// Create a monitoring event.
    pub fn new(timestamp: Timestamp, kind: EventKind, text: &str) -> Self {
        MonitoringEvent {
            timestamp,
            kind,
            text: text.into(),
        }
    }
}
