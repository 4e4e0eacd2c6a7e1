//! The header-record registry.
//!
//! The format's header record set is fixed and finite: each kind has a
//! two-letter code and owns its payload layout through the [`HeaderRecord`]
//! contract. [`CATALOG`] lists every kind in canonical encode order —
//! singleton records first, then the repeatable groups — and [`lookup`]
//! resolves a code for decode dispatch.

pub mod common;

mod channel;
mod file;
mod observation_layout;
mod station;
mod tally_layout;

pub use common::HeaderRecord;

pub use channel::ChannelDefinitions;
pub use file::{FileChangeLog, FileUnits, FormatVersion, Generator};
pub use observation_layout::{AxleFields, ObservationFields};
pub use station::{
    ChannelEquipmentRecords, StationDescription, StationEquipmentRecords, StationIdentification,
    StationLabels, UtcOffset,
};
pub use tally_layout::{
    LengthLayout, PartOrder, SpeedLayout, TallyInterval, TotalsDeclaration, VehicleTypeLayout,
};

/// Every header-record kind, in canonical encode order.
///
/// Singletons come first; the repeatable kinds (change log, channel
/// definitions, station labels, station equipment, channel equipment) follow
/// as groups. The encoder walks this slice top to bottom.
pub static CATALOG: &[&dyn HeaderRecord] = &[
    // Singletons.
    &FormatVersion,
    &FileUnits,
    &Generator,
    &StationIdentification,
    &StationDescription,
    &UtcOffset,
    &TallyInterval,
    &TotalsDeclaration,
    &SpeedLayout,
    &LengthLayout,
    &VehicleTypeLayout,
    &PartOrder,
    &ObservationFields,
    &AxleFields,
    // Repeatable groups.
    &FileChangeLog,
    &ChannelDefinitions,
    &StationLabels,
    &StationEquipmentRecords,
    &ChannelEquipmentRecords,
];

/// Resolve a two-letter record code to its kind, if the catalog knows it.
pub fn lookup(code: &str) -> Option<&'static dyn HeaderRecord> {
    CATALOG.iter().copied().find(|kind| kind.code() == code)
}
