#![forbid(unsafe_code)]

//! # tcd-rs
//!
//! A Rust codec for TCD (Traffic Count Data) interchange files.
//!
//! TCD is a line-oriented text format for exchanging traffic-count
//! recordings: a header block of two-letter records describes the station,
//! its channels, units and classification schemes, followed by a body of
//! time-stamped records (per-period tallies, per-vehicle observations, and
//! equipment monitoring events). Fields are separated by `;`, sub-fields by
//! `,`, with backslash escaping for reserved characters.
//!
//! ## Features
//!
//! - **Decoding**: parse a line stream into a strongly-typed [`Dataset`],
//!   with strict or lenient classification-bin validation and an optional
//!   header-only mode
//! - **Encoding**: write a dataset back out in canonical record order
//! - **Dynamic layout**: the field layout of body records is derived from
//!   the header (classification definitions, tally part order, observation
//!   field lists), not fixed
//! - **Indexing**: generate lightweight JSON summaries for archive tooling
//!   (feature `serde`, enabled by default)
//!
//! ## Quick Start
//!
//! ### Reading a TCD file
//!
//! ```no_run
//! use tcd_rs::{Dataset, Result};
//!
//! fn main() -> Result<()> {
//!     let dataset = Dataset::from_file("station_042.tcd")?;
//!
//!     println!(
//!         "station {:?}: {} channels, {} tallies",
//!         dataset.header.station.id,
//!         dataset.header.channels.len(),
//!         dataset.tallies.len()
//!     );
//!     for tally in &dataset.tallies {
//!         println!("  channel {} at {}", tally.channel, tally.timestamp);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Writing a TCD file
//!
//! ```no_run
//! use tcd_rs::{ChannelDef, Dataset, TallyRecord, TcdWriter, Timestamp, Result};
//! use tcd_rs::classification::SpeedClassification;
//!
//! fn main() -> Result<()> {
//!     let mut dataset = Dataset::new();
//!     dataset.header.station.id = Some("0042".into());
//!     dataset.header.tally.speed = Some(SpeedClassification::new("S7", 40.0, 10.0, 6));
//!     dataset.header.add_channel(ChannelDef {
//!         id: 1,
//!         direction: 1,
//!         lane: 1,
//!         description: "northbound".into(),
//!     })?;
//!
//!     let mut tally = TallyRecord::new(1, 0, Timestamp::new(20260401, 80000));
//!     tally.speed_counts = vec![12, 40, 31, 18, 7, 2, 0];
//!     dataset.add_tally(tally)?;
//!
//!     let mut writer = TcdWriter::create("out.tcd")?;
//!     writer.write_dataset(&dataset)?;
//!     writer.finalize()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`records`] | Header-record catalog and registry (for advanced use) |
//! | [`classification`] | Speed/length/vehicle-type bin systems |
//! | [`tally`] | Tally records and part-order resolution |
//! | [`body`] | Vehicle, axle and monitoring-event records |
//! | [`decode`] | Decoding state machine and options |
//! | [`writer`] | Canonical-order encoding with [`TcdWriter`] |
//! | [`escape`] | Reserved-character escaping and field splitting |
//! | [`units`] | The metric unit boundary |
//! | [`index`] | JSON dataset summaries (feature `serde`) |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Decode failures are wrapped with the
//! 1-based line number (and source identifier, when decoding from a named
//! source) at which they occurred.

pub mod classification;
pub mod escape;
pub mod records;

pub mod body;

mod dataset;
mod types;

pub mod decode;
pub mod error;
pub mod header;
#[cfg(feature = "serde")]
pub mod index;
pub mod tally;
pub mod units;
pub mod writer;

// Re-export commonly used types at the crate root
pub use body::{AxleRecord, EventKind, MonitoringEvent, VehicleRecord};
pub use dataset::Dataset;
pub use decode::{DatasetDecoder, DecodeOptions, DecodeSummary, decode_str};
pub use error::{Error, Result};
pub use header::{ChannelDef, Header};
#[cfg(feature = "serde")]
pub use index::DatasetIndex;
pub use tally::{TallyPart, TallyRecord};
pub use types::Timestamp;
pub use units::{StandardConverter, UnitConverter, UnitSystem};
pub use writer::{TcdWriter, encode_to_string};
