//! TCD file writer module.
//!
//! This module provides [`TcdWriter`], a single-pass encoder that walks an
//! in-memory [`Dataset`] and emits lines in canonical order: singleton header
//! records first, then the repeatable header groups, then all tallies, all
//! monitoring events, and all vehicle observations. Body groups keep the
//! collection's iteration order; callers sort beforehand when temporal order
//! matters.
//!
//! The writer owns its output handle for its lifetime and is meant to be used
//! as a scoped resource: every line is flushed as it is written, and the sink
//! is flushed again both by [`finalize()`](TcdWriter::finalize) and when the
//! writer is dropped on an error path.
//!
//! # Example
//!
//! ```no_run
//! use tcd_rs::{Dataset, TcdWriter, Result};
//!
//! fn save(dataset: &Dataset) -> Result<()> {
//!     let mut writer = TcdWriter::create("station_042.tcd")?;
//!     writer.write_dataset(dataset)?;
//!     writer.finalize()?;
//!     Ok(())
//! }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::{
    Result,
    body::{MonitoringEvent, VehicleRecord},
    dataset::Dataset,
    escape,
    header::Header,
    records,
    records::common::fmt_number,
    tally::{TallyRecord, parts},
    units::{StandardConverter, UnitConverter},
};

/// Writer for creating TCD files.
///
/// Lines are terminated with CRLF and flushed individually, so a partially
/// written file is intact up to its last complete line even if encoding
/// aborts midway.
pub struct TcdWriter<W: Write> {
    sink: W,
    converter: Option<Box<dyn UnitConverter>>,
}

impl TcdWriter<BufWriter<File>> {
    /// Create a writer for the given file path using a 64 KiB internal
    /// buffer. Use [`Self::create_with_capacity`] to customize the size.
    pub fn create(path: &str) -> Result<Self> {
        Self::create_with_capacity(path, 64 * 1024)
    }

    /// Create a writer with the specified `BufWriter` capacity.
    pub fn create_with_capacity(path: &str, capacity: usize) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::with_capacity(capacity, file)))
    }
}

impl<W: Write> TcdWriter<W> {
    /// Wrap an arbitrary sink.
    pub fn from_writer(sink: W) -> Self {
        TcdWriter {
            sink,
            converter: None,
        }
    }

    /// Replace the standard unit converter with a custom collaborator.
    pub fn with_converter(mut self, converter: Box<dyn UnitConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Encode a complete dataset in canonical order.
    pub fn write_dataset(&mut self, dataset: &Dataset) -> Result<()> {
        let Self { sink, converter } = self;
        let standard = StandardConverter::new(dataset.header.file.units);
        let units: &dyn UnitConverter = match converter.as_deref() {
            Some(custom) => custom,
            None => &standard,
        };

        let mut write_line = |line: &str| -> Result<()> {
            sink.write_all(line.as_bytes())?;
            sink.write_all(b"\r\n")?;
            sink.flush()?;
            Ok(())
        };

        for kind in records::CATALOG {
            if let Some(payloads) = kind.encode(&dataset.header, units) {
                for payload in payloads {
                    write_line(&format!("{};{}", kind.code(), payload))?;
                }
            }
        }
        for tally in &dataset.tallies {
            write_line(&render_tally(tally, &dataset.header, units))?;
        }
        for event in &dataset.events {
            write_line(&render_event(event))?;
        }
        for vehicle in &dataset.vehicles {
            write_line(&render_vehicle(vehicle, &dataset.header, units))?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.sink.write_all(line.as_bytes())?;
        self.sink.write_all(b"\r\n")?;
        self.sink.flush()?;
        Ok(())
    }

    /// Flush the sink and hand it back.
    pub fn finalize(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

fn render_tally(tally: &TallyRecord, header: &Header, units: &dyn UnitConverter) -> String {
    format!(
        "T;{},{},{:08},{:06};{}",
        tally.channel,
        tally.period,
        tally.timestamp.date,
        tally.timestamp.time,
        parts::encode_segments(tally, header, units)
    )
}

fn render_event(event: &MonitoringEvent) -> String {
    format!(
        "M;{:08},{:06};{};{}",
        event.timestamp.date,
        event.timestamp.time,
        escape::encode(event.kind.as_code()),
        escape::encode(&event.text)
    )
}

fn render_vehicle(vehicle: &VehicleRecord, header: &Header, units: &dyn UnitConverter) -> String {
    let layout = &header.observation;
    let mut line = format!(
        "V;{},{:08},{:06};",
        vehicle.channel, vehicle.timestamp.date, vehicle.timestamp.time
    );

    let observations: Vec<String> = vehicle
        .values
        .iter()
        .enumerate()
        .map(|(position, &value)| {
            let value = match layout.fields.get(position).and_then(|f| f.quantity()) {
                Some(quantity) => units.from_metric(quantity, value),
                None => value,
            };
            fmt_number(value)
        })
        .collect();
    line.push_str(&observations.join(","));

    for axle in &vehicle.axles {
        let values: Vec<String> = axle
            .values
            .iter()
            .enumerate()
            .map(|(position, &value)| {
                let value = match layout.axle_fields.get(position).and_then(|f| f.quantity()) {
                    Some(quantity) => units.from_metric(quantity, value),
                    None => value,
                };
                fmt_number(value)
            })
            .collect();
        line.push(';');
        line.push_str(&values.join(","));
    }
    line
}

/// Encode a dataset into a single in-memory string.
///
/// Convenience wrapper over [`TcdWriter`] writing into a byte buffer.
pub fn encode_to_string(dataset: &Dataset) -> Result<String> {
    let mut writer = TcdWriter::from_writer(Vec::new());
    writer.write_dataset(dataset)?;
    let bytes = writer.finalize()?;
    // The writer only ever emits UTF-8.
    Ok(String::from_utf8(bytes).expect("writer produced invalid UTF-8"))
}
