//! Line-by-line dataset decoding.
//!
//! [`DatasetDecoder`] is a state machine over the line sequence of a TCD
//! file. Lines are classified by their record-type prefix: comments are
//! dropped, header lines are routed through the record registry, body lines
//! are mapped against the already-decoded header layout. All header lines
//! must precede all body lines; the first body-type line flips the decoder
//! into its body state implicitly.
//!
//! Any failure while decoding a line is wrapped with the 1-based line number
//! and, when decoding from a named source, the source identifier.

use std::collections::BTreeSet;

use crate::{
    Error, Result,
    body::{AxleRecord, EventKind, MonitoringEvent, VehicleRecord},
    dataset::Dataset,
    escape,
    records::{
        self,
        common::{expect_fields, parse_f64, parse_timestamp, parse_u8, parse_u16},
    },
    tally::{TallyRecord, parts},
    units::{StandardConverter, UnitConverter},
};

/// Configuration threaded into every decode call.
///
/// There is no process-wide decoding state; callers construct the options
/// they want and pass them in.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Fail when a tally's vehicle-type segment length disagrees with the
    /// declared bin count. Lenient mode re-sizes silently instead.
    pub strict_vehicle_type_bins: bool,
    /// As above, for the speed segment.
    pub strict_speed_bins: bool,
    /// As above, for the length segment.
    pub strict_length_bins: bool,
    /// Decode body records. When `false` the decoder halts at the first
    /// body-type line without consuming it, leaving a header-only dataset.
    pub add_body: bool,
    /// Identifier of the input, included in decode error messages.
    pub source: Option<String>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            strict_vehicle_type_bins: true,
            strict_speed_bins: true,
            strict_length_bins: true,
            add_body: true,
            source: None,
        }
    }
}

impl DecodeOptions {
    /// Strict defaults with every bin-length assertion enabled.
    pub fn new() -> Self {
        DecodeOptions::default()
    }

    /// Disable every bin-length assertion, tolerating legacy data.
    pub fn lenient() -> Self {
        DecodeOptions {
            strict_vehicle_type_bins: false,
            strict_speed_bins: false,
            strict_length_bins: false,
            ..DecodeOptions::default()
        }
    }

    /// Decode the header only, halting before the first body record.
    pub fn header_only(mut self) -> Self {
        self.add_body = false;
        self
    }

    /// Attach a source identifier for error messages.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Counters of what a decode run consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Lines consumed, blank and comment lines included.
    pub lines: usize,
    /// Comment lines dropped.
    pub comments: usize,
    /// Header records decoded.
    pub header_records: usize,
    /// Tally records decoded.
    pub tallies: usize,
    /// Vehicle observations decoded.
    pub vehicles: usize,
    /// Monitoring events decoded.
    pub events: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Body,
    Done,
}

/// The decoding state machine.
///
/// Feed lines with [`push_line`](Self::push_line); take the result with
/// [`finish`](Self::finish). For whole inputs, [`decode_str`] wraps the loop.
pub struct DatasetDecoder {
    opts: DecodeOptions,
    converter: Option<Box<dyn UnitConverter>>,
    standard: StandardConverter,
    dataset: Dataset,
    summary: DecodeSummary,
    state: State,
    seen_singletons: BTreeSet<&'static str>,
    line_no: usize,
}

impl DatasetDecoder {
    /// Create a decoder with the given options.
    pub fn new(opts: DecodeOptions) -> Self {
        DatasetDecoder {
            opts,
            converter: None,
            standard: StandardConverter::default(),
            dataset: Dataset::new(),
            summary: DecodeSummary::default(),
            state: State::Header,
            seen_singletons: BTreeSet::new(),
            line_no: 0,
        }
    }

    /// Replace the standard unit converter with a custom collaborator.
    pub fn with_converter(mut self, converter: Box<dyn UnitConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Consume one input line.
    ///
    /// Returns `Ok(true)` while the decoder accepts further lines and
    /// `Ok(false)` once it has halted (header-only mode reached the body).
    /// The halting line itself is not consumed.
    pub fn push_line(&mut self, line: &str) -> Result<bool> {
        if self.state == State::Done {
            return Ok(false);
        }
        self.line_no += 1;
        self.summary.lines += 1;

        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return Ok(true);
        }
        if line.starts_with('#') {
            self.summary.comments += 1;
            return Ok(true);
        }

        let consumed = self
            .dispatch(line)
            .map_err(|e| e.at_line(self.line_no, self.opts.source.as_deref()))?;
        if !consumed {
            // Header-only halt: the line was classified but not consumed.
            self.summary.lines -= 1;
            self.line_no -= 1;
            self.state = State::Done;
        }
        Ok(consumed)
    }

    /// End the input and return the dataset with its summary.
    pub fn finish(mut self) -> (Dataset, DecodeSummary) {
        self.state = State::Done;
        (self.dataset, self.summary)
    }

    fn dispatch(&mut self, line: &str) -> Result<bool> {
        let fields = escape::split(line, ';');
        let code = fields[0].as_str();
        match code {
            "T" | "V" | "M" => {
                if self.state == State::Header && !self.opts.add_body {
                    return Ok(false);
                }
                self.state = State::Body;
                match code {
                    "T" => {
                        self.decode_tally(&fields)?;
                        self.summary.tallies += 1;
                    }
                    "V" => {
                        self.decode_vehicle(&fields)?;
                        self.summary.vehicles += 1;
                    }
                    _ => {
                        self.decode_event(&fields)?;
                        self.summary.events += 1;
                    }
                }
                Ok(true)
            }
            _ => {
                self.decode_header(code, line)?;
                self.summary.header_records += 1;
                Ok(true)
            }
        }
    }

    fn decode_header(&mut self, code: &str, line: &str) -> Result<()> {
        let Some(kind) = records::lookup(code) else {
            return Err(Error::UnknownRecordCode { code: code.into() });
        };
        if self.state == State::Body {
            return Err(Error::HeaderAfterBody { code: code.into() });
        }
        if !kind.repeatable() && !self.seen_singletons.insert(kind.code()) {
            return Err(Error::DuplicateRecord { code: code.into() });
        }

        // Payload is the raw remainder after the code and its separator;
        // record kinds own their sub-field structure.
        let payload = line.get(code.len() + 1..).unwrap_or("");
        let units: &dyn UnitConverter = match &self.converter {
            Some(custom) => custom.as_ref(),
            None => &self.standard,
        };
        kind.decode(&mut self.dataset.header, payload, units)?;

        // Layout records that follow convert against the declared units.
        if kind.code() == "FU" {
            self.standard = StandardConverter::new(self.dataset.header.file.units);
        }
        Ok(())
    }

    fn units(&self) -> &dyn UnitConverter {
        match &self.converter {
            Some(custom) => custom.as_ref(),
            None => &self.standard,
        }
    }

    fn require_channel(&self, channel: u16) -> Result<()> {
        if !self.dataset.header.has_channel(channel) {
            return Err(Error::UnknownChannel { channel });
        }
        Ok(())
    }

    fn decode_tally(&mut self, fields: &[String]) -> Result<()> {
        let address = escape::split(fields.get(1).map(String::as_str).unwrap_or(""), ',');
        expect_fields("T", &address, 4)?;
        let channel = parse_u16("channel", &address[0])?;
        self.require_channel(channel)?;

        let mut record = TallyRecord::new(
            channel,
            parse_u8("period", &address[1])?,
            parse_timestamp(&address[2], &address[3])?,
        );

        let mut segments = fields[2..].to_vec();
        if segments.last().is_some_and(String::is_empty) {
            // Structural terminator, not a delimiter for a following field.
            segments.pop();
        }
        parts::decode_segments(
            &mut record,
            &segments,
            &self.dataset.header,
            &self.opts,
            self.units(),
        )?;
        self.dataset.tallies.push(record);
        Ok(())
    }

    fn decode_vehicle(&mut self, fields: &[String]) -> Result<()> {
        let address = escape::split(fields.get(1).map(String::as_str).unwrap_or(""), ',');
        expect_fields("V", &address, 3)?;
        let channel = parse_u16("channel", &address[0])?;
        self.require_channel(channel)?;

        let mut record = VehicleRecord::new(channel, parse_timestamp(&address[1], &address[2])?);

        let layout = &self.dataset.header.observation;
        let obs_raw = fields.get(2).map(String::as_str).unwrap_or("");
        if !obs_raw.is_empty() {
            for (position, value) in escape::split(obs_raw, ',').iter().enumerate() {
                let value = parse_f64("observation value", value)?;
                // Values beyond the declared field list carry no known
                // quantity and cross the unit boundary unchanged.
                let value = match layout.fields.get(position).and_then(|f| f.quantity()) {
                    Some(quantity) => self.units().to_metric(quantity, value),
                    None => value,
                };
                record.values.push(value);
            }
        }

        let mut axle_segments = fields.get(3..).unwrap_or(&[]).to_vec();
        if axle_segments.last().is_some_and(String::is_empty) {
            axle_segments.pop();
        }
        for segment in &axle_segments {
            let mut axle = AxleRecord::default();
            for (position, value) in escape::split(segment, ',').iter().enumerate() {
                let value = parse_f64("axle value", value)?;
                let value = match layout.axle_fields.get(position).and_then(|f| f.quantity()) {
                    Some(quantity) => self.units().to_metric(quantity, value),
                    None => value,
                };
                axle.values.push(value);
            }
            record.axles.push(axle);
        }

        self.dataset.vehicles.push(record);
        Ok(())
    }

    fn decode_event(&mut self, fields: &[String]) -> Result<()> {
        let address = escape::split(fields.get(1).map(String::as_str).unwrap_or(""), ',');
        expect_fields("M", &address, 2)?;
        let timestamp = parse_timestamp(&address[0], &address[1])?;

        let kind = EventKind::from_code(&escape::decode(
            fields.get(2).map(String::as_str).unwrap_or(""),
        ));
        let text = fields.get(3).map(|f| escape::decode(f)).unwrap_or_default();

        self.dataset
            .events
            .push(MonitoringEvent { timestamp, kind, text });
        Ok(())
    }
}

/// Decode a complete input held in memory.
///
/// Lines are fed to a [`DatasetDecoder`] until it halts or the input ends.
pub fn decode_str(text: &str, opts: DecodeOptions) -> Result<(Dataset, DecodeSummary)> {
    let mut decoder = DatasetDecoder::new(opts);
    for line in text.lines() {
        if !decoder.push_line(line)? {
            break;
        }
    }
    Ok(decoder.finish())
}
