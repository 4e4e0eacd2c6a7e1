//! Tally part tokens, order resolution, and the per-part segment codec.

use super::TallyRecord;
use crate::{
    Error, Result,
    classification::BinSet,
    decode::DecodeOptions,
    escape,
    header::{Header, TotalField},
    records::common::{fmt_number, parse_f64, parse_u32},
    units::UnitConverter,
};

/// One component of a tally body line.
///
/// The `Unknown` arm carries a part token outside the known set verbatim;
/// explicit part orders using forward-compatible extensions survive a
/// decode/encode cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TallyPart {
    /// Declared total fields, one value each. Token `T`.
    Totals,
    /// Vehicle-type bins. Token `C`.
    VehicleType,
    /// Speed bins. Token `S`.
    Speed,
    /// Length bins. Token `L`.
    Length,
    /// A token outside the known set, preserved verbatim.
    Unknown(String),
}

impl TallyPart {
    /// Map a wire token to a part. Unknown tokens are preserved.
    pub fn from_token(token: &str) -> Self {
        match token {
            "T" => TallyPart::Totals,
            "C" => TallyPart::VehicleType,
            "S" => TallyPart::Speed,
            "L" => TallyPart::Length,
            other => TallyPart::Unknown(other.into()),
        }
    }

    /// The wire token for this part.
    pub fn as_token(&self) -> &str {
        match self {
            TallyPart::Totals => "T",
            TallyPart::VehicleType => "C",
            TallyPart::Speed => "S",
            TallyPart::Length => "L",
            TallyPart::Unknown(token) => token,
        }
    }
}

/// Resolve the ordered list of parts composing each tally line.
///
/// An explicit `TO` record is used verbatim, unknown tokens included.
/// Otherwise the order is derived with the fixed precedence Totals,
/// VehicleType, Speed, Length, including only components the header actually
/// declares as recording. Derivation depends on header state alone, so the
/// result is deterministic for a given header.
pub fn resolve(header: &Header) -> Vec<TallyPart> {
    if let Some(order) = &header.tally.explicit_order {
        return order.clone();
    }

    let layout = &header.tally;
    let mut parts = Vec::new();
    if !layout.totals.is_empty() {
        parts.push(TallyPart::Totals);
    }
    if layout.vehicle_type.as_ref().is_some_and(|c| c.is_recording()) {
        parts.push(TallyPart::VehicleType);
    }
    if layout.speed.as_ref().is_some_and(|c| c.is_recording()) {
        parts.push(TallyPart::Speed);
    }
    if layout.length.as_ref().is_some_and(|c| c.is_recording()) {
        parts.push(TallyPart::Length);
    }
    parts
}

fn declared_bins<C: BinSet>(classification: Option<&C>) -> usize {
    classification
        .filter(|c| c.is_recording())
        .map(|c| c.number_of_bins_in_record())
        .unwrap_or(0)
}

/// Decode one classification segment into a count array.
///
/// Under strict mode the value count must equal the declared bin count.
/// Under lenient mode the array is sized to the declared count, zero-padding
/// missing bins and dropping excess positions.
fn decode_counts(
    raw: &str,
    classification: &'static str,
    bins: usize,
    strict: bool,
) -> Result<Vec<u32>> {
    let mut counts = Vec::with_capacity(bins);
    if !raw.is_empty() {
        for value in escape::split(raw, ',') {
            counts.push(parse_u32("bin count", &value)?);
        }
    }
    if strict && counts.len() != bins {
        return Err(Error::BinCountMismatch {
            classification,
            expected: bins,
            actual: counts.len(),
        });
    }
    counts.resize(bins, 0);
    Ok(counts)
}

fn decode_totals(
    raw: &str,
    declared: &[TotalField],
    units: &dyn UnitConverter,
) -> Result<Vec<f64>> {
    let values = if raw.is_empty() {
        Vec::new()
    } else {
        escape::split(raw, ',')
    };
    let mut totals = Vec::with_capacity(declared.len());
    for (position, field) in declared.iter().enumerate() {
        let value = match values.get(position) {
            Some(text) if !text.is_empty() => parse_f64("total", text)?,
            _ => 0.0,
        };
        let value = match field.quantity() {
            Some(quantity) => units.to_metric(quantity, value),
            None => value,
        };
        totals.push(value);
    }
    Ok(totals)
}

/// Decode a tally line's part segments into `record`.
///
/// `segments` are the semicolon-delimited fields after the address field,
/// with the structural trailing terminator already stripped. Each resolved
/// part consumes the next segment; a missing segment reads as empty.
pub(crate) fn decode_segments(
    record: &mut TallyRecord,
    segments: &[String],
    header: &Header,
    opts: &DecodeOptions,
    units: &dyn UnitConverter,
) -> Result<()> {
    let layout = &header.tally;
    for (position, part) in resolve(header).iter().enumerate() {
        let raw = segments.get(position).map(String::as_str).unwrap_or("");
        match part {
            TallyPart::Totals => {
                record.totals = decode_totals(raw, &layout.totals, units)?;
            }
            TallyPart::VehicleType => {
                record.vehicle_type_counts = decode_counts(
                    raw,
                    "vehicle-type",
                    declared_bins(layout.vehicle_type.as_ref()),
                    opts.strict_vehicle_type_bins,
                )?;
            }
            TallyPart::Speed => {
                record.speed_counts = decode_counts(
                    raw,
                    "speed",
                    declared_bins(layout.speed.as_ref()),
                    opts.strict_speed_bins,
                )?;
            }
            TallyPart::Length => {
                record.length_counts = decode_counts(
                    raw,
                    "length",
                    declared_bins(layout.length.as_ref()),
                    opts.strict_length_bins,
                )?;
            }
            TallyPart::Unknown(token) => {
                record.unknown_parts.push((token.clone(), raw.to_string()));
            }
        }
    }
    Ok(())
}

fn encode_counts(counts: &[u32], bins: usize) -> String {
    let mut rendered = Vec::with_capacity(bins);
    for position in 0..bins {
        rendered.push(counts.get(position).copied().unwrap_or(0).to_string());
    }
    rendered.join(",")
}

fn encode_totals(totals: &[f64], declared: &[TotalField], units: &dyn UnitConverter) -> String {
    let mut rendered = Vec::with_capacity(declared.len());
    for (position, field) in declared.iter().enumerate() {
        let value = totals.get(position).copied().unwrap_or(0.0);
        let value = match field.quantity() {
            Some(quantity) => units.from_metric(quantity, value),
            None => value,
        };
        rendered.push(fmt_number(value));
    }
    rendered.join(",")
}

/// Encode a tally's part segments in canonical part order.
///
/// Each part renders one comma-joined segment; segments are separated by
/// semicolons and followed by a trailing semicolon, the structural terminator
/// of the tally line.
pub(crate) fn encode_segments(
    record: &TallyRecord,
    header: &Header,
    units: &dyn UnitConverter,
) -> String {
    let layout = &header.tally;
    // Unknown parts are matched up by token, consuming duplicates in order.
    let mut unknown_used = vec![false; record.unknown_parts.len()];
    let mut segments = Vec::new();
    for part in resolve(header) {
        let segment = match &part {
            TallyPart::Totals => encode_totals(&record.totals, &layout.totals, units),
            TallyPart::VehicleType => encode_counts(
                &record.vehicle_type_counts,
                declared_bins(layout.vehicle_type.as_ref()),
            ),
            TallyPart::Speed => {
                encode_counts(&record.speed_counts, declared_bins(layout.speed.as_ref()))
            }
            TallyPart::Length => {
                encode_counts(&record.length_counts, declared_bins(layout.length.as_ref()))
            }
            TallyPart::Unknown(token) => record
                .unknown_parts
                .iter()
                .zip(unknown_used.iter_mut())
                .find(|((stored, _), used)| stored == token && !**used)
                .map(|((_, raw), used)| {
                    *used = true;
                    raw.clone()
                })
                .unwrap_or_default(),
        };
        segments.push(segment);
    }
    let mut rendered = segments.join(";");
    rendered.push(';');
    rendered
}
