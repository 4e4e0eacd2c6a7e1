//! The shared read/write contract of header records, plus field helpers.
//!
//! Every header-record kind is a unit struct implementing [`HeaderRecord`].
//! The catalog in [`super`] holds one instance per kind; decode looks kinds
//! up by their two-letter code, encode walks the catalog in canonical order.

use crate::{Error, Result, header::Header, types::Timestamp, units::UnitConverter};

/// Behavior contract of one header-record kind.
///
/// Implementations parse and render only their own payload; the surrounding
/// machinery owns the `code;payload` line framing, singleton bookkeeping and
/// ordering rules.
pub trait HeaderRecord: Sync {
    /// The identifying two-letter record code.
    fn code(&self) -> &'static str;

    /// Whether the record may appear more than once per file.
    fn repeatable(&self) -> bool {
        false
    }

    /// Whether the payload may contain free text needing escaping.
    fn allows_free_text(&self) -> bool {
        false
    }

    /// Render the payloads to emit for this kind, one per line.
    ///
    /// `None` means the backing header state is absent or default and the
    /// line is omitted entirely. Repeatable kinds return one payload per
    /// element.
    fn encode(&self, header: &Header, units: &dyn UnitConverter) -> Option<Vec<String>>;

    /// Parse a raw payload and mutate the corresponding header sub-record.
    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        units: &dyn UnitConverter,
    ) -> Result<()>;
}

// ============================================================================
// Field Parsing Helpers
// ============================================================================

/// Parse an unsigned 8-bit field.
pub fn parse_u8(field: &'static str, text: &str) -> Result<u8> {
    text.trim().parse().map_err(|_| Error::ValueParse {
        field,
        value: text.into(),
    })
}

/// Parse an unsigned 16-bit field.
pub fn parse_u16(field: &'static str, text: &str) -> Result<u16> {
    text.trim().parse().map_err(|_| Error::ValueParse {
        field,
        value: text.into(),
    })
}

/// Parse an unsigned 32-bit field.
pub fn parse_u32(field: &'static str, text: &str) -> Result<u32> {
    text.trim().parse().map_err(|_| Error::ValueParse {
        field,
        value: text.into(),
    })
}

/// Parse a signed 32-bit field.
pub fn parse_i32(field: &'static str, text: &str) -> Result<i32> {
    text.trim().parse().map_err(|_| Error::ValueParse {
        field,
        value: text.into(),
    })
}

/// Parse a floating-point field.
pub fn parse_f64(field: &'static str, text: &str) -> Result<f64> {
    text.trim().parse().map_err(|_| Error::ValueParse {
        field,
        value: text.into(),
    })
}

/// Parse the `date,time` sub-field pair of a timestamp.
pub fn parse_timestamp(date: &str, time: &str) -> Result<Timestamp> {
    Ok(Timestamp {
        date: parse_u32("date", date)?,
        time: parse_u32("time", time)?,
    })
}

/// Render a number the canonical way: integral values without a decimal
/// point, fractional values in their shortest round-trip form.
pub fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Require an exact sub-field count for a record payload.
pub fn expect_fields(record: &'static str, fields: &[String], expected: usize) -> Result<()> {
    if fields.len() != expected {
        return Err(Error::MalformedRecord {
            record,
            reason: format!("expected {expected} fields, found {}", fields.len()),
        });
    }
    Ok(())
}

/// Require a minimum sub-field count for a record payload.
pub fn expect_at_least(record: &'static str, fields: &[String], minimum: usize) -> Result<()> {
    if fields.len() < minimum {
        return Err(Error::MalformedRecord {
            record,
            reason: format!("expected at least {minimum} fields, found {}", fields.len()),
        });
    }
    Ok(())
}
