//! Tally layout header records: `SP`, `TT`, `TS`, `TL`, `TC`, `TO`.
//!
//! These records determine the field layout of every tally body line. Speed
//! widths and length cutoffs cross the unit boundary here: the file carries
//! them in the declared display units, the header stores them metric.

use super::common::{
    HeaderRecord, expect_at_least, expect_fields, fmt_number, parse_f64, parse_u8, parse_u16,
};
use crate::{
    Error, Result,
    classification::{
        BinSet, LengthClassification, SpeedClassification, VehicleTypeClassification,
    },
    escape,
    header::{Header, TotalField},
    tally::TallyPart,
    units::{Quantity, UnitConverter},
};

/// `SP` — sub-hourly tally interval in minutes.
pub struct TallyInterval;

impl HeaderRecord for TallyInterval {
    fn code(&self) -> &'static str {
        "SP"
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        let minutes = header.tally.interval_minutes?;
        Some(vec![minutes.to_string()])
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_fields("SP", &fields, 1)?;
        let minutes = parse_u8("interval minutes", &fields[0])?;
        if minutes == 0 || 60 % minutes != 0 {
            return Err(Error::MalformedRecord {
                record: "SP",
                reason: format!("interval {minutes} does not divide the hour"),
            });
        }
        header.tally.interval_minutes = Some(minutes);
        Ok(())
    }
}

/// `TT` — declared per-tally total fields, in record order.
pub struct TotalsDeclaration;

impl HeaderRecord for TotalsDeclaration {
    fn code(&self) -> &'static str {
        "TT"
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        if header.tally.totals.is_empty() {
            return None;
        }
        let codes: Vec<String> = header
            .tally
            .totals
            .iter()
            .map(|field| escape::encode(field.as_code()))
            .collect();
        Some(vec![codes.join(",")])
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_at_least("TT", &fields, 1)?;
        header.tally.totals = fields
            .iter()
            .map(|code| TotalField::from_code(&escape::decode(code)))
            .collect();
        Ok(())
    }
}

/// `TS` — speed classification, `name,first_width,other_width,max_bin`.
pub struct SpeedLayout;

impl HeaderRecord for SpeedLayout {
    fn code(&self) -> &'static str {
        "TS"
    }

    fn encode(&self, header: &Header, units: &dyn UnitConverter) -> Option<Vec<String>> {
        let speed = header.tally.speed.as_ref().filter(|s| s.is_recording())?;
        Some(vec![format!(
            "{},{},{},{}",
            escape::encode(&speed.name),
            fmt_number(units.from_metric(Quantity::Speed, speed.first_bin_width)),
            fmt_number(units.from_metric(Quantity::Speed, speed.other_bin_width)),
            speed.maximum_bin
        )])
    }

    fn decode(&self, header: &mut Header, payload: &str, units: &dyn UnitConverter) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_fields("TS", &fields, 4)?;
        header.tally.speed = Some(SpeedClassification {
            name: escape::decode(&fields[0]),
            first_bin_width: units.to_metric(Quantity::Speed, parse_f64("first bin width", &fields[1])?),
            other_bin_width: units.to_metric(Quantity::Speed, parse_f64("other bin width", &fields[2])?),
            maximum_bin: parse_u16("maximum bin", &fields[3])?,
        });
        Ok(())
    }
}

/// `TL` — length classification, `name,cutoff,…` with ascending cutoffs.
pub struct LengthLayout;

impl HeaderRecord for LengthLayout {
    fn code(&self) -> &'static str {
        "TL"
    }

    fn encode(&self, header: &Header, units: &dyn UnitConverter) -> Option<Vec<String>> {
        let length = header.tally.length.as_ref().filter(|l| l.is_recording())?;
        let mut fields = vec![escape::encode(&length.name)];
        for &cutoff in &length.cutoffs {
            fields.push(fmt_number(units.from_metric(Quantity::Length, cutoff)));
        }
        Some(vec![fields.join(",")])
    }

    fn decode(&self, header: &mut Header, payload: &str, units: &dyn UnitConverter) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_at_least("TL", &fields, 1)?;
        let mut cutoffs = Vec::with_capacity(fields.len() - 1);
        for field in &fields[1..] {
            let cutoff = units.to_metric(Quantity::Length, parse_f64("length cutoff", field)?);
            if let Some(&last) = cutoffs.last() {
                if cutoff <= last {
                    return Err(Error::MalformedRecord {
                        record: "TL",
                        reason: format!("cutoffs must ascend, {cutoff} follows {last}"),
                    });
                }
            }
            cutoffs.push(cutoff);
        }
        header.tally.length = Some(LengthClassification {
            name: escape::decode(&fields[0]),
            cutoffs,
        });
        Ok(())
    }
}

/// `TC` — vehicle-type classification, `name,low_id,high_id`.
pub struct VehicleTypeLayout;

impl HeaderRecord for VehicleTypeLayout {
    fn code(&self) -> &'static str {
        "TC"
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        let types = header
            .tally
            .vehicle_type
            .as_ref()
            .filter(|t| t.is_recording())?;
        Some(vec![format!(
            "{},{},{}",
            escape::encode(&types.name),
            types.lowest_id,
            types.highest_id
        )])
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_fields("TC", &fields, 3)?;
        let lowest_id = parse_u16("lowest type ID", &fields[1])?;
        let highest_id = parse_u16("highest type ID", &fields[2])?;
        if lowest_id > highest_id {
            return Err(Error::MalformedRecord {
                record: "TC",
                reason: format!("type ID range {lowest_id}..{highest_id} is inverted"),
            });
        }
        header.tally.vehicle_type = Some(VehicleTypeClassification {
            name: escape::decode(&fields[0]),
            lowest_id,
            highest_id,
        });
        Ok(())
    }
}

/// `TO` — explicit tally part order. Unknown tokens are preserved verbatim.
pub struct PartOrder;

impl HeaderRecord for PartOrder {
    fn code(&self) -> &'static str {
        "TO"
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        let order = header.tally.explicit_order.as_ref()?;
        let tokens: Vec<String> = order
            .iter()
            .map(|part| escape::encode(part.as_token()))
            .collect();
        Some(vec![tokens.join(",")])
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_at_least("TO", &fields, 1)?;
        header.tally.explicit_order = Some(
            fields
                .iter()
                .map(|token| TallyPart::from_token(&escape::decode(token)))
                .collect(),
        );
        Ok(())
    }
}
