//! Observation layout header records: `VF` and `VA`.

use super::common::{HeaderRecord, expect_at_least};
use crate::{
    Result, escape,
    header::{AxleField, Header, ObservationField},
    units::UnitConverter,
};

/// `VF` — vehicle observation field list, in record order.
pub struct ObservationFields;

impl HeaderRecord for ObservationFields {
    fn code(&self) -> &'static str {
        "VF"
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        if header.observation.fields.is_empty() {
            return None;
        }
        let codes: Vec<String> = header
            .observation
            .fields
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
        expect_at_least("VF", &fields, 1)?;
        header.observation.fields = fields
            .iter()
            .map(|code| ObservationField::from_code(&escape::decode(code)))
            .collect();
        Ok(())
    }
}

/// `VA` — axle sub-record field list, in record order.
pub struct AxleFields;

impl HeaderRecord for AxleFields {
    fn code(&self) -> &'static str {
        "VA"
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        if header.observation.axle_fields.is_empty() {
            return None;
        }
        let codes: Vec<String> = header
            .observation
            .axle_fields
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
        expect_at_least("VA", &fields, 1)?;
        header.observation.axle_fields = fields
            .iter()
            .map(|code| AxleField::from_code(&escape::decode(code)))
            .collect();
        Ok(())
    }
}
