//! Station header records: `SI`, `SD`, `SO`, `SL`, `ES`, `EC`.

use super::common::{HeaderRecord, expect_at_least, expect_fields, parse_i32, parse_u16};
use crate::{
    Result, escape,
    header::{ChannelEquipment, Header, StationEquipment, StationLabel},
    units::UnitConverter,
};

/// `SI` — station identification, `station_id,name`.
pub struct StationIdentification;

impl HeaderRecord for StationIdentification {
    fn code(&self) -> &'static str {
        "SI"
    }

    fn allows_free_text(&self) -> bool {
        true
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        let id = header.station.id.as_ref()?;
        Some(vec![format!(
            "{},{}",
            escape::encode(id),
            escape::encode(&header.station.name)
        )])
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_at_least("SI", &fields, 1)?;
        header.station.id = Some(escape::decode(&fields[0]));
        header.station.name = fields.get(1).map(|f| escape::decode(f)).unwrap_or_default();
        Ok(())
    }
}

/// `SD` — station description, free text.
pub struct StationDescription;

impl HeaderRecord for StationDescription {
    fn code(&self) -> &'static str {
        "SD"
    }

    fn allows_free_text(&self) -> bool {
        true
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        let description = header.station.description.as_ref()?;
        Some(vec![escape::encode(description)])
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        header.station.description = Some(escape::decode(payload));
        Ok(())
    }
}

/// `SO` — signed UTC offset of station-local timestamps, in minutes.
pub struct UtcOffset;

impl HeaderRecord for UtcOffset {
    fn code(&self) -> &'static str {
        "SO"
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        let minutes = header.station.utc_offset_minutes?;
        Some(vec![minutes.to_string()])
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_fields("SO", &fields, 1)?;
        header.station.utc_offset_minutes = Some(parse_i32("UTC offset", &fields[0])?);
        Ok(())
    }
}

/// `SL` — station label, `key,text`. Repeatable.
pub struct StationLabels;

impl HeaderRecord for StationLabels {
    fn code(&self) -> &'static str {
        "SL"
    }

    fn repeatable(&self) -> bool {
        true
    }

    fn allows_free_text(&self) -> bool {
        true
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        if header.station.labels.is_empty() {
            return None;
        }
        Some(
            header
                .station
                .labels
                .iter()
                .map(|label| {
                    format!(
                        "{},{}",
                        escape::encode(&label.key),
                        escape::encode(&label.text)
                    )
                })
                .collect(),
        )
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_at_least("SL", &fields, 1)?;
        header.station.labels.push(StationLabel {
            key: escape::decode(&fields[0]),
            text: fields.get(1).map(|f| escape::decode(f)).unwrap_or_default(),
        });
        Ok(())
    }
}

/// `ES` — equipment installed at the station, `serial,kind,note`. Repeatable.
pub struct StationEquipmentRecords;

impl HeaderRecord for StationEquipmentRecords {
    fn code(&self) -> &'static str {
        "ES"
    }

    fn repeatable(&self) -> bool {
        true
    }

    fn allows_free_text(&self) -> bool {
        true
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        if header.station_equipment.is_empty() {
            return None;
        }
        Some(
            header
                .station_equipment
                .iter()
                .map(|eq| {
                    format!(
                        "{},{},{}",
                        escape::encode(&eq.serial),
                        escape::encode(&eq.kind),
                        escape::encode(&eq.note)
                    )
                })
                .collect(),
        )
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_at_least("ES", &fields, 1)?;
        header.station_equipment.push(StationEquipment {
            serial: escape::decode(&fields[0]),
            kind: fields.get(1).map(|f| escape::decode(f)).unwrap_or_default(),
            note: fields.get(2).map(|f| escape::decode(f)).unwrap_or_default(),
        });
        Ok(())
    }
}

/// `EC` — equipment attached to one channel, `channel,serial,kind`. Repeatable.
pub struct ChannelEquipmentRecords;

impl HeaderRecord for ChannelEquipmentRecords {
    fn code(&self) -> &'static str {
        "EC"
    }

    fn repeatable(&self) -> bool {
        true
    }

    fn allows_free_text(&self) -> bool {
        true
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        if header.channel_equipment.is_empty() {
            return None;
        }
        Some(
            header
                .channel_equipment
                .iter()
                .map(|eq| {
                    format!(
                        "{},{},{}",
                        eq.channel,
                        escape::encode(&eq.serial),
                        escape::encode(&eq.kind)
                    )
                })
                .collect(),
        )
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_at_least("EC", &fields, 2)?;
        header.channel_equipment.push(ChannelEquipment {
            channel: parse_u16("channel", &fields[0])?,
            serial: escape::decode(&fields[1]),
            kind: fields.get(2).map(|f| escape::decode(f)).unwrap_or_default(),
        });
        Ok(())
    }
}
