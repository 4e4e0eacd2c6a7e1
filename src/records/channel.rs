//! The `CD` channel definition record.

use super::common::{HeaderRecord, expect_at_least, parse_u8, parse_u16};
use crate::{
    Result, escape,
    header::{ChannelDef, Header},
    units::UnitConverter,
};

/// `CD` — channel definition, `id,direction,lane,description`. Repeatable.
///
/// A duplicate logical channel ID is rejected; body records rely on IDs being
/// unique.
pub struct ChannelDefinitions;

impl HeaderRecord for ChannelDefinitions {
    fn code(&self) -> &'static str {
        "CD"
    }

    fn repeatable(&self) -> bool {
        true
    }

    fn allows_free_text(&self) -> bool {
        true
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        if header.channels.is_empty() {
            return None;
        }
        Some(
            header
                .channels
                .iter()
                .map(|channel| {
                    format!(
                        "{},{},{},{}",
                        channel.id,
                        channel.direction,
                        channel.lane,
                        escape::encode(&channel.description)
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
        expect_at_least("CD", &fields, 3)?;
        header.add_channel(ChannelDef {
            id: parse_u16("channel", &fields[0])?,
            direction: parse_u8("direction", &fields[1])?,
            lane: parse_u8("lane", &fields[2])?,
            description: fields.get(3).map(|f| escape::decode(f)).unwrap_or_default(),
        })
    }
}
