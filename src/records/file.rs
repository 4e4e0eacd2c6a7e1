//! File-level header records: `FV`, `FU`, `FG` and the `FC` change log.

use super::common::{
    HeaderRecord, expect_at_least, expect_fields, parse_timestamp, parse_u8, parse_u16,
};
use crate::{
    Error, Result,
    escape,
    header::{FileChange, Header},
    units::{UnitConverter, UnitSystem},
};

/// `FV` — format version, `major,minor`.
pub struct FormatVersion;

impl HeaderRecord for FormatVersion {
    fn code(&self) -> &'static str {
        "FV"
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        let (major, minor) = header.file.version?;
        Some(vec![format!("{major},{minor}")])
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_fields("FV", &fields, 2)?;
        header.file.version = Some((
            parse_u16("version major", &fields[0])?,
            parse_u16("version minor", &fields[1])?,
        ));
        Ok(())
    }
}

/// `FU` — declared display units.
pub struct FileUnits;

impl HeaderRecord for FileUnits {
    fn code(&self) -> &'static str {
        "FU"
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        match header.file.units {
            UnitSystem::Metric => None,
            other => Some(vec![other.to_code().to_string()]),
        }
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        let fields = escape::split(payload, ',');
        expect_fields("FU", &fields, 1)?;
        let code = parse_u8("unit system", &fields[0])?;
        header.file.units = UnitSystem::from_code(code).ok_or(Error::MalformedRecord {
            record: "FU",
            reason: format!("unknown unit system code {code}"),
        })?;
        Ok(())
    }
}

/// `FG` — generating program / contact, free text.
pub struct Generator;

impl HeaderRecord for Generator {
    fn code(&self) -> &'static str {
        "FG"
    }

    fn allows_free_text(&self) -> bool {
        true
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        let generator = header.file.generator.as_ref()?;
        Some(vec![escape::encode(generator)])
    }

    fn decode(
        &self,
        header: &mut Header,
        payload: &str,
        _units: &dyn UnitConverter,
    ) -> Result<()> {
        header.file.generator = Some(escape::decode(payload));
        Ok(())
    }
}

/// `FC` — file change log entry, `date,time,editor,note`. Repeatable.
pub struct FileChangeLog;

impl HeaderRecord for FileChangeLog {
    fn code(&self) -> &'static str {
        "FC"
    }

    fn repeatable(&self) -> bool {
        true
    }

    fn allows_free_text(&self) -> bool {
        true
    }

    fn encode(&self, header: &Header, _units: &dyn UnitConverter) -> Option<Vec<String>> {
        if header.file.changes.is_empty() {
            return None;
        }
        Some(
            header
                .file
                .changes
                .iter()
                .map(|change| {
                    format!(
                        "{:08},{:06},{},{}",
                        change.timestamp.date,
                        change.timestamp.time,
                        escape::encode(&change.editor),
                        escape::encode(&change.note),
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
        expect_at_least("FC", &fields, 2)?;
        header.file.changes.push(FileChange {
            timestamp: parse_timestamp(&fields[0], &fields[1])?,
            editor: fields.get(2).map(|f| escape::decode(f)).unwrap_or_default(),
            note: fields.get(3).map(|f| escape::decode(f)).unwrap_or_default(),
        });
        Ok(())
    }
}
