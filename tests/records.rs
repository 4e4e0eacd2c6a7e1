//! Header-record registry coverage: catalog lookup, payload parsing, and
//! per-kind encode round trips.

use tcd_rs::header::TotalField;
use tcd_rs::records::{CATALOG, lookup};
use tcd_rs::tally::TallyPart;
use tcd_rs::units::{Quantity, StandardConverter, UnitConverter, UnitSystem};
use tcd_rs::{Dataset, DecodeOptions, Error, Result, decode_str, encode_to_string};

fn decode_header(lines: &[&str]) -> Result<Dataset> {
    let text = lines.join("\n");
    decode_str(&text, DecodeOptions::new()).map(|(dataset, _)| dataset)
}

#[test]
fn catalog_lookup_by_code() {
    for kind in CATALOG {
        let found = lookup(kind.code()).expect("catalog code must resolve");
        assert_eq!(found.code(), kind.code());
    }
    assert!(lookup("ZZ").is_none());
    assert!(lookup("T").is_none());
}

#[test]
fn catalog_places_singletons_before_repeatables() {
    let first_repeatable = CATALOG
        .iter()
        .position(|kind| kind.repeatable())
        .expect("catalog has repeatable kinds");
    for kind in &CATALOG[first_repeatable..] {
        assert!(
            kind.repeatable(),
            "{} breaks the singleton/repeatable split",
            kind.code()
        );
    }
}

#[test]
fn file_records_populate_file_info() -> Result<()> {
    let dataset = decode_header(&[
        "FV;1,4",
        "FG;counter-suite 2.1",
        "FC;20260102,000930,jdoe,initial import",
        "FC;20260103,101500,asmith,relabeled channels",
    ])?;
    assert_eq!(dataset.header.file.version, Some((1, 4)));
    assert_eq!(dataset.header.file.generator.as_deref(), Some("counter-suite 2.1"));
    assert_eq!(dataset.header.file.changes.len(), 2);
    assert_eq!(dataset.header.file.changes[0].editor, "jdoe");
    assert_eq!(dataset.header.file.changes[1].timestamp.time, 101500);
    Ok(())
}

#[test]
fn station_records_populate_station_info() -> Result<()> {
    let dataset = decode_header(&[
        "SI;0042,Route 7 North",
        "SD;Bridge deck counter",
        "SO;-300",
        "SL;owner,Canton X",
        "ES;A881,loop counter,main cabinet",
        "CD;3,1,1,northbound",
        "EC;3,L-204,induction loop",
    ])?;
    let station = &dataset.header.station;
    assert_eq!(station.id.as_deref(), Some("0042"));
    assert_eq!(station.name, "Route 7 North");
    assert_eq!(station.description.as_deref(), Some("Bridge deck counter"));
    assert_eq!(station.utc_offset_minutes, Some(-300));
    assert_eq!(station.labels[0].key, "owner");
    assert_eq!(dataset.header.station_equipment[0].serial, "A881");
    assert_eq!(dataset.header.channel_equipment[0].channel, 3);
    Ok(())
}

#[test]
fn layout_records_populate_tally_layout() -> Result<()> {
    let dataset = decode_header(&[
        "SP;30",
        "TT;V,A,Q9",
        "TS;S11,40,5,10",
        "TL;L4,6.5,21.5,49",
        "TC;SWISS10,1,10",
        "TO;T,S,X",
    ])?;
    let layout = &dataset.header.tally;
    assert_eq!(layout.interval_minutes, Some(30));
    assert_eq!(
        layout.totals,
        vec![
            TotalField::Volume,
            TotalField::AverageSpeed,
            TotalField::UserDefined("Q9".into())
        ]
    );
    assert_eq!(layout.speed.as_ref().unwrap().first_bin_width, 40.0);
    assert_eq!(layout.length.as_ref().unwrap().cutoffs, vec![6.5, 21.5, 49.0]);
    assert_eq!(layout.vehicle_type.as_ref().unwrap().highest_id, 10);
    assert_eq!(
        layout.explicit_order,
        Some(vec![
            TallyPart::Totals,
            TallyPart::Speed,
            TallyPart::Unknown("X".into())
        ])
    );
    Ok(())
}

#[test]
fn interval_must_divide_the_hour() {
    let err = decode_header(&["SP;7"]).unwrap_err();
    match err {
        Error::Decode { line: 1, cause, .. } => {
            assert!(matches!(*cause, Error::MalformedRecord { record: "SP", .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn length_cutoffs_must_ascend() {
    let err = decode_header(&["TL;L3,6.5,6.0"]).unwrap_err();
    match err {
        Error::Decode { cause, .. } => {
            assert!(matches!(*cause, Error::MalformedRecord { record: "TL", .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn duplicate_singleton_is_rejected() {
    let err = decode_header(&["FV;1,0", "FV;1,1"]).unwrap_err();
    match err {
        Error::Decode { line, cause, .. } => {
            assert_eq!(line, 2);
            assert!(matches!(*cause, Error::DuplicateRecord { ref code } if code == "FV"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn repeatable_records_may_repeat() -> Result<()> {
    let dataset = decode_header(&["CD;1,1,1,a", "CD;2,5,1,b", "SL;x,1", "SL;y,2"])?;
    assert_eq!(dataset.header.channels.len(), 2);
    assert_eq!(dataset.header.station.labels.len(), 2);
    Ok(())
}

#[test]
fn duplicate_channel_id_is_rejected() {
    let err = decode_header(&["CD;1,1,1,a", "CD;1,5,1,b"]).unwrap_err();
    match err {
        Error::Decode { line: 2, cause, .. } => {
            assert!(matches!(*cause, Error::ChannelIdTaken { channel: 1 }));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn free_text_survives_reserved_characters() -> Result<()> {
    let mut dataset = Dataset::new();
    dataset.header.station.id = Some("A;1".into());
    dataset.header.station.name = "north; east, or\nboth\\neither".into();
    dataset.header.file.generator = Some("suite; v2,0".into());

    let encoded = encode_to_string(&dataset)?;
    let decoded = Dataset::from_str(&encoded)?;
    assert_eq!(decoded.header.station, dataset.header.station);
    assert_eq!(decoded.header.file.generator, dataset.header.file.generator);
    Ok(())
}

#[test]
fn imperial_layout_records_convert_to_metric() -> Result<()> {
    let dataset = decode_header(&["FU;1", "TS;S5,25,5,4", "TL;L2,20"])?;
    assert_eq!(dataset.header.file.units, UnitSystem::Imperial);

    let speed = dataset.header.tally.speed.as_ref().unwrap();
    assert!((speed.first_bin_width - 25.0 * 1.609344).abs() < 1e-9);
    assert!((speed.other_bin_width - 5.0 * 1.609344).abs() < 1e-9);

    let length = dataset.header.tally.length.as_ref().unwrap();
    assert!((length.cutoffs[0] - 20.0 * 0.3048).abs() < 1e-9);
    Ok(())
}

#[test]
fn standard_converter_is_involutive() {
    let imperial = StandardConverter::new(UnitSystem::Imperial);
    for quantity in [Quantity::Speed, Quantity::Length, Quantity::Weight] {
        let metric = imperial.to_metric(quantity, 12.5);
        assert!((imperial.from_metric(quantity, metric) - 12.5).abs() < 1e-9);
    }

    let metric = StandardConverter::new(UnitSystem::Metric);
    assert_eq!(metric.to_metric(Quantity::Speed, 88.0), 88.0);
}

#[test]
fn unknown_unit_code_is_rejected() {
    let err = decode_header(&["FU;9"]).unwrap_err();
    match err {
        Error::Decode { cause, .. } => {
            assert!(matches!(*cause, Error::MalformedRecord { record: "FU", .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn header_round_trip_preserves_every_kind() -> Result<()> {
    let lines = [
        "FV;1,0",
        "SI;0042,Route 7 North",
        "SD;Bridge deck counter",
        "SO;60",
        "SP;30",
        "TT;V,A",
        "TS;S11,40,5,10",
        "TL;L4,6.5,21.5,49",
        "TC;SWISS10,1,5",
        "TO;T,C,S,L",
        "VF;SP,LE,C1",
        "VA;WT,SP",
        "FC;20260102,000930,jdoe,initial import",
        "CD;1,1,1,northbound",
        "CD;2,5,1,southbound",
        "SL;owner,Canton X",
        "ES;A881,loop counter,main cabinet",
        "EC;1,L-204,induction loop",
    ];
    let expected: String = lines.iter().map(|l| format!("{l}\r\n")).collect();

    let dataset = decode_header(&lines)?;
    assert_eq!(encode_to_string(&dataset)?, expected);
    Ok(())
}
