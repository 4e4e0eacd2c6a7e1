//! Whole-file round trips: decode → encode must reproduce canonical input
//! byte for byte, and encode → decode must reproduce the dataset in every
//! observable field.

use tcd_rs::classification::{
    LengthClassification, SpeedClassification, VehicleTypeClassification,
};
use tcd_rs::header::{ChannelDef, FileChange, StationLabel, TotalField};
use tcd_rs::tally::TallyPart;
use tcd_rs::{
    AxleRecord, Dataset, DecodeOptions, EventKind, MonitoringEvent, Result, TallyRecord,
    Timestamp, VehicleRecord, decode_str, encode_to_string,
};

const CANONICAL: &[&str] = &[
    "FV;1,0",
    "SI;0042,Route 7 North",
    "SD;Bridge deck counter",
    "SO;60",
    "SP;30",
    "TT;V,A",
    "TS;S11,40,5,10",
    "TL;L4,6.5,21.5,49",
    "TC;SWISS5,1,5",
    "TO;T,C,S,L",
    "VF;SP,LE,C1",
    "VA;WT,SP",
    "FC;20260102,000930,jdoe,initial import",
    "CD;1,1,1,northbound",
    "CD;2,5,1,southbound",
    "SL;owner,Canton X",
    "ES;A881,loop counter,main cabinet",
    "EC;1,L-204,induction loop",
    "T;1,0,20260401,080000;120,84.5;0,3,17,42,22,9;0,0,1,5,12,31,28,14,6,2,1;88,11,3,1;",
    "T;2,1,20260401,080000;61,78.5;0,1,9,30,14,7;0,0,0,2,8,19,17,9,4,1,1;49,9,2,1;",
    "M;20260401,081205;PF;battery backup active",
    "M;20260401,093000;*maint;sensor cleaned",
    "V;2,20260401,081455;83.5,4.2,3;1.2,0;0.9,1.8",
];

fn canonical_text() -> String {
    CANONICAL.iter().map(|l| format!("{l}\r\n")).collect()
}

#[test]
fn canonical_file_round_trips_byte_identically() -> Result<()> {
    let text = canonical_text();
    let (dataset, summary) = decode_str(&text, DecodeOptions::new())?;
    assert_eq!(summary.header_records, 18);
    assert_eq!(summary.tallies, 2);
    assert_eq!(summary.events, 2);
    assert_eq!(summary.vehicles, 1);

    assert_eq!(encode_to_string(&dataset)?, text);
    Ok(())
}

#[test]
fn decoded_model_matches_expectations() -> Result<()> {
    let (dataset, _) = decode_str(&canonical_text(), DecodeOptions::new())?;

    let tally = &dataset.tallies[0];
    assert_eq!(tally.channel, 1);
    assert_eq!(tally.period, 0);
    assert_eq!(tally.timestamp, Timestamp::new(20260401, 80000));
    assert_eq!(tally.totals, vec![120.0, 84.5]);
    assert_eq!(tally.total(&dataset.header, &TotalField::Volume), Some(120.0));
    assert_eq!(tally.vehicle_type_counts.len(), 6);
    assert_eq!(tally.speed_counts.len(), 11);
    assert_eq!(tally.length_counts, vec![88, 11, 3, 1]);

    assert_eq!(dataset.events[0].kind, EventKind::PowerFailure);
    assert_eq!(dataset.events[1].kind, EventKind::UserDefined("*maint".into()));
    assert_eq!(dataset.events[1].kind, EventKind::user("maint"));

    let vehicle = &dataset.vehicles[0];
    assert_eq!(vehicle.channel, 2);
    assert_eq!(
        vehicle.value(&dataset.header, &tcd_rs::header::ObservationField::Speed),
        Some(83.5)
    );
    assert_eq!(vehicle.axles.len(), 2);
    assert_eq!(vehicle.axles[1].values, vec![0.9, 1.8]);
    Ok(())
}

fn full_dataset() -> Dataset {
    let mut dataset = Dataset::new();
    dataset.header.file.version = Some((1, 0));
    dataset.header.file.generator = Some("counter-suite 2.1".into());
    dataset.header.file.changes.push(FileChange {
        timestamp: Timestamp::new(20260102, 930),
        editor: "jdoe".into(),
        note: "initial import".into(),
    });
    dataset.header.station.id = Some("0042".into());
    dataset.header.station.name = "Route 7 North".into();
    dataset.header.station.utc_offset_minutes = Some(60);
    dataset.header.station.labels.push(StationLabel {
        key: "owner".into(),
        text: "Canton X".into(),
    });
    dataset.header.tally.interval_minutes = Some(30);
    dataset.header.tally.totals = vec![TotalField::Volume, TotalField::AverageSpeed];
    dataset.header.tally.speed = Some(SpeedClassification::new("S11", 40.0, 5.0, 10));
    dataset.header.tally.length = Some(LengthClassification::new("L4", vec![6.5, 21.5, 49.0]));
    dataset.header.tally.vehicle_type = Some(VehicleTypeClassification::new("SWISS5", 1, 5));
    dataset
        .header
        .add_channel(ChannelDef {
            id: 1,
            direction: 1,
            lane: 1,
            description: "northbound".into(),
        })
        .unwrap();

    let mut tally = TallyRecord::new(1, 0, Timestamp::new(20260401, 80000));
    tally.totals = vec![120.0, 84.5];
    tally.vehicle_type_counts = vec![0, 3, 17, 42, 22, 9];
    tally.speed_counts = vec![0, 0, 1, 5, 12, 31, 28, 14, 6, 2, 1];
    tally.length_counts = vec![88, 11, 3, 1];
    dataset.add_tally(tally).unwrap();

    dataset.add_event(MonitoringEvent::new(
        Timestamp::new(20260401, 81205),
        EventKind::Restart,
        "watchdog",
    ));

    let mut vehicle = VehicleRecord::new(1, Timestamp::new(20260401, 81455));
    vehicle.values = vec![83.5, 4.25, 3.0];
    vehicle.axles.push(AxleRecord {
        values: vec![1.25, 0.0],
    });
    dataset.header.observation.fields = vec![
        tcd_rs::header::ObservationField::Speed,
        tcd_rs::header::ObservationField::Length,
        tcd_rs::header::ObservationField::TypeClass1,
    ];
    dataset.header.observation.axle_fields = vec![
        tcd_rs::header::AxleField::Weight,
        tcd_rs::header::AxleField::Spacing,
    ];
    dataset.add_vehicle(vehicle).unwrap();

    dataset
}

#[test]
fn dataset_round_trips_with_derived_part_order() -> Result<()> {
    let dataset = full_dataset();
    assert!(dataset.header.tally.explicit_order.is_none());

    let encoded = encode_to_string(&dataset)?;
    let (decoded, _) = decode_str(&encoded, DecodeOptions::new())?;
    assert_eq!(decoded, dataset);
    Ok(())
}

#[test]
fn dataset_round_trips_with_explicit_part_order() -> Result<()> {
    let mut dataset = full_dataset();
    // Reversed relative to the derived precedence.
    dataset.header.tally.explicit_order = Some(vec![
        TallyPart::Length,
        TallyPart::Speed,
        TallyPart::VehicleType,
        TallyPart::Totals,
    ]);

    let encoded = encode_to_string(&dataset)?;
    let (decoded, _) = decode_str(&encoded, DecodeOptions::new())?;
    assert_eq!(decoded, dataset);

    // The tally line leads with the length segment under the explicit order.
    let tally_line = encoded
        .lines()
        .find(|l| l.starts_with("T;"))
        .expect("tally line present");
    assert!(tally_line.starts_with("T;1,0,20260401,080000;88,11,3,1;"));
    Ok(())
}

#[test]
fn derived_order_places_vehicle_type_before_length() -> Result<()> {
    // No explicit TO record, only vehicle-type and length classifications:
    // the fixed precedence puts the vehicle-type segment first.
    let mut dataset = Dataset::new();
    dataset.header.tally.vehicle_type = Some(VehicleTypeClassification::new("SWISS2", 1, 2));
    dataset.header.tally.length = Some(LengthClassification::new("L2", vec![6.5]));
    dataset
        .header
        .add_channel(ChannelDef {
            id: 1,
            direction: 1,
            lane: 1,
            description: String::new(),
        })
        .unwrap();

    let mut tally = TallyRecord::new(1, 0, Timestamp::new(20260401, 80000));
    tally.vehicle_type_counts = vec![5, 6, 7];
    tally.length_counts = vec![11, 2];
    dataset.add_tally(tally).unwrap();

    let encoded = encode_to_string(&dataset)?;
    let tally_line = encoded
        .lines()
        .find(|l| l.starts_with("T;"))
        .expect("tally line present");
    assert_eq!(tally_line, "T;1,0,20260401,080000;5,6,7;11,2;");

    let (decoded, _) = decode_str(&encoded, DecodeOptions::new())?;
    assert_eq!(decoded, dataset);
    Ok(())
}

#[test]
fn unknown_part_tokens_round_trip_opaquely() -> Result<()> {
    let text = [
        "TT;V",
        "TO;T,X9,Z",
        "CD;1,1,1,lane",
        "T;1,0,20260401,080000;42;7,extra,data;opaque;",
    ]
    .iter()
    .map(|l| format!("{l}\r\n"))
    .collect::<String>();

    let (dataset, _) = decode_str(&text, DecodeOptions::new())?;
    let tally = &dataset.tallies[0];
    assert_eq!(tally.totals, vec![42.0]);
    assert_eq!(
        tally.unknown_parts,
        vec![
            ("X9".to_string(), "7,extra,data".to_string()),
            ("Z".to_string(), "opaque".to_string())
        ]
    );

    assert_eq!(encode_to_string(&dataset)?, text);
    Ok(())
}

#[test]
fn renumber_channel_updates_header_and_body() -> Result<()> {
    let mut dataset = full_dataset();
    dataset.header.channel_equipment.push(tcd_rs::header::ChannelEquipment {
        channel: 1,
        serial: "L-204".into(),
        kind: "loop".into(),
    });

    dataset.renumber_channel(1, 7)?;
    assert!(dataset.header.has_channel(7));
    assert!(!dataset.header.has_channel(1));
    assert_eq!(dataset.header.channel_equipment[0].channel, 7);
    assert_eq!(dataset.tallies[0].channel, 7);
    assert_eq!(dataset.vehicles[0].channel, 7);

    // The renumbered dataset still round trips.
    let encoded = encode_to_string(&dataset)?;
    let (decoded, _) = decode_str(&encoded, DecodeOptions::new())?;
    assert_eq!(decoded, dataset);
    Ok(())
}

#[test]
fn cleared_classification_leaves_the_part_order() -> Result<()> {
    let mut dataset = full_dataset();
    if let Some(speed) = dataset.header.tally.speed.as_mut() {
        speed.clear();
    }
    dataset.tallies[0].speed_counts.clear();

    let encoded = encode_to_string(&dataset)?;
    // Cleared speed classification emits no TS line and no speed segment.
    assert!(!encoded.contains("TS;"));
    let tally_line = encoded
        .lines()
        .find(|l| l.starts_with("T;"))
        .expect("tally line present");
    assert_eq!(
        tally_line,
        "T;1,0,20260401,080000;120,84.5;0,3,17,42,22,9;88,11,3,1;"
    );
    Ok(())
}
