#![cfg(feature = "serde")]

//! Dataset index summaries and their JSON persistence.

use tcd_rs::{Dataset, DatasetIndex, DecodeOptions, Result, decode_str};

fn sample_text() -> String {
    [
        "FV;1,0",
        "SI;0042,Route 7 North",
        "CD;1,1,1,northbound",
        "CD;2,5,1,southbound",
        "T;1,0,20260401,080000;",
        "T;2,0,20260401,090000;",
        "T;1,0,20260331,230000;",
        "M;20260401,081205;PF;battery backup active",
    ]
    .iter()
    .map(|l| format!("{l}\r\n"))
    .collect()
}

#[test]
fn index_summarizes_dataset() -> Result<()> {
    let (dataset, _) = decode_str(&sample_text(), DecodeOptions::new())?;
    let index = DatasetIndex::from_dataset(&dataset);

    assert_eq!(index.format_version, Some((1, 0)));
    assert_eq!(index.station_id.as_deref(), Some("0042"));
    assert_eq!(index.station_name, "Route 7 North");
    assert_eq!(index.channel_ids, vec![1, 2]);
    assert_eq!(index.tally_count, 3);
    assert_eq!(index.event_count, 1);
    assert_eq!(index.vehicle_count, 0);

    // Min/max over timestamps, not file order.
    let first = index.first_tally.expect("tallies exist");
    let last = index.last_tally.expect("tallies exist");
    assert_eq!((first.date, first.time), (20260331, 230000));
    assert_eq!((last.date, last.time), (20260401, 90000));
    Ok(())
}

#[test]
fn empty_dataset_has_no_tally_range() {
    let index = DatasetIndex::from_dataset(&Dataset::new());
    assert!(index.first_tally.is_none());
    assert!(index.last_tally.is_none());
    assert_eq!(index.tally_count, 0);
}

#[test]
fn index_saves_and_loads_as_json() -> Result<()> {
    let (dataset, _) = decode_str(&sample_text(), DecodeOptions::new())?;
    let index = DatasetIndex::from_dataset(&dataset);

    let path = std::env::temp_dir().join("tcd_rs_index_test.json");
    let path = path.to_str().expect("temp path is UTF-8");
    index.save_to_file(path)?;
    let reloaded = DatasetIndex::load_from_file(path)?;
    std::fs::remove_file(path)?;

    assert_eq!(reloaded, index);
    Ok(())
}
