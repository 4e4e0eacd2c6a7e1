use tcd_rs::classification::{
    BinSet, LengthClassification, SpeedClassification, VehicleTypeClassification,
};

fn speed_11_bins() -> SpeedClassification {
    SpeedClassification::new("S11", 40.0, 5.0, 10)
}

#[test]
fn speed_bin_monotonicity() {
    let speed = speed_11_bins();
    assert_eq!(speed.number_of_bins_in_record(), 11);
    assert_eq!(speed.bin(0.0), 0);
    assert_eq!(speed.bin(39.9), 0);
    assert_eq!(speed.bin(40.0), 1);
    assert_eq!(speed.bin(45.0), 2);
    assert_eq!(speed.bin(1000.0), 10);
}

#[test]
fn speed_bin_bounds() {
    let speed = speed_11_bins();
    assert_eq!(speed.bin_lower(0), 0.0);
    assert_eq!(speed.bin_lower(1), 40.0);
    assert_eq!(speed.bin_lower(2), 45.0);
    assert_eq!(speed.bin_upper(0), 40.0);
    assert_eq!(speed.bin_upper(1), 45.0);
}

#[test]
fn speed_terminal_bin_upper_is_finite() {
    // The terminal bin is conceptually unbounded but its upper bound comes
    // from the same linear formula as interior bins.
    let speed = speed_11_bins();
    assert_eq!(speed.upper(), 90.0);
    assert_eq!(speed.bin_upper(10), 90.0);
}

#[test]
fn speed_zero_step_collapses_to_first_bin() {
    let speed = SpeedClassification::new("flat", 40.0, 0.0, 10);
    assert_eq!(speed.bin(250.0), 0);
}

#[test]
fn speed_mean_uses_bin_midpoints() {
    let speed = speed_11_bins();

    let mut counts = vec![0u32; 11];
    counts[0] = 1; // midpoint 20.0
    counts[1] = 1; // midpoint 42.5
    assert_eq!(speed.mean_speed(&counts), Some(31.25));

    // The terminal bin contributes its finite midpoint, (85 + 90) / 2.
    let mut counts = vec![0u32; 11];
    counts[10] = 2;
    assert_eq!(speed.mean_speed(&counts), Some(87.5));

    assert_eq!(speed.mean_speed(&vec![0u32; 11]), None);
}

#[test]
fn speed_clear_stops_recording() {
    let mut speed = speed_11_bins();
    assert!(speed.is_recording());
    speed.clear();
    assert!(!speed.is_recording());
}

#[test]
fn length_bin_boundaries() {
    let length = LengthClassification::new("L4", vec![6.5, 21.5, 49.0]);
    assert_eq!(length.number_of_bins_in_record(), 4);
    assert_eq!(length.maximum_bin(), 3);
    assert_eq!(length.bin(0.0), 0);
    // The boundary test is strictly-greater-than: a value on a cutoff
    // belongs to the next bin.
    assert_eq!(length.bin(6.5), 1);
    assert_eq!(length.bin(6.4), 0);
    assert_eq!(length.bin(21.5), 2);
    assert_eq!(length.bin(50.0), 3);
}

#[test]
fn length_bin_bounds() {
    let length = LengthClassification::new("L4", vec![6.5, 21.5, 49.0]);
    assert_eq!(length.bin_lower(0), 0.0);
    assert_eq!(length.bin_lower(1), 6.5);
    assert_eq!(length.bin_upper(0), Some(6.5));
    assert_eq!(length.bin_upper(3), None);
}

#[test]
fn length_clear_stops_recording() {
    let mut length = LengthClassification::new("L4", vec![6.5, 21.5, 49.0]);
    assert!(length.is_recording());
    length.clear();
    assert!(!length.is_recording());
    assert_eq!(length.number_of_bins_in_record(), 1);
}

#[test]
fn vehicle_type_bins_are_external_ids() {
    let types = VehicleTypeClassification::new("SWISS10", 1, 10);
    assert_eq!(types.number_of_bins_in_record(), 11);
    assert_eq!(types.maximum_bin(), 10);
    assert_eq!(types.bin(3), 3);
    assert_eq!(types.bin(10), 10);
    assert!(types.contains(1));
    assert!(types.contains(10));
    assert!(!types.contains(0));
    assert!(!types.contains(11));
}

#[test]
fn vehicle_type_clear_stops_recording() {
    let mut types = VehicleTypeClassification::new("SWISS10", 1, 10);
    assert!(types.is_recording());
    types.clear();
    assert!(!types.is_recording());
}
