//! Property tests for the prediction pipeline.

mod support;

use proptest::collection::vec;
use proptest::prelude::*;

use flight_delay::models::{FieldName, FieldValue, PredictionRecord};
use flight_delay::services::{
    aggregate, aggregate_by_day_part, classify, distinct_carriers, filter_by_carrier, project,
    DayPart,
};
use support::{sample_records, RecordBuilder};

const CARRIERS: &[&str] = &["Delta Air Lines Inc.", "United Air Lines Inc.", "Endeavor Air Inc."];

fn record_strategy() -> impl Strategy<Value = PredictionRecord> {
    (
        proptest::option::of(1u8..=7),
        proptest::option::of(0u8..24),
        proptest::option::of(0usize..CARRIERS.len()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(0.0f64..40.0),
    )
        .prop_map(|(day, hour, carrier, actual, predicted, age)| PredictionRecord {
            day_of_week: day.map(f64::from).into(),
            departure_time_block: hour.map(|h| format!("{:02}00-{:02}59", h, h)),
            carrier_name: carrier.map(|i| CARRIERS[i].to_string()),
            actual_delay: actual.map(|a| if a { 1.0 } else { 0.0 }).into(),
            predicted_delay: predicted.map(|p| if p { 1.0 } else { 0.0 }).into(),
            plane_age: age.into(),
            ..Default::default()
        })
}

fn expected_day_part(hour: u8) -> DayPart {
    match hour {
        0..=5 | 20..=23 => DayPart::EarlyMorningLateNight,
        6..=11 => DayPart::Morning,
        12..=16 => DayPart::Afternoon,
        _ => DayPart::Evening,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Time block classification
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn classify_documented_blocks() {
    let cases = [
        ("0000-0559", DayPart::EarlyMorningLateNight),
        ("0001-0559", DayPart::EarlyMorningLateNight),
        ("2000-2359", DayPart::EarlyMorningLateNight),
        ("0600-1159", DayPart::Morning),
        ("1200-1659", DayPart::Afternoon),
        ("1700-1959", DayPart::Evening),
    ];
    for (block, expected) in cases {
        assert_eq!(classify(block).unwrap(), expected, "block {}", block);
    }
}

proptest! {
    #[test]
    fn hourly_blocks_map_to_one_labelled_part(hour in 0u8..24) {
        let block = format!("{:02}00-{:02}59", hour, hour);
        let part = classify(&block).unwrap();
        prop_assert_ne!(part, DayPart::Unknown);
        prop_assert_eq!(part, expected_day_part(hour));
    }

    #[test]
    fn well_formed_blocks_never_fail(start in 0u16..2400, end in 0u16..2400) {
        prop_assume!(start % 100 < 60 && end % 100 < 60);
        let block = format!("{:04}-{:04}", start, end);
        prop_assert!(classify(&block).is_ok());
    }

    #[test]
    fn malformed_blocks_are_rejected(s in "[0-9]{0,3}|[a-z]{9}|[0-9]{4}:[0-9]{4}") {
        prop_assert!(classify(&s).is_err());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregation
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn aggregate_totals_match_input(records in vec(record_strategy(), 0..60)) {
        let groupings = [
            aggregate(&records, FieldName::DayOfWeek),
            aggregate_by_day_part(&records),
        ];
        for buckets in groupings {
            let actual: u64 = buckets.iter().map(|b| b.delayed_count + b.on_time_count).sum();
            let predicted: u64 = buckets
                .iter()
                .map(|b| b.predicted_delayed_count + b.predicted_on_time_count)
                .sum();
            prop_assert_eq!(actual, records.len() as u64);
            prop_assert_eq!(predicted, records.len() as u64);
        }
    }

    #[test]
    fn aggregate_keys_are_distinct(records in vec(record_strategy(), 0..60)) {
        let buckets = aggregate(&records, FieldName::CarrierName);
        let mut keys: Vec<String> = buckets.iter().map(|b| b.attribute_value.group_key()).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), before);
    }
}

#[test]
fn aggregate_empty_input() {
    assert!(aggregate(&[], FieldName::DayOfWeek).is_empty());
    assert!(aggregate_by_day_part(&[]).is_empty());
}

#[test]
fn aggregate_three_record_example() {
    let records = vec![
        RecordBuilder::new().day_of_week(1.0).delayed(true).predicted(true).build(),
        RecordBuilder::new().day_of_week(1.0).delayed(false).predicted(true).build(),
        RecordBuilder::new().day_of_week(2.0).delayed(false).predicted(false).build(),
    ];
    let buckets = aggregate(&records, FieldName::DayOfWeek);
    assert_eq!(buckets.len(), 2);

    assert_eq!(buckets[0].attribute_value.as_number(), Some(1.0));
    assert_eq!(buckets[0].delayed_count, 1);
    assert_eq!(buckets[0].on_time_count, 1);
    assert_eq!(buckets[0].predicted_delayed_count, 2);
    assert_eq!(buckets[0].predicted_on_time_count, 0);

    assert_eq!(buckets[1].attribute_value.as_number(), Some(2.0));
    assert_eq!(buckets[1].delayed_count, 0);
    assert_eq!(buckets[1].on_time_count, 1);
    assert_eq!(buckets[1].predicted_delayed_count, 0);
    assert_eq!(buckets[1].predicted_on_time_count, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Scatter projection and filtering
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn project_preserves_length(records in vec(record_strategy(), 0..60)) {
        let points = project(&records, FieldName::PlaneAge, FieldName::CarrierName);
        prop_assert_eq!(points.len(), records.len());
    }

    #[test]
    fn non_numeric_x_is_zero(records in vec(record_strategy(), 0..60)) {
        let points = project(&records, FieldName::CarrierName, FieldName::PlaneAge);
        prop_assert!(points.iter().all(|p| p.x == 0.0));
    }

    #[test]
    fn class_follows_actual_delay(records in vec(record_strategy(), 0..60)) {
        let points = project(&records, FieldName::DayOfWeek, FieldName::PlaneAge);
        for (point, record) in points.iter().zip(&records) {
            prop_assert_eq!(point.class == 1, record.actual_delay == FieldValue::Number(1.0));
        }
    }

    #[test]
    fn carrier_filter_partitions_records(records in vec(record_strategy(), 0..60)) {
        prop_assert_eq!(filter_by_carrier(&records, None).len(), records.len());

        let filtered: usize = distinct_carriers(&records)
            .iter()
            .map(|c| filter_by_carrier(&records, Some(c)).len())
            .sum();
        let with_carrier = records.iter().filter(|r| r.carrier_name.is_some()).count();
        prop_assert_eq!(filtered, with_carrier);
    }
}

#[test]
fn text_in_numeric_columns_keeps_the_record() {
    let records: Vec<PredictionRecord> = serde_json::from_str(
        r#"[{"PLANE_AGE": 4, "DAY_OF_WEEK": 1, "DEP_DEL15": 0},
            {"PLANE_AGE": "N/A", "DAY_OF_WEEK": 1, "DEP_DEL15": "yes"}]"#,
    )
    .unwrap();
    assert_eq!(records.len(), 2);

    let points = project(&records, FieldName::PlaneAge, FieldName::PlaneAge);
    assert_eq!((points[0].x, points[0].y, points[0].class), (4.0, 4.0, 0));
    assert_eq!((points[1].x, points[1].y, points[1].class), (0.0, 1.0, 0));

    let buckets = aggregate(&records, FieldName::DayOfWeek);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].delayed_count, 0);
    assert_eq!(buckets[0].on_time_count, 2);

    let by_age = aggregate(&records, FieldName::PlaneAge);
    assert_eq!(by_age[1].attribute_value, FieldValue::from("N/A"));
}

#[test]
fn unknown_carrier_yields_nothing() {
    let records = sample_records();
    assert!(filter_by_carrier(&records, Some("Pan Am")).is_empty());
    assert_eq!(filter_by_carrier(&records, None).len(), records.len());
}
