use polars::prelude::*;

use taxitour_core::error::TourError;
use taxitour_core::schema::{expected_trip_schema, validate_trip_schema, PICKUP_COLUMN};

#[test]
fn expected_schema_lists_the_documented_columns() {
    let schema = expected_trip_schema();

    assert_eq!(schema.len(), 19);
    assert!(schema.get(PICKUP_COLUMN).is_some());
    assert_eq!(schema.get("total_amount"), Some(&DataType::Float64));
}

#[test]
fn validation_accepts_extra_columns() {
    let mut schema = expected_trip_schema();
    schema.with_column("cbd_congestion_fee".into(), DataType::Float64);

    assert!(validate_trip_schema(&schema).is_ok());
}

#[test]
fn validation_tolerates_dtype_drift() {
    // Older yearly releases store VendorID as a wider integer.
    let mut schema = expected_trip_schema();
    schema.with_column("VendorID".into(), DataType::Int64);

    assert!(validate_trip_schema(&schema).is_ok());
}

#[test]
fn validation_reports_every_missing_column() {
    let mut schema = Schema::default();
    schema.with_column(
        PICKUP_COLUMN.into(),
        DataType::Datetime(TimeUnit::Microseconds, None),
    );

    match validate_trip_schema(&schema) {
        Err(TourError::Validation(message)) => {
            assert!(message.contains("total_amount"));
            assert!(message.contains("Airport_fee"));
            assert!(!message.contains(PICKUP_COLUMN));
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
}
