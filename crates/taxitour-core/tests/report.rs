use polars::prelude::*;

use taxitour_core::report::{dataframe_table, schema_table};
use taxitour_core::schema::expected_trip_schema;

#[test]
fn table_contains_headers_and_values() {
    let df = DataFrame::new(vec![
        Series::new("month".into(), vec!["2024-01", "2024-02"]).into(),
        Series::new("num_trips".into(), vec![10u32, 20]).into(),
    ])
    .unwrap();

    let rendered = dataframe_table(&df, 10).unwrap().to_string();

    assert!(rendered.contains("month"));
    assert!(rendered.contains("num_trips"));
    assert!(rendered.contains("2024-01"));
    assert!(rendered.contains("20"));
}

#[test]
fn long_frames_are_elided() {
    let values: Vec<i64> = (0..50).collect();
    let df = DataFrame::new(vec![Series::new("n".into(), values).into()]).unwrap();

    let rendered = dataframe_table(&df, 10).unwrap().to_string();

    assert!(rendered.contains("40 more rows"));
    assert!(!rendered.contains("49"));
}

#[test]
fn schema_table_lists_every_column() {
    let schema = expected_trip_schema();
    let rendered = schema_table(&schema).to_string();

    assert!(rendered.contains("dtype"));
    assert!(rendered.contains("tpep_pickup_datetime"));
    assert!(rendered.contains("Airport_fee"));
}
