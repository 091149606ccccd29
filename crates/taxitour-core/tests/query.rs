use chrono::{TimeZone, Utc};
use polars::prelude::*;

use taxitour_core::query::{monthly_summary, preview};
use taxitour_core::schema::PICKUP_COLUMN;

fn trips_frame() -> PolarsResult<DataFrame> {
    let pickups = [
        (1, 5, 9),
        (1, 20, 18),
        (2, 10, 12),
        (4, 1, 7), // past the first quarter
    ];
    let timestamps: Vec<i64> = pickups
        .iter()
        .map(|(month, day, hour)| {
            Utc.with_ymd_and_hms(2024, *month, *day, *hour, 0, 0)
                .unwrap()
                .timestamp_millis()
        })
        .collect();

    let pickup_series = Series::new(PICKUP_COLUMN.into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    DataFrame::new(vec![
        pickup_series.into(),
        Series::new("total_amount".into(), vec![10.0f64, 30.0, 25.0, 100.0]).into(),
        Series::new("passenger_count".into(), vec![1i64, 3, 2, 4]).into(),
        Series::new("trip_distance".into(), vec![1.0f64, 3.0, 2.0, 9.0]).into(),
        Series::new("Airport_fee".into(), vec![0.0f64, 1.25, 0.0, 1.25]).into(),
    ])
}

#[test]
fn monthly_summary_aggregates_by_pickup_month() -> PolarsResult<()> {
    let df = trips_frame()?;
    let summary = monthly_summary(df.lazy(), 3).collect()?;

    assert_eq!(summary.height(), 2);

    let months: Vec<&str> = summary
        .column("month")?
        .str()?
        .into_no_null_iter()
        .collect();
    assert_eq!(months, vec!["2024-01", "2024-02"]);

    let num_trips = summary.column("num_trips")?.u32()?;
    assert_eq!(num_trips.get(0), Some(2));
    assert_eq!(num_trips.get(1), Some(1));

    let cost = summary.column("cost_per_trip")?.f64()?;
    assert!((cost.get(0).unwrap() - 20.0).abs() < 1e-9);
    assert!((cost.get(1).unwrap() - 25.0).abs() < 1e-9);

    let passengers = summary.column("avg_passengers_per_trip")?.f64()?;
    assert!((passengers.get(0).unwrap() - 2.0).abs() < 1e-9);

    let airport = summary.column("num_airport_trips")?.u32()?;
    assert_eq!(airport.get(0), Some(1));
    assert_eq!(airport.get(1), Some(0));

    Ok(())
}

#[test]
fn monthly_summary_filter_excludes_later_months() -> PolarsResult<()> {
    let df = trips_frame()?;

    let first_quarter = monthly_summary(df.clone().lazy(), 3).collect()?;
    assert!(!first_quarter
        .column("month")?
        .str()?
        .into_no_null_iter()
        .any(|month| month == "2024-04"));

    let full_year = monthly_summary(df.lazy(), 12).collect()?;
    assert_eq!(full_year.height(), 3);

    Ok(())
}

#[test]
fn preview_limits_row_count() -> taxitour_core::error::Result<()> {
    let df = trips_frame()?;
    let head = preview(df.lazy(), 2)?;

    assert_eq!(head.height(), 2);
    assert_eq!(head.width(), 5);

    Ok(())
}
