use std::path::Path;

use chrono::NaiveDate;
use taxitour_core::dataset::{available_months, local_paths, TripMonth};
use taxitour_core::error::TourError;

#[test]
fn mid_year_request_applies_publication_lag() {
    let today = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
    let months = available_months(None, today).unwrap();

    assert_eq!(months.len(), 5);
    assert_eq!(months[0], TripMonth { year: 2024, month: 1 });
    assert_eq!(months[4], TripMonth { year: 2024, month: 5 });
}

#[test]
fn early_year_request_falls_back_to_previous_year() {
    let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let months = available_months(None, today).unwrap();

    assert_eq!(months.len(), 12);
    assert!(months.iter().all(|month| month.year == 2024));
}

#[test]
fn past_year_request_returns_all_twelve_months() {
    let today = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
    let months = available_months(Some(2019), today).unwrap();

    assert_eq!(months.len(), 12);
    assert!(months.iter().all(|month| month.year == 2019));
}

#[test]
fn rejects_years_outside_the_published_range() {
    let today = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();

    assert!(matches!(
        available_months(Some(2008), today),
        Err(TourError::Validation(_))
    ));
    assert!(matches!(
        available_months(Some(2030), today),
        Err(TourError::Validation(_))
    ));
}

#[test]
fn file_names_and_urls_are_zero_padded() {
    let month = TripMonth {
        year: 2024,
        month: 3,
    };

    assert_eq!(month.file_name(), "yellow_tripdata_2024-03.parquet");
    assert!(month
        .url()
        .ends_with("/trip-data/yellow_tripdata_2024-03.parquet"));
}

#[test]
fn local_paths_join_the_data_dir() {
    let months = vec![
        TripMonth {
            year: 2024,
            month: 1,
        },
        TripMonth {
            year: 2024,
            month: 12,
        },
    ];
    let paths = local_paths(Path::new("data"), &months);

    assert_eq!(
        paths,
        vec![
            Path::new("data").join("yellow_tripdata_2024-01.parquet"),
            Path::new("data").join("yellow_tripdata_2024-12.parquet"),
        ]
    );
}
