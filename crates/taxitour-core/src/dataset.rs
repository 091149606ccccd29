// crates/taxitour-core/src/dataset.rs

use std::env;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, TourError};

/// Monthly Yellow Taxi trip files published by the NYC TLC.
pub const TRIP_DATA_BASE_URL: &str = "https://d37ci6vzurychx.cloudfront.net/trip-data";

/// Trip files appear roughly two months after the fact; a three-month lag
/// guarantees the file exists.
pub const PUBLICATION_LAG_MONTHS: u32 = 3;

/// Earliest year with published Yellow Taxi trip records.
pub const FIRST_PUBLISHED_YEAR: i32 = 2009;

pub const DATA_DIR_ENV: &str = "TAXITOUR_DATA_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripMonth {
    pub year: i32,
    pub month: u32,
}

impl TripMonth {
    pub fn file_name(&self) -> String {
        format!("yellow_tripdata_{}-{:02}.parquet", self.year, self.month)
    }

    pub fn url(&self) -> String {
        format!("{}/{}", TRIP_DATA_BASE_URL, self.file_name())
    }
}

/// All trip months expected to be published for `year` as of `today`.
///
/// A request for the current year inside the publication lag window falls
/// back to the full previous year, matching how the TLC staggers releases.
pub fn available_months(year: Option<i32>, today: NaiveDate) -> Result<Vec<TripMonth>> {
    let current_year = today.year();
    let mut year = year.unwrap_or(current_year);

    if year < FIRST_PUBLISHED_YEAR || year > current_year {
        return Err(TourError::Validation(format!(
            "year must be >= {} and <= {}, but {} was given",
            FIRST_PUBLISHED_YEAR, current_year, year
        )));
    }

    let mut end_month = 12;
    if year == current_year {
        if today.month() <= PUBLICATION_LAG_MONTHS {
            tracing::info!(
                requested = current_year,
                using = current_year - 1,
                "current-year data not yet published, using previous year"
            );
            year = current_year - 1;
        } else {
            end_month = today.month() - PUBLICATION_LAG_MONTHS;
        }
    }

    Ok((1..=end_month).map(|month| TripMonth { year, month }).collect())
}

pub fn local_paths(data_dir: &Path, months: &[TripMonth]) -> Vec<PathBuf> {
    months
        .iter()
        .map(|month| data_dir.join(month.file_name()))
        .collect()
}

/// Trip parquet files already present in `data_dir`, sorted by file name so
/// months scan in chronological order.
pub fn downloaded_trip_paths(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(data_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with("yellow_tripdata_") && name.ends_with(".parquet") {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(TourError::Dataset(format!(
            "no trip parquet files found in {}; run the download command first",
            data_dir.display()
        )));
    }
    paths.sort();
    Ok(paths)
}

pub fn data_dir_from_env() -> PathBuf {
    env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}
