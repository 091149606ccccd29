// crates/taxitour-core/src/download.rs

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use futures::future::try_join_all;
use reqwest::{Client, Url};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::dataset::TripMonth;
use crate::error::{Result, TourError};

pub const OPEN_METEO_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// WMO weather interpretation codes, published as a community gist.
pub const WEATHER_CODES_URL: &str = "https://gist.githubusercontent.com/stellasphere/9490c195ed2b53c707087c8c2db4ec0c/raw/76b0cb0ef0bfd8a2ec988aa54e30ecd1b483495d/descriptions.json";

pub const WEATHER_FILE: &str = "weather.json";
pub const WEATHER_CODES_FILE: &str = "weather_codes.json";

const HOURLY_FIELDS: &str = "temperature_2m,weather_code,is_day";

/// Fetch the given trip months into `data_dir`, skipping files already on
/// disk. Downloads run concurrently and stream to disk chunk by chunk.
pub async fn download_trip_months(
    client: &Client,
    months: &[TripMonth],
    data_dir: &Path,
) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(data_dir).await?;
    let downloads = months
        .iter()
        .map(|month| download_trip_file(client, *month, data_dir));
    try_join_all(downloads).await
}

async fn download_trip_file(
    client: &Client,
    month: TripMonth,
    data_dir: &Path,
) -> Result<PathBuf> {
    let path = data_dir.join(month.file_name());
    if tokio::fs::try_exists(&path).await? {
        debug!(path = %path.display(), "trip file already present, skipping");
        return Ok(path);
    }

    let mut response = client.get(month.url()).send().await?.error_for_status()?;
    let mut file = tokio::fs::File::create(&path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    info!(path = %path.display(), "downloaded trip file");
    Ok(path)
}

/// Parameters for the Open-Meteo historical weather archive.
#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: String,
}

impl WeatherRequest {
    /// Hourly NYC weather covering the same window as the trip data: the
    /// current year to date, or the full previous year while still inside
    /// the trip-data publication lag.
    pub fn for_nyc(today: NaiveDate) -> Self {
        let (start_date, end_date) = if today.month() >= 3 {
            (first_of_year(today.year()), today)
        } else {
            (first_of_year(today.year() - 1), last_of_year(today.year() - 1))
        };
        Self {
            start_date,
            end_date,
            latitude: 40.7128,
            longitude: -74.006,
            time_zone: "America/New_York".to_string(),
        }
    }

    pub fn archive_url(&self) -> Result<Url> {
        Url::parse_with_params(
            OPEN_METEO_ARCHIVE_URL,
            &[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("start_date", self.start_date.format("%Y-%m-%d").to_string()),
                ("end_date", self.end_date.format("%Y-%m-%d").to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("timezone", self.time_zone.clone()),
            ],
        )
        .map_err(|err| TourError::Dataset(format!("invalid weather request: {err}")))
    }
}

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
}

fn last_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap()
}

pub async fn download_weather(
    client: &Client,
    request: &WeatherRequest,
    data_dir: &Path,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(data_dir).await?;
    let url = request.archive_url()?;
    let body = client.get(url).send().await?.error_for_status()?.text().await?;
    let path = data_dir.join(WEATHER_FILE);
    tokio::fs::write(&path, body).await?;
    info!(path = %path.display(), "saved weather archive");
    Ok(path)
}

pub async fn download_weather_codes(client: &Client, data_dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(data_dir).await?;
    let body = client
        .get(WEATHER_CODES_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let path = data_dir.join(WEATHER_CODES_FILE);
    tokio::fs::write(&path, body).await?;
    info!(path = %path.display(), "saved weather code table");
    Ok(path)
}
