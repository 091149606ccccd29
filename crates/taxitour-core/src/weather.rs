// crates/taxitour-core/src/weather.rs

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::Deserialize;

use crate::error::{Result, TourError};
use crate::schema::PICKUP_COLUMN;

const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Open-Meteo historical archive response. Hourly readings arrive as
/// parallel arrays under the `hourly` block.
#[derive(Debug, Deserialize)]
pub struct WeatherArchive {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    pub hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i64>>,
    pub is_day: Vec<Option<i64>>,
}

/// One WMO weather code, described separately for day and night.
#[derive(Debug, Deserialize)]
pub struct CodeDescriptions {
    pub day: CodeFace,
    pub night: CodeFace,
}

#[derive(Debug, Deserialize)]
pub struct CodeFace {
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

pub fn read_archive(path: &Path) -> Result<WeatherArchive> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn read_weather_codes(path: &Path) -> Result<BTreeMap<String, CodeDescriptions>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// The hourly readings as a frame with a naive local `time` column, one row
/// per hour.
pub fn hourly_dataframe(archive: &WeatherArchive) -> Result<DataFrame> {
    let hourly = &archive.hourly;
    let len = hourly.time.len();
    if hourly.temperature_2m.len() != len
        || hourly.weather_code.len() != len
        || hourly.is_day.len() != len
    {
        return Err(TourError::Validation(
            "hourly weather arrays have mismatched lengths".to_string(),
        ));
    }

    let mut times = Vec::with_capacity(len);
    for raw in &hourly.time {
        let parsed = NaiveDateTime::parse_from_str(raw, HOURLY_TIME_FORMAT).map_err(|err| {
            TourError::Validation(format!("invalid hourly timestamp {raw}: {err}"))
        })?;
        times.push(parsed.and_utc().timestamp_millis());
    }

    let time_series = Series::new("time".into(), times)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    Ok(DataFrame::new(vec![
        time_series.into(),
        Series::new("temperature_2m".into(), hourly.temperature_2m.clone()).into(),
        Series::new("weather_code".into(), hourly.weather_code.clone()).into(),
        Series::new("is_day".into(), hourly.is_day.clone()).into(),
    ])?)
}

/// Flatten the code table into joinable rows: one per code and day flag.
pub fn codes_dataframe(codes: &BTreeMap<String, CodeDescriptions>) -> Result<DataFrame> {
    let mut code_values = Vec::with_capacity(codes.len() * 2);
    let mut day_flags = Vec::with_capacity(codes.len() * 2);
    let mut descriptions = Vec::with_capacity(codes.len() * 2);

    for (code, faces) in codes {
        let code: i64 = code.parse().map_err(|_| {
            TourError::Validation(format!("non-numeric weather code: {code}"))
        })?;
        for (flag, face) in [(1i64, &faces.day), (0i64, &faces.night)] {
            code_values.push(code);
            day_flags.push(flag);
            descriptions.push(face.description.clone());
        }
    }

    Ok(DataFrame::new(vec![
        Series::new("weather_code".into(), code_values).into(),
        Series::new("is_day".into(), day_flags).into(),
        Series::new("description".into(), descriptions).into(),
    ])?)
}

/// Attach the human-readable description to each hourly reading.
pub fn describe_hourly(hourly: DataFrame, codes: &DataFrame) -> Result<DataFrame> {
    Ok(hourly
        .lazy()
        .join(
            codes.clone().lazy(),
            [col("weather_code"), col("is_day")],
            [col("weather_code"), col("is_day")],
            JoinArgs::new(JoinType::Left),
        )
        .sort(["time"], SortMultipleOptions::default())
        .collect()?)
}

/// Left-join hourly weather onto trips by pickup hour. Both sides carry
/// naive local NYC times, so truncating the pickup timestamp lines the keys
/// up exactly.
pub fn join_hourly_weather(trips: LazyFrame, hourly: DataFrame) -> LazyFrame {
    let pickup_hour = col(PICKUP_COLUMN)
        .dt()
        .truncate(lit("1h"))
        .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
        .alias("pickup_hour");

    trips.with_column(pickup_hour).join(
        hourly.lazy(),
        [col("pickup_hour")],
        [col("time")],
        JoinArgs::new(JoinType::Left),
    )
}
