// crates/taxitour-core/src/query.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use polars::io::parquet::write::{ParquetCompression, ParquetWriter, StatisticsOptions};
use polars::prelude::*;

use crate::error::Result;
use crate::schema::PICKUP_COLUMN;

/// Lazily scan the monthly trip files as one dataset. Nothing is read until
/// a query collects, so filters and projections push down into the files.
pub fn scan_trips(paths: &[PathBuf]) -> Result<LazyFrame> {
    let paths: Arc<[PathBuf]> = Arc::from(paths.to_vec());
    Ok(LazyFrame::scan_parquet_files(
        paths,
        ScanArgsParquet::default(),
    )?)
}

pub fn trip_schema(lf: &LazyFrame) -> Result<SchemaRef> {
    let mut lf = lf.clone();
    Ok(lf.collect_schema()?)
}

pub fn preview(lf: LazyFrame, rows: u32) -> Result<DataFrame> {
    Ok(lf.limit(rows).collect()?)
}

/// Per-month trip statistics for pickups in months `1..=months_through`.
///
/// The plan stays lazy so callers can explain it or collect it; with the
/// month filter in place only the matching row groups are read.
pub fn monthly_summary(lf: LazyFrame, months_through: u32) -> LazyFrame {
    lf.filter(col(PICKUP_COLUMN).dt().month().lt_eq(lit(months_through)))
        .group_by([col(PICKUP_COLUMN).dt().strftime("%Y-%m").alias("month")])
        .agg([
            len().alias("num_trips"),
            col("total_amount").mean().alias("cost_per_trip"),
            col("passenger_count").mean().alias("avg_passengers_per_trip"),
            col("trip_distance").mean().alias("avg_distance"),
            col("Airport_fee").gt(lit(0.0)).sum().alias("num_airport_trips"),
        ])
        .sort(["month"], SortMultipleOptions::default())
}

/// The optimized plan polars will execute for `lf`.
pub fn explain(lf: &LazyFrame) -> Result<String> {
    Ok(lf.describe_optimized_plan()?)
}

pub fn write_parquet(df: &DataFrame, path: &Path) -> Result<u64> {
    let file = std::fs::File::create(path)?;
    let mut clone = df.clone();
    let bytes = ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .with_statistics(StatisticsOptions::default())
        .finish(&mut clone)?;
    Ok(bytes)
}
