// crates/taxitour-core/src/schema.rs

use polars::prelude::*;

use crate::error::{Result, TourError};

pub const PICKUP_COLUMN: &str = "tpep_pickup_datetime";
pub const DROPOFF_COLUMN: &str = "tpep_dropoff_datetime";

/// The Yellow Taxi columns documented in the TLC data dictionary, with the
/// dtypes the recent parquet releases carry.
pub fn expected_trip_schema() -> Schema {
    let mut schema = Schema::default();
    schema.with_column("VendorID".into(), DataType::Int32);
    schema.with_column(
        PICKUP_COLUMN.into(),
        DataType::Datetime(TimeUnit::Microseconds, None),
    );
    schema.with_column(
        DROPOFF_COLUMN.into(),
        DataType::Datetime(TimeUnit::Microseconds, None),
    );
    schema.with_column("passenger_count".into(), DataType::Int64);
    schema.with_column("trip_distance".into(), DataType::Float64);
    schema.with_column("RatecodeID".into(), DataType::Int64);
    schema.with_column("store_and_fwd_flag".into(), DataType::String);
    schema.with_column("PULocationID".into(), DataType::Int32);
    schema.with_column("DOLocationID".into(), DataType::Int32);
    schema.with_column("payment_type".into(), DataType::Int64);
    schema.with_column("fare_amount".into(), DataType::Float64);
    schema.with_column("extra".into(), DataType::Float64);
    schema.with_column("mta_tax".into(), DataType::Float64);
    schema.with_column("tip_amount".into(), DataType::Float64);
    schema.with_column("tolls_amount".into(), DataType::Float64);
    schema.with_column("improvement_surcharge".into(), DataType::Float64);
    schema.with_column("total_amount".into(), DataType::Float64);
    schema.with_column("congestion_surcharge".into(), DataType::Float64);
    schema.with_column("Airport_fee".into(), DataType::Float64);
    schema
}

/// Check that every documented column is present in `schema`.
///
/// Extra columns are tolerated; dtype drift between yearly releases is only
/// logged, since older files store some identifiers with wider integers.
pub fn validate_trip_schema(schema: &Schema) -> Result<()> {
    let expected = expected_trip_schema();
    let mut missing = Vec::new();

    for (name, dtype) in expected.iter() {
        match schema.get(name) {
            None => missing.push(name.to_string()),
            Some(actual) if actual != dtype => {
                tracing::warn!(
                    column = name.as_str(),
                    expected = %dtype,
                    actual = %actual,
                    "trip column dtype differs from the data dictionary"
                );
            }
            Some(_) => {}
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TourError::Validation(format!(
            "trip data is missing documented columns: {}",
            missing.join(", ")
        )))
    }
}
