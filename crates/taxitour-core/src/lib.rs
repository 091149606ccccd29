pub mod dataset;
#[cfg(feature = "runtime")]
pub mod download;
pub mod error;
pub mod query;
pub mod report;
pub mod schema;
pub mod weather;
