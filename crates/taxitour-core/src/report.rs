// crates/taxitour-core/src/report.rs

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use polars::prelude::*;

use crate::error::Result;

pub const DEFAULT_MAX_ROWS: usize = 10;

/// Render a frame as a terminal table, eliding rows past `max_rows`.
pub fn dataframe_table(df: &DataFrame, max_rows: usize) -> Result<Table> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            df.get_column_names()
                .iter()
                .map(|name| name.to_string())
                .collect::<Vec<_>>(),
        );

    let shown = df.height().min(max_rows);
    for idx in 0..shown {
        let mut row = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            row.push(cell_value(column.get(idx)?));
        }
        table.add_row(row);
    }

    if df.height() > shown {
        table.add_row(vec![format!("… {} more rows", df.height() - shown)]);
    }

    Ok(table)
}

pub fn schema_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["column", "dtype"]);
    for (name, dtype) in schema.iter() {
        table.add_row(vec![name.to_string(), dtype.to_string()]);
    }
    table
}

fn cell_value(value: AnyValue) -> String {
    match value {
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Null => String::new(),
        other => other.to_string(),
    }
}
