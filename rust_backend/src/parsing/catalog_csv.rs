use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::core::domain::Event;

/// Column order of a catalog file: time (datenum), latitude, longitude,
/// depth (km), magnitude. Files carry no header row.
pub const CATALOG_COLUMNS: [&str; 5] = ["time", "latitude", "longitude", "depth_km", "magnitude"];

/// Parse a headerless catalog CSV into a Polars DataFrame
///
/// Columns are renamed to [`CATALOG_COLUMNS`] and cast to Float64, since
/// integral depths or times are otherwise inferred as i64.
pub fn parse_catalog_csv(csv_path: &Path) -> Result<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(false)
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()
        .with_context(|| format!("Failed to parse catalog CSV: {}", csv_path.display()))?;

    if df.width() != CATALOG_COLUMNS.len() {
        anyhow::bail!(
            "Catalog must have {} columns (time, lat, lon, depth, magnitude), found {}",
            CATALOG_COLUMNS.len(),
            df.width()
        );
    }

    df.set_column_names(CATALOG_COLUMNS)
        .context("Failed to name catalog columns")?;

    let float_columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|c| c.cast(&DataType::Float64))
        .collect::<PolarsResult<_>>()
        .context("Catalog columns must be numeric")?;

    DataFrame::new(float_columns).context("Failed to rebuild catalog DataFrame")
}

/// Parse a catalog CSV into validated events
pub fn parse_catalog_csv_to_events(csv_path: &Path) -> Result<Vec<Event>> {
    let df = parse_catalog_csv(csv_path)?;
    dataframe_to_events(&df)
}

/// Convert a catalog DataFrame (as produced by [`parse_catalog_csv`]) to events
///
/// Missing cells and out-of-domain values are reported with their 1-based row.
pub fn dataframe_to_events(df: &DataFrame) -> Result<Vec<Event>> {
    let times = df.column("time")?.f64()?;
    let lats = df.column("latitude")?.f64()?;
    let lons = df.column("longitude")?.f64()?;
    let depths = df.column("depth_km")?.f64()?;
    let mags = df.column("magnitude")?.f64()?;

    let mut events = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let row = i + 1;
        let cell = |value: Option<f64>, name: &str| {
            value.with_context(|| format!("Catalog row {}: missing {}", row, name))
        };

        let event = Event::new(
            cell(times.get(i), "time")?,
            cell(lats.get(i), "latitude")?,
            cell(lons.get(i), "longitude")?,
            cell(depths.get(i), "depth")?,
            cell(mags.get(i), "magnitude")?,
        )
        .with_context(|| format!("Catalog row {}", row))?;
        events.push(event);
    }

    Ok(events)
}
