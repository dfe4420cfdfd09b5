//! Parsers for catalog and forecast input formats.
//!
//! # Parsers
//!
//! - [`catalog_csv`]: Headerless earthquake catalog CSV (via Polars)
//! - [`prediction_json`]: JSON arrays of prediction records
//!
//! # Example
//!
//! ```no_run
//! use quake_skill::parsing::catalog_csv::parse_catalog_csv_to_events;
//! use std::path::Path;
//!
//! let events = parse_catalog_csv_to_events(Path::new("comCat_1990_20200325_M5.csv"))
//!     .expect("Failed to parse catalog");
//! ```

pub mod catalog_csv;
pub mod prediction_json;

#[cfg(test)]
mod catalog_csv_tests;
