//! Linear day-count ("datenum") time helpers.
//!
//! Catalog and prediction times are fractional days since year 0, the format
//! the catalogs are distributed in. Conversions go through chrono.

pub mod datenum;

pub use datenum::{datenum_to_datetime, datetime_to_datenum, year_start_datenum};
