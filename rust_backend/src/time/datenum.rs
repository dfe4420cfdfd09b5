use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

/// Datenum of 0001-01-01 minus one; datenums count days from year 0.
const DATENUM_OFFSET: i64 = 366;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a calendar time to a datenum (fractional days since year 0)
///
/// # Arguments
/// * `dt` - Naive UTC time
///
/// # Returns
/// * `f64` - Datenum, e.g. 737791.0 for 2020-01-01 00:00
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use quake_skill::time::datetime_to_datenum;
///
/// let dt = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(datetime_to_datenum(&dt), 737_791.5);
/// ```
pub fn datetime_to_datenum(dt: &NaiveDateTime) -> f64 {
    let days = DATENUM_OFFSET + i64::from(dt.date().num_days_from_ce());
    let seconds = f64::from(dt.time().num_seconds_from_midnight())
        + f64::from(dt.time().nanosecond()) / 1e9;
    days as f64 + seconds / SECONDS_PER_DAY
}

/// Convert a datenum back to a calendar time, to millisecond resolution
///
/// Returns `None` for non-finite values or dates chrono cannot represent.
pub fn datenum_to_datetime(datenum: f64) -> Option<NaiveDateTime> {
    if !datenum.is_finite() {
        return None;
    }

    let whole_days = datenum.floor();
    let millis = ((datenum - whole_days) * SECONDS_PER_DAY * 1000.0).round() as i64;
    let ordinal = i32::try_from(whole_days as i64 - DATENUM_OFFSET).ok()?;

    NaiveDate::from_num_days_from_ce_opt(ordinal)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::milliseconds(millis))
}

/// Datenum of January 1st, 00:00 of `year`
pub fn year_start_datenum(year: i32) -> Option<f64> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| datetime_to_datenum(&dt))
}
