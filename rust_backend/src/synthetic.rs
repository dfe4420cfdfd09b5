//! Random prediction sets for baselines, tests and benchmarks.
//!
//! Generated predictions last 1 to 30 whole days, cover 30 to 300 km, target
//! magnitude 5 and above, and start untested with no probability.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::domain::Prediction;
use crate::error::{SkillError, SkillResult};
use crate::time::year_start_datenum;

const DURATION_DAYS: (f64, f64) = (1.0, 30.0);
const RADIUS_KM: (f64, f64) = (30.0, 300.0);
const MIN_MAGNITUDE: f64 = 5.0;

/// Bounding boxes predictions can be scattered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Degenerate one-point box at (1, 1).
    Test,
    Global,
    Chile,
    Greece,
    Italy,
    Japan,
    Turkey,
}

/// Latitude and longitude ranges in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub latitude: (f64, f64),
    pub longitude: (f64, f64),
}

impl Region {
    pub fn bounding_box(&self) -> BoundingBox {
        let (latitude, longitude) = match self {
            Region::Test => ((1.0, 1.0), (1.0, 1.0)),
            Region::Global => ((-90.0, 90.0), (-180.0, 180.0)),
            Region::Chile => ((-56.72, -17.49), (-109.67, -66.07)),
            Region::Greece => ((34.70, 41.74), (19.24, 29.72)),
            Region::Italy => ((35.28, 47.09), (6.62, 18.78)),
            Region::Japan => ((20.21, 45.71), (122.71, 154.20)),
            Region::Turkey => ((35.80, 42.29), (25.62, 44.81)),
        };
        BoundingBox {
            latitude,
            longitude,
        }
    }
}

impl FromStr for Region {
    type Err = SkillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "test" => Ok(Region::Test),
            "global" => Ok(Region::Global),
            "chile" => Ok(Region::Chile),
            "greece" => Ok(Region::Greece),
            "italy" => Ok(Region::Italy),
            "japan" => Ok(Region::Japan),
            "turkey" => Ok(Region::Turkey),
            other => Err(SkillError::invalid(format!("unknown region '{}'", other))),
        }
    }
}

/// Generates `count` random predictions inside `region`, starting between
/// January 1st of `year_start` and January 1st of `year_end`.
///
/// # Errors
///
/// [`SkillError::InvalidInput`] if `year_end < year_start` or a year is out of
/// the calendar range.
pub fn generate_predictions<R: Rng + ?Sized>(
    count: usize,
    region: Region,
    year_start: i32,
    year_end: i32,
    rng: &mut R,
) -> SkillResult<Vec<Prediction>> {
    if year_end < year_start {
        return Err(SkillError::invalid(format!(
            "year_end {} precedes year_start {}",
            year_end, year_start
        )));
    }
    let t0 = year_start_datenum(year_start)
        .ok_or_else(|| SkillError::invalid(format!("year {} out of range", year_start)))?;
    let t1 = year_start_datenum(year_end)
        .ok_or_else(|| SkillError::invalid(format!("year {} out of range", year_end)))?;
    let bbox = region.bounding_box();

    let predictions = (0..count)
        .map(|_| {
            let start = uniform(rng, (t0, t1));
            let duration = uniform(rng, DURATION_DAYS).round();
            let latitude = uniform(rng, bbox.latitude);
            let longitude = uniform(rng, bbox.longitude);
            let radius = uniform(rng, RADIUS_KM);
            Prediction::new(start, duration, latitude, longitude, radius, MIN_MAGNITUDE)
        })
        .collect::<SkillResult<Vec<_>>>()?;

    log::info!("Generated {} predictions over {:?}", predictions.len(), region);
    Ok(predictions)
}

/// Uniform draw in `[lo, hi)`, or `lo` for an empty range.
fn uniform<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}
