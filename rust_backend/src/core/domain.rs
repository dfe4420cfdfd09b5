//! Domain models for earthquake predictions and catalog events.
//!
//! Both record types are validated when they are built, whether by a
//! constructor or through serde, so the algorithms downstream never see a
//! negative radius or an out-of-range coordinate.

use serde::{Deserialize, Serialize};

use crate::error::{SkillError, SkillResult};
use crate::geo::GeoPoint;

/// Result of testing a prediction against a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Hit,
    Miss,
    /// Not tested yet.
    #[default]
    Undefined,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Hit => "hit",
            Outcome::Miss => "miss",
            Outcome::Undefined => "undefined",
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, Outcome::Undefined)
    }
}

/// A forecast that an earthquake of at least `min_magnitude` will occur
/// within `radius_km` of `center` between `start_time` and `end_time()`.
///
/// Times are linear day counts (see [`crate::time`]). The end of the window is
/// always derived from `start_time + duration` and never stored.
///
/// # Examples
///
/// ```
/// use quake_skill::core::{Outcome, Prediction};
///
/// let p = Prediction::new(737_791.0, 7.0, 38.0, 23.5, 150.0, 5.0)
///     .unwrap()
///     .with_probability(0.2)
///     .unwrap();
///
/// assert_eq!(p.end_time(), 737_798.0);
/// assert_eq!(p.probability(), Some(0.2));
/// assert_eq!(p.outcome(), Outcome::Undefined);
///
/// // Negative durations are rejected up front
/// assert!(Prediction::new(737_791.0, -1.0, 38.0, 23.5, 150.0, 5.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PredictionRecord", into = "PredictionRecord")]
pub struct Prediction {
    id: Option<String>,
    start_time: f64,
    duration: f64,
    center: GeoPoint,
    radius_km: f64,
    min_magnitude: f64,
    probability: Option<f64>,
    outcome: Outcome,
}

/// Flat wire form of a [`Prediction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start_time: f64,
    pub duration: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub min_magnitude: f64,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub outcome: Outcome,
}

impl TryFrom<PredictionRecord> for Prediction {
    type Error = SkillError;

    fn try_from(record: PredictionRecord) -> SkillResult<Self> {
        let mut prediction = Prediction::new(
            record.start_time,
            record.duration,
            record.latitude,
            record.longitude,
            record.radius_km,
            record.min_magnitude,
        )?
        .with_outcome(record.outcome);
        prediction.id = record.id;
        if let Some(p) = record.probability {
            prediction = prediction.with_probability(p)?;
        }
        Ok(prediction)
    }
}

impl From<Prediction> for PredictionRecord {
    fn from(p: Prediction) -> Self {
        Self {
            id: p.id,
            start_time: p.start_time,
            duration: p.duration,
            latitude: p.center.latitude(),
            longitude: p.center.longitude(),
            radius_km: p.radius_km,
            min_magnitude: p.min_magnitude,
            probability: p.probability,
            outcome: p.outcome,
        }
    }
}

impl Prediction {
    /// Creates an untested prediction with no probability assigned.
    ///
    /// # Errors
    ///
    /// [`SkillError::InvalidInput`] if any value is non-finite, if `duration`
    /// or `radius_km` is negative, or if the center is outside the coordinate
    /// domain.
    pub fn new(
        start_time: f64,
        duration: f64,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        min_magnitude: f64,
    ) -> SkillResult<Self> {
        require_finite("start_time", start_time)?;
        require_non_negative("duration", duration)?;
        require_non_negative("radius_km", radius_km)?;
        require_finite("min_magnitude", min_magnitude)?;
        let center = GeoPoint::new(latitude, longitude)?;

        Ok(Self {
            id: None,
            start_time,
            duration,
            center,
            radius_km,
            min_magnitude,
            probability: None,
            outcome: Outcome::Undefined,
        })
    }

    /// Attaches a caller-chosen label.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns a copy carrying the asserted probability `p`.
    ///
    /// # Errors
    ///
    /// [`SkillError::InvalidInput`] unless `p` is finite and in `[0, 1]`.
    pub fn with_probability(mut self, p: f64) -> SkillResult<Self> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(SkillError::invalid(format!(
                "probability {} outside [0, 1]",
                p
            )));
        }
        self.probability = Some(p);
        Ok(self)
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    pub fn center(&self) -> &GeoPoint {
        &self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn min_magnitude(&self) -> f64 {
        self.min_magnitude
    }

    pub fn probability(&self) -> Option<f64> {
        self.probability
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_hit(&self) -> bool {
        self.outcome == Outcome::Hit
    }

    /// True when the open time windows of `self` and `other` intersect.
    pub fn overlaps_in_time(&self, other: &Prediction) -> bool {
        self.start_time.max(other.start_time) < self.end_time().min(other.end_time())
    }

    /// True when the two prediction disks intersect (touching does not count).
    pub fn overlaps_in_space(&self, other: &Prediction) -> bool {
        self.center.distance_km(&other.center) < self.radius_km + other.radius_km
    }
}

/// One catalog earthquake. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord", into = "EventRecord")]
pub struct Event {
    time: f64,
    epicenter: GeoPoint,
    depth_km: f64,
    magnitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub time: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: f64,
    pub magnitude: f64,
}

impl TryFrom<EventRecord> for Event {
    type Error = SkillError;

    fn try_from(r: EventRecord) -> SkillResult<Self> {
        Event::new(r.time, r.latitude, r.longitude, r.depth_km, r.magnitude)
    }
}

impl From<Event> for EventRecord {
    fn from(e: Event) -> Self {
        Self {
            time: e.time,
            latitude: e.epicenter.latitude(),
            longitude: e.epicenter.longitude(),
            depth_km: e.depth_km,
            magnitude: e.magnitude,
        }
    }
}

impl Event {
    pub fn new(
        time: f64,
        latitude: f64,
        longitude: f64,
        depth_km: f64,
        magnitude: f64,
    ) -> SkillResult<Self> {
        require_finite("time", time)?;
        require_finite("depth_km", depth_km)?;
        require_finite("magnitude", magnitude)?;
        Ok(Self {
            time,
            epicenter: GeoPoint::new(latitude, longitude)?,
            depth_km,
            magnitude,
        })
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn epicenter(&self) -> &GeoPoint {
        &self.epicenter
    }

    pub fn depth_km(&self) -> f64 {
        self.depth_km
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

fn require_finite(field: &str, value: f64) -> SkillResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SkillError::invalid(format!("{} must be finite, got {}", field, value)))
    }
}

fn require_non_negative(field: &str, value: f64) -> SkillResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(SkillError::invalid(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    Ok(())
}
