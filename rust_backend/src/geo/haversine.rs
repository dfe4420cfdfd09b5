use serde::{Deserialize, Serialize};

use crate::error::{SkillError, SkillResult};

/// Mean Earth radius used for all distances, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in degrees.
///
/// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`; both must
/// be finite.
///
/// # Examples
///
/// ```
/// use quake_skill::geo::GeoPoint;
///
/// let athens = GeoPoint::new(37.98, 23.73).unwrap();
/// assert_eq!(athens.latitude(), 37.98);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = SkillError;

    fn try_from(raw: RawGeoPoint) -> SkillResult<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> SkillResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SkillError::invalid(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SkillError::invalid(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers.
    ///
    /// Infallible because both points were validated on construction.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Great-circle distance between two coordinate pairs, in kilometers.
///
/// Uses the haversine formula in its `atan2(sqrt(a), sqrt(1 - a))` form so that
/// near-antipodal points cannot push `asin` out of its domain.
///
/// # Errors
///
/// Returns [`SkillError::InvalidInput`] if any coordinate is non-finite or
/// outside the latitude/longitude domain.
///
/// # Examples
///
/// ```
/// use quake_skill::geo::great_circle_distance_km;
///
/// assert_eq!(great_circle_distance_km(0.0, 0.0, 0.0, 0.0).unwrap(), 0.0);
/// assert!(great_circle_distance_km(0.0, 0.0, 100.0, 0.0).is_err());
/// ```
pub fn great_circle_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> SkillResult<f64> {
    let a = GeoPoint::new(lat1, lon1)?;
    let b = GeoPoint::new(lat2, lon2)?;
    Ok(a.distance_km(&b))
}

/// Distances from one origin to many points, in input order.
pub fn distances_from<'a, I>(origin: &'a GeoPoint, points: I) -> impl Iterator<Item = f64> + 'a
where
    I: IntoIterator<Item = &'a GeoPoint>,
    I::IntoIter: 'a,
{
    points.into_iter().map(move |p| origin.distance_km(p))
}

fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = phi2 - phi1;
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // rounding can leave `a` a hair outside [0, 1]
    let a = a.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn identical_points_are_zero_apart() {
        assert_eq!(great_circle_distance_km(0.0, 0.0, 0.0, 0.0).unwrap(), 0.0);
        assert_eq!(
            great_circle_distance_km(38.5, -122.1, 38.5, -122.1).unwrap(),
            0.0
        );
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = great_circle_distance_km(0.0, 0.0, 0.0, 180.0).unwrap();
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-9);
        assert!((d - 20_015.0).abs() < 1.0);

        let poles = great_circle_distance_km(90.0, 0.0, -90.0, 0.0).unwrap();
        assert!((poles - PI * EARTH_RADIUS_KM).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = great_circle_distance_km(10.0, 20.0, 11.0, 20.0).unwrap();
        assert!((d - 111.195).abs() < 1e-3, "got {}", d);
    }

    #[test]
    fn rejects_out_of_domain_coordinates() {
        for (lat, lon) in [(90.5, 0.0), (-91.0, 0.0), (0.0, 180.1), (0.0, -181.0)] {
            let err = great_circle_distance_km(lat, lon, 0.0, 0.0).unwrap_err();
            assert!(matches!(err, SkillError::InvalidInput(_)));
        }
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn vectorized_distances_match_pairwise() {
        let origin = GeoPoint::new(35.0, 139.0).unwrap();
        let points = vec![
            GeoPoint::new(35.0, 139.0).unwrap(),
            GeoPoint::new(36.0, 140.0).unwrap(),
            GeoPoint::new(-35.0, -41.0).unwrap(),
        ];
        let got: Vec<f64> = distances_from(&origin, &points).collect();
        assert_eq!(got.len(), 3);
        for (d, p) in got.iter().zip(&points) {
            assert_eq!(*d, origin.distance_km(p));
        }
        // exact antipode, the atan2 form loses ~1e-4 km there
        assert!((got[2] - PI * EARTH_RADIUS_KM).abs() < 1e-3);
    }

    #[test]
    fn deserialization_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"latitude": 1.0, "longitude": 2.0}"#).unwrap();
        assert_eq!(ok.longitude(), 2.0);
        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude": 100.0, "longitude": 2.0}"#);
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn distance_is_symmetric_and_bounded(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let ab = great_circle_distance_km(lat1, lon1, lat2, lon2).unwrap();
            let ba = great_circle_distance_km(lat2, lon2, lat1, lon1).unwrap();
            prop_assert!(ab.is_finite());
            prop_assert!(ab >= 0.0);
            prop_assert!(ab <= PI * EARTH_RADIUS_KM + 1e-6);
            prop_assert!((ab - ba).abs() < 1e-6);
        }
    }
}
