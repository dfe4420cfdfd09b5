//! Spherical geometry on the Earth's surface.
//!
//! Only what the skill evaluation needs: validated coordinates and the
//! haversine great-circle distance.
//!
//! # Example
//!
//! ```
//! use quake_skill::geo::great_circle_distance_km;
//!
//! let d = great_circle_distance_km(0.0, 0.0, 0.0, 180.0).unwrap();
//! assert!((d - 20_015.087).abs() < 1e-3);
//! ```

pub mod haversine;

pub use haversine::{
    distances_from, great_circle_distance_km, GeoPoint, EARTH_RADIUS_KM,
};
