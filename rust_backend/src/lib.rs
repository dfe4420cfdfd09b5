//! Quake Skill - Predictive skill evaluation for earthquake forecasts
//!
//! A prediction claims an earthquake of at least some magnitude within a
//! space-time window, with an asserted probability. This crate tests
//! predictions against an event catalog and scores the set with an
//! information ratio and a Monte Carlo significance that account for
//! overlapping predictions.
//!
//! # Pipeline
//!
//! 1. [`algorithms::test_predictions`] labels each prediction hit or miss
//! 2. [`algorithms::OverlapGraph`] links predictions sharing time and space
//! 3. [`algorithms::draw_independent_sets`] resamples non-overlapping subsets
//! 4. [`algorithms::calculate_skill`] runs the Monte Carlo test per resample and
//!    averages the results into a [`algorithms::SkillReport`]

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod geo;
pub mod io;
pub mod parsing;
pub mod synthetic;
pub mod time;

pub use algorithms::{calculate_skill, test_predictions, SkillOptions, SkillReport};
pub use error::{SkillError, SkillResult};
pub use geo::great_circle_distance_km;
