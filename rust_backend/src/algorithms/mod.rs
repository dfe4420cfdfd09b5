//! Forecast evaluation algorithms.
//!
//! # Components
//!
//! - [`hit_test`]: Labels predictions as hits or misses against a catalog
//! - [`conflicts`]: Overlap graph between predictions sharing time and space
//! - [`independent_sets`]: Randomized maximal independent sets of the overlap graph
//! - [`skill`]: Monte Carlo skill estimation over independent resamples
//!
//! # Example
//!
//! ```no_run
//! use quake_skill::algorithms::{calculate_skill, test_predictions, HitTestOptions, SkillOptions};
//! # use quake_skill::core::{Event, Prediction};
//!
//! # fn example(predictions: &[Prediction], catalog: &[Event]) -> quake_skill::SkillResult<()> {
//! let tested = test_predictions(predictions, catalog, &HitTestOptions::default());
//! let report = calculate_skill(&tested, &SkillOptions::default())?;
//! println!("Information ratio: {:.3}", report.information_ratio);
//! # Ok(())
//! # }
//! ```

pub mod conflicts;
pub mod independent_sets;
pub mod skill;

pub use conflicts::{conflicts, OverlapGraph};
pub use hit_test::{test_predictions, HitSummary, HitTestOptions, MagnitudeFilter};
pub use independent_sets::{draw_independent_sets, sample_independent_set, sample_rng};
pub use skill::{
    calculate_skill, estimate_samples, SampleSkill, SkillOptions, SkillReport,
};
