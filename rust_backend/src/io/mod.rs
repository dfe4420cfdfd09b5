//! High-level data loading utilities.
//!
//! Loaders combine the parsers with format checks and logging and hand back
//! validated domain records.
//!
//! # Example
//!
//! ```no_run
//! use quake_skill::io::loaders::{CatalogLoader, PredictionLoader};
//! use std::path::Path;
//!
//! let catalog = CatalogLoader::load_from_file(Path::new("catalog.csv"))
//!     .expect("Failed to load");
//! let predictions = PredictionLoader::load_from_file(Path::new("predictions.json"))
//!     .expect("Failed to load");
//! println!("{} events, {} predictions", catalog.len(), predictions.len());
//! ```

pub mod checksum;
pub mod loaders;


pub use checksum::{calculate_checksum, prediction_set_checksum};
pub use loaders::{CatalogLoader, PredictionLoader};
