use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::core::domain::{Event, Prediction};
use crate::parsing::{catalog_csv, prediction_json};

/// Loads earthquake catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog file (CSV: time, lat, lon, depth, magnitude; no header)
    pub fn load_from_file(path: &Path) -> Result<Vec<Event>> {
        ensure_extension(path, &["csv", "txt"])?;

        let events = catalog_csv::parse_catalog_csv_to_events(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?;

        info!("Loaded {} events from {}", events.len(), path.display());
        Ok(events)
    }

    /// Keep only events of at least `min_magnitude`
    pub fn filter_by_magnitude(events: Vec<Event>, min_magnitude: f64) -> Vec<Event> {
        events
            .into_iter()
            .filter(|e| e.magnitude() >= min_magnitude)
            .collect()
    }
}

/// Loads and stores prediction sets.
pub struct PredictionLoader;

impl PredictionLoader {
    /// Load predictions from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Vec<Prediction>> {
        ensure_extension(path, &["json"])?;

        let predictions = prediction_json::parse_predictions_json(path)
            .with_context(|| format!("Failed to load predictions {}", path.display()))?;

        info!("Loaded {} predictions from {}", predictions.len(), path.display());
        Ok(predictions)
    }

    /// Write predictions to a JSON file
    pub fn save_to_file(predictions: &[Prediction], path: &Path) -> Result<()> {
        let json = prediction_json::predictions_to_json(predictions)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write predictions to {}", path.display()))?;

        info!("Wrote {} predictions to {}", predictions.len(), path.display());
        Ok(())
    }
}

fn ensure_extension(path: &Path, allowed: &[&str]) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .context("File has no extension")?
        .to_lowercase();

    if !allowed.contains(&extension.as_str()) {
        anyhow::bail!("Unsupported file format: {}", extension);
    }
    Ok(())
}
