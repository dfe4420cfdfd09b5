use anyhow::{Context, Result};
use std::path::Path;

use crate::core::domain::Prediction;

/// Parse a prediction JSON file
///
/// The file holds an array of prediction records; see
/// [`crate::core::domain::PredictionRecord`] for the fields.
pub fn parse_predictions_json(json_path: &Path) -> Result<Vec<Prediction>> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    parse_predictions_json_str(&json_content)
}

/// Parse predictions from a JSON string
///
/// Errors name the failing element, e.g. `Invalid prediction at [3]: ...` for
/// a record that fails validation, or `[0].latitude` for a mistyped field.
pub fn parse_predictions_json_str(json_str: &str) -> Result<Vec<Prediction>> {
    let deserializer = &mut serde_json::Deserializer::from_str(json_str);
    let predictions: Vec<Prediction> = serde_path_to_error::deserialize(deserializer)
        .map_err(|e| anyhow::anyhow!("Invalid prediction at {}: {}", e.path(), e.inner()))?;

    Ok(predictions)
}

/// Serialize predictions (e.g. after hit testing) as pretty JSON
pub fn predictions_to_json(predictions: &[Prediction]) -> Result<String> {
    serde_json::to_string_pretty(predictions).context("Failed to serialize predictions")
}
