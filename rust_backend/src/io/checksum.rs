//! Checksums tying a skill report to the exact predictions it scored.

use sha2::{Digest, Sha256};

use crate::core::domain::Prediction;
use crate::error::{SkillError, SkillResult};

/// SHA-256 of the JSON form of `predictions`, hex encoded.
///
/// Two prediction sets with equal fields in the same order share a checksum;
/// any change to a field, outcome or order changes it.
pub fn prediction_set_checksum(predictions: &[Prediction]) -> SkillResult<String> {
    let json = serde_json::to_string(predictions)
        .map_err(|e| SkillError::invalid(format!("unserializable prediction set: {}", e)))?;
    Ok(calculate_checksum(&json))
}

/// SHA-256 of `content`, hex encoded.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
