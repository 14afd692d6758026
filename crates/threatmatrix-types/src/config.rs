// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{ThreatError, ThreatResult};

/// Reference weight table, one row per category (Land, Sea, Air).
pub const REFERENCE_WEIGHTS: [[f64; 3]; 3] = [
    [0.2, 0.1, 0.3],   // Land
    [0.15, 0.25, 0.1], // Sea
    [0.3, 0.2, 0.15],  // Air
];

/// Largest accepted `alert_history_window`.
pub const MAX_ALERT_HISTORY_WINDOW: usize = 4096;

/// Runtime configuration for the Threat Matrix kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    /// Square weight matrix, one row per domain category.
    /// Default: the 3×3 Land/Sea/Air reference table.
    pub weights: Vec<Vec<f64>>,

    /// Smallest partition handed to a single worker.
    /// Default: 4096 readings.
    pub min_chunk_len: usize,

    /// Upper bound on partitions per reduction. 0 = rayon pool size.
    /// Default: 0.
    pub max_workers: usize,

    /// Packet alert: value must be strictly above this.
    /// Default: 0.8.
    pub alert_value_threshold: f64,

    /// Packet alert: confidence must be strictly above this.
    /// Default: 0.7.
    pub alert_confidence_threshold: f64,

    /// Number of recent alerts retained by the detector.
    /// Default: 16. At most [`MAX_ALERT_HISTORY_WINDOW`].
    pub alert_history_window: usize,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            weights: REFERENCE_WEIGHTS.iter().map(|row| row.to_vec()).collect(),
            min_chunk_len: 4096,
            max_workers: 0,
            alert_value_threshold: 0.8,
            alert_confidence_threshold: 0.7,
            alert_history_window: 16,
        }
    }
}

impl ThreatConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> ThreatResult<()> {
        validate_weights(&self.weights)?;
        if self.min_chunk_len == 0 {
            return Err(ThreatError::Config(
                "min_chunk_len must be >= 1".to_string(),
            ));
        }
        for (name, value) in [
            ("alert_value_threshold", self.alert_value_threshold),
            ("alert_confidence_threshold", self.alert_confidence_threshold),
        ] {
            if !value.is_finite() {
                return Err(ThreatError::Config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.alert_history_window > MAX_ALERT_HISTORY_WINDOW {
            return Err(ThreatError::Config(format!(
                "alert_history_window must be <= {MAX_ALERT_HISTORY_WINDOW}, got {}",
                self.alert_history_window
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ThreatResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ThreatError::Config(format!("JSON parse error: {e}")))
    }
}

/// Check that `rows` is a non-empty square matrix of finite,
/// non-negative weights.
pub fn validate_weights(rows: &[Vec<f64>]) -> ThreatResult<()> {
    let n = rows.len();
    if n == 0 {
        return Err(ThreatError::Config(
            "weight table must have at least one category".to_string(),
        ));
    }
    for (r, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(ThreatError::Config(format!(
                "weight table must be square: row {r} has {} entries, expected {n}",
                row.len()
            )));
        }
        for (c, &w) in row.iter().enumerate() {
            if !w.is_finite() {
                return Err(ThreatError::Config(format!(
                    "weight [{r}][{c}] must be finite, got {w}"
                )));
            }
            if w < 0.0 {
                return Err(ThreatError::Config(format!(
                    "weight [{r}][{c}] must be >= 0, got {w}"
                )));
            }
        }
    }
    Ok(())
}
