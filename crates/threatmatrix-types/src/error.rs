// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Threat Matrix failures.
///
/// Aggregation itself never fails; errors come from building a kernel
/// out of a malformed configuration or from decoding sensor input.
#[derive(Error, Debug)]
pub enum ThreatError {
    /// Malformed configuration: empty, ragged, or non-square weight
    /// table, non-finite or negative weight, bad reduction tuning.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid input value (threshold, parameter).
    #[error("validation error: {0}")]
    Validation(String),

    /// Sensor packet stream could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

pub type ThreatResult<T> = Result<T, ThreatError>;
