// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Sensor Packet Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::score::Domain;

/// One reading from a sensing collaborator, as carried on the wire.
///
/// Field names are emitted lowercase. On input the lowercase,
/// capitalized, and uppercase spellings are accepted (`value`, `Value`,
/// `VALUE`); other mixed-case spellings are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPacket {
    /// Free-form domain tag; see [`SensorPacket::category`].
    #[serde(alias = "Domain", alias = "DOMAIN")]
    pub domain: String,
    /// RFC 3339 timestamp as sent by the producer. Not interpreted.
    #[serde(default, alias = "Timestamp", alias = "TIMESTAMP")]
    pub timestamp: String,
    #[serde(rename = "lat", alias = "Lat", alias = "LAT")]
    pub latitude: f64,
    #[serde(rename = "lon", alias = "Lon", alias = "LON")]
    pub longitude: f64,
    #[serde(alias = "Value", alias = "VALUE")]
    pub value: f64,
    #[serde(alias = "Confidence", alias = "CONFIDENCE")]
    pub confidence: f64,
}

impl SensorPacket {
    /// Reference category for this packet, if the tag names one.
    pub fn category(&self) -> Option<Domain> {
        Domain::parse(&self.domain)
    }
}

/// Emitted for a packet whose value and confidence both cross the
/// detector thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatAlert {
    pub domain: String,
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
    pub confidence: f64,
}

impl From<&SensorPacket> for ThreatAlert {
    fn from(p: &SensorPacket) -> Self {
        Self {
            domain: p.domain.clone(),
            latitude: p.latitude,
            longitude: p.longitude,
            value: p.value,
            confidence: p.confidence,
        }
    }
}
