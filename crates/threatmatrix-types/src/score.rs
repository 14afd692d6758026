// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Score Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference domain categories. Each selects one row of the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Land,
    Sea,
    Air,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Land, Domain::Sea, Domain::Air];

    /// Row index of this category in the weight table.
    pub fn index(self) -> usize {
        match self {
            Domain::Land => 0,
            Domain::Sea => 1,
            Domain::Air => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Case-insensitive lookup by name (`"land"`, `"SEA"`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "land" => Some(Domain::Land),
            "sea" => Some(Domain::Sea),
            "air" => Some(Domain::Air),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Domain::Land => "land",
            Domain::Sea => "sea",
            Domain::Air => "air",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse banding of an aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    pub const HIGH_ABOVE: f64 = 0.7;
    pub const MEDIUM_ABOVE: f64 = 0.4;

    /// `High` above 0.7, `Medium` above 0.4, `Low` otherwise.
    /// NaN falls through to `Low`.
    pub fn classify(score: f64) -> Self {
        if score > Self::HIGH_ABOVE {
            ThreatLevel::High
        } else if score > Self::MEDIUM_ABOVE {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThreatLevel::Low => "LOW",
            ThreatLevel::Medium => "MEDIUM",
            ThreatLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_index_roundtrip() {
        for d in Domain::ALL {
            assert_eq!(Domain::from_index(d.index()), Some(d));
        }
        assert_eq!(Domain::from_index(3), None);
    }

    #[test]
    fn test_domain_parse_case_insensitive() {
        assert_eq!(Domain::parse("LAND"), Some(Domain::Land));
        assert_eq!(Domain::parse(" sea "), Some(Domain::Sea));
        assert_eq!(Domain::parse("cyber"), None);
    }

    #[test]
    fn test_domain_serde_lowercase() {
        let json = serde_json::to_string(&Domain::Air).unwrap();
        assert_eq!(json, "\"air\"");
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(ThreatLevel::classify(0.82), ThreatLevel::High);
        assert_eq!(ThreatLevel::classify(0.7), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::classify(0.41), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::classify(0.4), ThreatLevel::Low);
        assert_eq!(ThreatLevel::classify(0.0), ThreatLevel::Low);
    }

    #[test]
    fn test_level_nan_is_low() {
        assert_eq!(ThreatLevel::classify(f64::NAN), ThreatLevel::Low);
    }

    #[test]
    fn test_level_ordering() {
        assert!(ThreatLevel::High > ThreatLevel::Medium);
        assert!(ThreatLevel::Medium > ThreatLevel::Low);
    }
}
