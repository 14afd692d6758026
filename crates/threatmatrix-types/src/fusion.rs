// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Domain Fusion Report
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall banding of a fused multi-domain picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallThreat {
    Moderate,
    High,
    Critical,
}

impl OverallThreat {
    pub const CRITICAL_ABOVE: f64 = 0.7;
    pub const HIGH_ABOVE: f64 = 0.5;

    /// `Critical` above 0.7, `High` above 0.5, `Moderate` otherwise.
    pub fn classify(average: f64) -> Self {
        if average > Self::CRITICAL_ABOVE {
            OverallThreat::Critical
        } else if average > Self::HIGH_ABOVE {
            OverallThreat::High
        } else {
            OverallThreat::Moderate
        }
    }

    /// Standing actions for this band.
    pub fn recommended_actions(self) -> &'static [&'static str] {
        match self {
            OverallThreat::Critical => &[
                "Activate surveillance protocols",
                "Alert command center",
                "Prepare rapid response teams",
            ],
            OverallThreat::High => &[
                "Increase monitoring frequency",
                "Notify sector commanders",
            ],
            OverallThreat::Moderate => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OverallThreat::Moderate => "MODERATE",
            OverallThreat::High => "HIGH",
            OverallThreat::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for OverallThreat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of one fusion pass over a batch of domain readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionReport {
    /// Number of readings fused.
    pub domains_processed: usize,
    /// Mean reading value, rounded to three decimals. 0.0 for no input.
    pub average_threat_value: f64,
    /// Band of the unrounded mean.
    pub overall_threat: OverallThreat,
    pub recommended_actions: Vec<String>,
}

impl FusionReport {
    pub fn from_average(domains_processed: usize, average: f64) -> Self {
        let overall_threat = OverallThreat::classify(average);
        Self {
            domains_processed,
            average_threat_value: (average * 1000.0).round() / 1000.0,
            overall_threat,
            recommended_actions: overall_threat
                .recommended_actions()
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_bands() {
        assert_eq!(OverallThreat::classify(0.71), OverallThreat::Critical);
        assert_eq!(OverallThreat::classify(0.7), OverallThreat::High);
        assert_eq!(OverallThreat::classify(0.51), OverallThreat::High);
        assert_eq!(OverallThreat::classify(0.5), OverallThreat::Moderate);
        assert_eq!(OverallThreat::classify(0.0), OverallThreat::Moderate);
    }

    #[test]
    fn test_actions_per_band() {
        assert_eq!(OverallThreat::Critical.recommended_actions().len(), 3);
        assert_eq!(OverallThreat::High.recommended_actions().len(), 2);
        assert!(OverallThreat::Moderate.recommended_actions().is_empty());
    }

    #[test]
    fn test_report_rounds_average() {
        let r = FusionReport::from_average(3, 0.123456);
        assert_eq!(r.average_threat_value, 0.123);
        assert_eq!(r.overall_threat, OverallThreat::Moderate);
    }

    #[test]
    fn test_report_serde_shape() {
        let r = FusionReport::from_average(2, 0.9);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["overall_threat"], "CRITICAL");
        assert_eq!(json["domains_processed"], 2);
        assert_eq!(json["recommended_actions"][1], "Alert command center");
    }
}
