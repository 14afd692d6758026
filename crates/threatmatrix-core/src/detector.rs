// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Sensor Packet Detector
// ─────────────────────────────────────────────────────────────────────
//! Per-packet threat detection over a stream of JSON sensor packets.
//!
//! A packet raises an alert when both its value and its confidence are
//! strictly above the configured thresholds. Recent alerts are kept in
//! a bounded history.

use std::collections::VecDeque;
use std::io::Read;

use parking_lot::Mutex;

use threatmatrix_types::config::MAX_ALERT_HISTORY_WINDOW;
use threatmatrix_types::{
    SensorPacket, ThreatAlert, ThreatConfig, ThreatError, ThreatResult,
};

/// History slots reserved up front; larger windows grow on demand.
const HISTORY_PREALLOC: usize = 64;

/// Outcome of scanning one packet stream.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Packets successfully decoded.
    pub packets_read: usize,
    pub alerts: Vec<ThreatAlert>,
    /// Decode error that ended the scan, if the stream did not end cleanly.
    pub terminated_by: Option<String>,
}

impl ScanSummary {
    pub fn completed(&self) -> bool {
        self.terminated_by.is_none()
    }
}

/// Threshold detector for individual sensor packets.
///
/// Thread-safe: alert history is guarded by a `parking_lot::Mutex`.
pub struct PacketDetector {
    value_threshold: f64,
    confidence_threshold: f64,
    history_window: usize,
    history: Mutex<VecDeque<ThreatAlert>>,
}

impl PacketDetector {
    pub fn new(
        value_threshold: f64,
        confidence_threshold: f64,
        history_window: usize,
    ) -> ThreatResult<Self> {
        if !value_threshold.is_finite() || !confidence_threshold.is_finite() {
            return Err(ThreatError::Validation(format!(
                "thresholds must be finite, got value={value_threshold}, confidence={confidence_threshold}"
            )));
        }
        if history_window > MAX_ALERT_HISTORY_WINDOW {
            return Err(ThreatError::Validation(format!(
                "history_window must be <= {MAX_ALERT_HISTORY_WINDOW}, got {history_window}"
            )));
        }
        Ok(Self::build(value_threshold, confidence_threshold, history_window))
    }

    fn build(value_threshold: f64, confidence_threshold: f64, history_window: usize) -> Self {
        Self {
            value_threshold,
            confidence_threshold,
            history_window,
            history: Mutex::new(VecDeque::with_capacity(history_window.min(HISTORY_PREALLOC))),
        }
    }

    /// Build from a validated configuration. A malformed config yields
    /// no detector.
    pub fn from_config(config: &ThreatConfig) -> ThreatResult<Self> {
        if let Err(e) = config.validate() {
            log::error!("Rejected threat config: {e}");
            return Err(e);
        }
        Self::new(
            config.alert_value_threshold,
            config.alert_confidence_threshold,
            config.alert_history_window,
        )
    }

    /// Assess one packet, recording and returning an alert if it fires.
    pub fn assess(&self, packet: &SensorPacket) -> Option<ThreatAlert> {
        if !(packet.value > self.value_threshold
            && packet.confidence > self.confidence_threshold)
        {
            return None;
        }

        log::warn!(
            "THREAT DETECTED: {} at {:.4},{:.4}",
            packet.domain,
            packet.latitude,
            packet.longitude
        );
        let alert = ThreatAlert::from(packet);
        if self.history_window > 0 {
            let mut history = self.history.lock();
            history.push_back(alert.clone());
            if history.len() > self.history_window {
                history.pop_front();
            }
        }
        Some(alert)
    }

    /// Decode and assess a stream of concatenated JSON packets.
    ///
    /// Stops at the first decode failure; alerts raised before it are
    /// kept in the summary.
    pub fn scan<R: Read>(&self, reader: R) -> ScanSummary {
        let mut summary = ScanSummary::default();
        let stream = serde_json::Deserializer::from_reader(reader).into_iter::<SensorPacket>();
        for item in stream {
            match item {
                Ok(packet) => {
                    summary.packets_read += 1;
                    if let Some(alert) = self.assess(&packet) {
                        summary.alerts.push(alert);
                    }
                }
                Err(e) => {
                    log::warn!("Decode error after {} packets: {e}", summary.packets_read);
                    summary.terminated_by = Some(e.to_string());
                    break;
                }
            }
        }
        summary
    }

    /// Parse and assess a single JSON-encoded packet.
    pub fn assess_json(&self, json: &str) -> ThreatResult<Option<ThreatAlert>> {
        let packet: SensorPacket = serde_json::from_str(json)
            .map_err(|e| ThreatError::Decode(e.to_string()))?;
        Ok(self.assess(&packet))
    }

    /// Packet values in stream order, ready for `ScoreAggregator::compute`.
    pub fn readings(packets: &[SensorPacket]) -> Vec<f64> {
        packets.iter().map(|p| p.value).collect()
    }

    /// Most recent alerts, oldest first.
    pub fn recent_alerts(&self) -> Vec<ThreatAlert> {
        self.history.lock().iter().cloned().collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }
}

impl Default for PacketDetector {
    fn default() -> Self {
        let config = ThreatConfig::default();
        Self::build(
            config.alert_value_threshold,
            config.alert_confidence_threshold,
            config.alert_history_window,
        )
    }
}
