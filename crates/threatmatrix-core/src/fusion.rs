// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Multi-Domain Fusion
// ─────────────────────────────────────────────────────────────────────
//! Unweighted fusion of a batch of domain readings into an overall
//! threat band with standing recommended actions.

use threatmatrix_types::{FusionReport, SensorPacket, ThreatAlert};

/// Fuse raw reading values. An empty batch averages to 0.0.
pub fn fuse_values(values: &[f64]) -> FusionReport {
    let average = if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    };
    let report = FusionReport::from_average(values.len(), average);
    log::debug!(
        "Fused {} readings: avg {:.3} -> {}",
        report.domains_processed,
        report.average_threat_value,
        report.overall_threat
    );
    report
}

/// Fuse the values of a packet batch.
pub fn fuse_packets(packets: &[SensorPacket]) -> FusionReport {
    let values: Vec<f64> = packets.iter().map(|p| p.value).collect();
    fuse_values(&values)
}

/// Fuse the values of raised alerts.
pub fn fuse_alerts(alerts: &[ThreatAlert]) -> FusionReport {
    let values: Vec<f64> = alerts.iter().map(|a| a.value).collect();
    fuse_values(&values)
}
