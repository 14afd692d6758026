// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Score Aggregator
// ─────────────────────────────────────────────────────────────────────
//! Weighted multi-domain aggregation with an atomically published
//! result.
//!
//! The last computed score lives in an `AtomicU64` holding the `f64`
//! bit pattern. Writers store with `Release` only after the fork-join
//! reduction has joined; readers load with `Acquire`.

use std::sync::atomic::{AtomicU64, Ordering};

use threatmatrix_types::{ThreatConfig, ThreatLevel, ThreatResult};

use crate::reduce::{parallel_sum, ReductionPlan};
use crate::weights::WeightTable;

/// Owns a weight table and the last published aggregate score.
///
/// Thread-safe: `compute` takes `&self` and may race with other
/// `compute` calls; the published slot always holds one complete result.
pub struct ScoreAggregator {
    table: WeightTable,
    plan: ReductionPlan,
    published: AtomicU64,
}

impl ScoreAggregator {
    /// Reference table, default reduction plan, published score 0.0.
    pub fn new() -> Self {
        Self::with_table(WeightTable::reference(), ReductionPlan::default())
    }

    pub fn with_table(table: WeightTable, plan: ReductionPlan) -> Self {
        Self {
            table,
            plan,
            published: AtomicU64::new(0.0f64.to_bits()),
        }
    }

    /// Build from a validated configuration. A malformed config yields
    /// no aggregator.
    pub fn from_config(config: &ThreatConfig) -> ThreatResult<Self> {
        config.validate().map_err(|e| {
            log::error!("Rejected threat config: {e}");
            e
        })?;
        let table = WeightTable::from_validated(config.weights.clone());
        Ok(Self::with_table(table, ReductionPlan::from_config(config)))
    }

    /// Weighted reduction of `readings`, published then returned.
    ///
    /// Reading `i` is weighted by `weights[i % R][i % R]`. An empty
    /// input yields 0.0.
    pub fn compute(&self, readings: &[f64]) -> f64 {
        self.compute_with(readings, &self.plan)
    }

    /// As [`compute`](Self::compute) with an explicit partition plan.
    pub fn compute_with(&self, readings: &[f64], plan: &ReductionPlan) -> f64 {
        let score = parallel_sum(readings, &self.table, plan);
        self.published.store(score.to_bits(), Ordering::Release);
        log::debug!(
            "Threat score {score:.4} over {} readings ({} categories)",
            readings.len(),
            self.table.categories()
        );
        score
    }

    /// Last published score (acquire load).
    pub fn score(&self) -> f64 {
        f64::from_bits(self.published.load(Ordering::Acquire))
    }

    pub fn level(&self) -> ThreatLevel {
        ThreatLevel::classify(self.score())
    }

    pub fn weights(&self) -> &WeightTable {
        &self.table
    }

    pub fn plan(&self) -> &ReductionPlan {
        &self.plan
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use super::*;
    use crate::reduce::sequential_sum;
    use threatmatrix_types::ThreatError;

    const SAMPLE: [f64; 6] = [0.7, 0.9, 0.4, 0.6, 0.8, 0.5];

    #[test]
    fn test_initial_score_zero() {
        let agg = ScoreAggregator::new();
        assert_eq!(agg.score(), 0.0);
        assert_eq!(agg.level(), ThreatLevel::Low);
    }

    #[test]
    fn test_reference_scenario() {
        let agg = ScoreAggregator::new();
        let s = agg.compute(&SAMPLE);
        assert!((s - 0.82).abs() < 1e-12);
        assert_eq!(agg.score().to_bits(), s.to_bits());
        assert_eq!(agg.level(), ThreatLevel::High);
    }

    #[test]
    fn test_empty_readings() {
        let agg = ScoreAggregator::new();
        agg.compute(&SAMPLE);
        assert_eq!(agg.compute(&[]), 0.0);
        assert_eq!(agg.score(), 0.0);
    }

    #[test]
    fn test_single_reading() {
        let agg = ScoreAggregator::new();
        assert!((agg.compute(&[1.0]) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_overwrites_previous_score() {
        let agg = ScoreAggregator::new();
        agg.compute(&SAMPLE);
        let s = agg.compute(&[1.0, 1.0]);
        assert!((s - 0.45).abs() < 1e-12);
        assert_eq!(agg.score().to_bits(), s.to_bits());
    }

    #[test]
    fn test_matches_oracle_across_plans() {
        let agg = ScoreAggregator::new();
        let data: Vec<f64> = (0..200_000).map(|i| (i % 97) as f64 / 97.0).collect();
        let oracle = sequential_sum(&data, agg.weights());
        for plan in [
            ReductionPlan::sequential(),
            ReductionPlan::new(1024, 2),
            ReductionPlan::new(1, 0),
        ] {
            let s = agg.compute_with(&data, &plan);
            assert!((s - oracle).abs() < 1e-9 * oracle.abs().max(1.0));
        }
    }

    #[test]
    fn test_from_config_custom_table() {
        let cfg = ThreatConfig {
            weights: vec![vec![1.0, 9.0], vec![9.0, 2.0]],
            ..Default::default()
        };
        let agg = ScoreAggregator::from_config(&cfg).unwrap();
        // 1*1 + 1*2 + 1*1
        assert!((agg.compute(&[1.0, 1.0, 1.0]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_config_rejects_ragged() {
        let cfg = ThreatConfig {
            weights: vec![vec![0.1, 0.2], vec![0.3]],
            ..Default::default()
        };
        assert!(matches!(
            ScoreAggregator::from_config(&cfg),
            Err(ThreatError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_rejects_non_weight_fields() {
        for cfg in [
            ThreatConfig {
                min_chunk_len: 0,
                ..Default::default()
            },
            ThreatConfig {
                alert_value_threshold: f64::NAN,
                ..Default::default()
            },
            ThreatConfig {
                alert_history_window: usize::MAX,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                ScoreAggregator::from_config(&cfg),
                Err(ThreatError::Config(_))
            ));
        }
    }

    #[test]
    fn test_from_config_default_table() {
        let agg = ScoreAggregator::from_config(&ThreatConfig::default()).unwrap();
        assert_eq!(agg.weights(), &WeightTable::reference());
        assert_eq!(agg.plan(), &ReductionPlan::from_config(&ThreatConfig::default()));
    }

    #[test]
    fn test_reader_after_return_sees_value() {
        let agg = Arc::new(ScoreAggregator::new());
        let s = agg.compute(&SAMPLE);
        let reader = Arc::clone(&agg);
        let seen = std::thread::spawn(move || reader.score()).join().unwrap();
        assert_eq!(seen.to_bits(), s.to_bits());
    }

    #[test]
    fn test_concurrent_readers_never_see_partial() {
        // Writer alternates between two inputs; readers may only ever
        // observe 0.0 (initial) or one of the two complete results.
        let agg = ScoreAggregator::with_table(WeightTable::reference(), ReductionPlan::new(8, 4));
        let a: Vec<f64> = vec![1.0; 4096];
        let b: Vec<f64> = vec![0.5; 4096];
        let sa = sequential_sum(&a, agg.weights());
        let sb = sequential_sum(&b, agg.weights());
        let done = AtomicBool::new(false);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    while !done.load(Ordering::Acquire) {
                        let s = agg.score();
                        assert!(
                            s == 0.0 || (s - sa).abs() < 1e-9 || (s - sb).abs() < 1e-9,
                            "observed intermediate score {s}"
                        );
                    }
                });
            }
            for i in 0..200 {
                agg.compute(if i % 2 == 0 { &a } else { &b });
            }
            done.store(true, Ordering::Release);
        });
    }
}
