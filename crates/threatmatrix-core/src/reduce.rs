// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Fork-Join Weighted Reduction
// ─────────────────────────────────────────────────────────────────────
//! Partitioned weighted sum over a reading vector.
//!
//! The index range is split into contiguous, ordered chunks. Each chunk
//! is reduced independently on the rayon pool into its own partial sum,
//! the partials are collected in chunk order, and then folded
//! left-to-right. No accumulator is shared during the partition phase.

use std::ops::Range;

use rayon::prelude::*;

use threatmatrix_types::ThreatConfig;

use crate::weights::WeightTable;

/// How a reduction is split across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReductionPlan {
    /// Smallest chunk handed to one worker (≥ 1).
    pub min_chunk_len: usize,
    /// Upper bound on chunk count. 0 = rayon pool size.
    pub max_workers: usize,
}

impl Default for ReductionPlan {
    fn default() -> Self {
        let config = ThreatConfig::default();
        Self {
            min_chunk_len: config.min_chunk_len,
            max_workers: config.max_workers,
        }
    }
}

impl ReductionPlan {
    pub fn new(min_chunk_len: usize, max_workers: usize) -> Self {
        Self {
            min_chunk_len: min_chunk_len.max(1),
            max_workers,
        }
    }

    pub fn from_config(config: &ThreatConfig) -> Self {
        Self::new(config.min_chunk_len, config.max_workers)
    }

    /// Single chunk, no pool hop.
    pub fn sequential() -> Self {
        Self::new(usize::MAX, 1)
    }

    /// Effective worker bound after resolving 0 to the pool size.
    pub fn workers(&self) -> usize {
        if self.max_workers == 0 {
            rayon::current_num_threads().max(1)
        } else {
            self.max_workers
        }
    }

    /// Chunk ranges this plan produces for an input of `len` readings.
    pub fn ranges(&self, len: usize) -> Vec<Range<usize>> {
        partition(len, self.min_chunk_len, self.workers())
    }
}

/// Split `0..len` into at most `workers` contiguous ranges of at least
/// `min_chunk_len` each (a shorter input gets a single range). Earlier
/// ranges absorb the remainder one element at a time.
pub fn partition(len: usize, min_chunk_len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let by_size = (len / min_chunk_len.max(1)).max(1);
    let chunks = workers.max(1).min(by_size);
    let base = len / chunks;
    let remainder = len % chunks;

    let mut ranges = Vec::with_capacity(chunks);
    let mut start = 0;
    for i in 0..chunks {
        let end = start + base + usize::from(i < remainder);
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Weighted sum of `chunk`, whose first element sits at absolute index
/// `offset` in the full reading vector.
#[inline]
pub fn partial_sum(chunk: &[f64], offset: usize, table: &WeightTable) -> f64 {
    chunk
        .iter()
        .enumerate()
        .fold(0.0, |acc, (k, &x)| acc + x * table.weight_at(offset + k))
}

/// Reference oracle: strict left-to-right sum of
/// `readings[i] * weights[i % R][i % R]`.
pub fn sequential_sum(readings: &[f64], table: &WeightTable) -> f64 {
    partial_sum(readings, 0, table)
}

/// Reduce over the given ranges. Ranges must be ordered, disjoint, and
/// lie within `readings`.
pub fn sum_partitioned(readings: &[f64], table: &WeightTable, ranges: &[Range<usize>]) -> f64 {
    match ranges {
        [] => 0.0,
        [only] => partial_sum(&readings[only.clone()], only.start, table),
        _ => {
            let partials: Vec<f64> = ranges
                .par_iter()
                .map(|r| partial_sum(&readings[r.clone()], r.start, table))
                .collect();
            partials.iter().fold(0.0, |acc, p| acc + p)
        }
    }
}

/// Plan, fork, join, and combine.
pub fn parallel_sum(readings: &[f64], table: &WeightTable, plan: &ReductionPlan) -> f64 {
    let ranges = plan.ranges(readings.len());
    sum_partitioned(readings, table, &ranges)
}
