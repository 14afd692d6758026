// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Weighted multi-domain threat aggregation and sensor packet
//! detection.
//!
//! # Invariants
//!
//! 1. **Diagonal addressing**: reading `i` is weighted by
//!    `weights[i % R][i % R]`. Off-diagonal entries are carried in the
//!    table but never read by the reduction.
//!
//! 2. **Join before publish**: every partial sum is computed and
//!    combined before the aggregate is stored. Readers never see an
//!    intermediate value.
//!
//! 3. **Release/acquire publication**: the aggregate is stored with
//!    `Release` and loaded with `Acquire`, so a reader that observes a
//!    new score also observes everything the writer did before it.
//!
//! 4. **Deterministic combine**: partial sums are folded in partition
//!    order. For a fixed partition plan the result is bit-identical
//!    across runs.
//!
//! 5. **Fail at construction**: a malformed weight table is rejected
//!    when the aggregator is built; `compute` itself cannot fail.

pub mod aggregator;
pub mod detector;
pub mod fusion;
pub mod reduce;
pub mod weights;

pub use aggregator::ScoreAggregator;
pub use detector::{PacketDetector, ScanSummary};
pub use fusion::{fuse_alerts, fuse_packets, fuse_values};
pub use reduce::ReductionPlan;
pub use weights::WeightTable;
