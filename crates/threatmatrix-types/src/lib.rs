// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Threat Matrix kernel, the weighted multi-domain threat scorer.

pub mod config;
pub mod error;
pub mod fusion;
pub mod packet;
pub mod score;

pub use config::ThreatConfig;
pub use error::{ThreatError, ThreatResult};
pub use fusion::{FusionReport, OverallThreat};
pub use packet::{SensorPacket, ThreatAlert};
pub use score::{Domain, ThreatLevel};
