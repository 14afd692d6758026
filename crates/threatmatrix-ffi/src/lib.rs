// ─────────────────────────────────────────────────────────────────────
// Threat Matrix Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied; PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Threat Matrix kernel.
//!
//! # FFI Safety
//!
//! - `ScoreAggregator.compute` releases the GIL for the reduction.
//! - All config validated before any kernel is built.
//! - Errors surface as `ValueError`.
//!
//! Usage from Python:
//! ```python
//! from threatmatrix_kernel import ScoreAggregator
//!
//! agg = ScoreAggregator()
//! agg.compute([0.7, 0.9, 0.4, 0.6, 0.8, 0.5])  # 0.82
//! agg.score
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use threatmatrix_core::{fuse_values, PacketDetector, ReductionPlan, ScoreAggregator};
use threatmatrix_types::{ThreatAlert, ThreatConfig, ThreatError};

fn to_py_err(e: ThreatError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ─── PyThreatConfig ─────────────────────────────────────────────────

/// Python-visible configuration for the Threat Matrix kernel.
#[pyclass(name = "ThreatConfig")]
#[derive(Clone)]
struct PyThreatConfig {
    inner: ThreatConfig,
}

#[pymethods]
impl PyThreatConfig {
    #[new]
    #[pyo3(signature = (
        weights = None,
        min_chunk_len = 4096,
        max_workers = 0,
        alert_value_threshold = 0.8,
        alert_confidence_threshold = 0.7,
        alert_history_window = 16,
    ))]
    fn new(
        weights: Option<Vec<Vec<f64>>>,
        min_chunk_len: usize,
        max_workers: usize,
        alert_value_threshold: f64,
        alert_confidence_threshold: f64,
        alert_history_window: usize,
    ) -> PyResult<Self> {
        let defaults = ThreatConfig::default();
        let config = ThreatConfig {
            weights: weights.unwrap_or(defaults.weights),
            min_chunk_len,
            max_workers,
            alert_value_threshold,
            alert_confidence_threshold,
            alert_history_window,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = ThreatConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    #[getter]
    fn weights(&self) -> Vec<Vec<f64>> {
        self.inner.weights.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "ThreatConfig(categories={}, min_chunk_len={}, max_workers={})",
            self.inner.weights.len(),
            self.inner.min_chunk_len,
            self.inner.max_workers
        )
    }
}

// ─── PyScoreAggregator ──────────────────────────────────────────────

/// Weighted multi-domain threat aggregator.
#[pyclass(name = "ScoreAggregator")]
struct PyScoreAggregator {
    inner: ScoreAggregator,
}

#[pymethods]
impl PyScoreAggregator {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyThreatConfig>) -> PyResult<Self> {
        let inner = match config {
            Some(c) => ScoreAggregator::from_config(&c.inner).map_err(to_py_err)?,
            None => ScoreAggregator::new(),
        };
        Ok(Self { inner })
    }

    /// Compute, publish, and return the weighted score.
    ///
    /// Args:
    ///     readings: List of float sensor readings.
    ///     max_workers: Optional partition bound overriding the config.
    #[pyo3(signature = (readings, max_workers = None))]
    fn compute(&self, py: Python<'_>, readings: Vec<f64>, max_workers: Option<usize>) -> f64 {
        let inner = &self.inner;
        py.allow_threads(|| match max_workers {
            Some(w) => {
                let plan = ReductionPlan::new(inner.plan().min_chunk_len, w);
                inner.compute_with(&readings, &plan)
            }
            None => inner.compute(&readings),
        })
    }

    /// Last published score.
    #[getter]
    fn score(&self) -> f64 {
        self.inner.score()
    }

    /// "LOW", "MEDIUM", or "HIGH".
    #[getter]
    fn level(&self) -> &'static str {
        self.inner.level().as_str()
    }

    #[getter]
    fn categories(&self) -> usize {
        self.inner.weights().categories()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScoreAggregator(score={:.4}, level={})",
            self.inner.score(),
            self.inner.level()
        )
    }
}

// ─── PyPacketDetector ───────────────────────────────────────────────

/// Per-packet threshold detector.
#[pyclass(name = "PacketDetector")]
struct PyPacketDetector {
    inner: PacketDetector,
}

fn alert_to_dict<'py>(py: Python<'py>, alert: &ThreatAlert) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("domain", &alert.domain)?;
    dict.set_item("lat", alert.latitude)?;
    dict.set_item("lon", alert.longitude)?;
    dict.set_item("value", alert.value)?;
    dict.set_item("confidence", alert.confidence)?;
    Ok(dict)
}

#[pymethods]
impl PyPacketDetector {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyThreatConfig>) -> PyResult<Self> {
        let inner = match config {
            Some(c) => PacketDetector::from_config(&c.inner).map_err(to_py_err)?,
            None => PacketDetector::default(),
        };
        Ok(Self { inner })
    }

    /// Assess one JSON-encoded packet. Returns an alert dict or None.
    fn assess_json<'py>(
        &self,
        py: Python<'py>,
        json: &str,
    ) -> PyResult<Option<Bound<'py, PyDict>>> {
        match self.inner.assess_json(json).map_err(to_py_err)? {
            Some(alert) => Ok(Some(alert_to_dict(py, &alert)?)),
            None => Ok(None),
        }
    }

    /// Recent alerts, oldest first.
    fn recent_alerts<'py>(&self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        self.inner
            .recent_alerts()
            .iter()
            .map(|a| alert_to_dict(py, a))
            .collect()
    }

    fn clear_history(&self) {
        self.inner.clear_history();
    }
}

// ─── Fusion ─────────────────────────────────────────────────────────

/// Fuse a batch of reading values into an overall threat report dict.
#[pyfunction]
fn fuse<'py>(py: Python<'py>, values: Vec<f64>) -> PyResult<Bound<'py, PyDict>> {
    let report = fuse_values(&values);
    let dict = PyDict::new(py);
    dict.set_item("domains_processed", report.domains_processed)?;
    dict.set_item("average_threat_value", report.average_threat_value)?;
    dict.set_item("overall_threat", report.overall_threat.as_str())?;
    dict.set_item("recommended_actions", report.recommended_actions)?;
    Ok(dict)
}

#[pymodule]
fn threatmatrix_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyThreatConfig>()?;
    m.add_class::<PyScoreAggregator>()?;
    m.add_class::<PyPacketDetector>()?;
    m.add_function(wrap_pyfunction!(fuse, m)?)?;
    Ok(())
}
