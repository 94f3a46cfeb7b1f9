//! Lightweight in-process metrics.
//!
//! Counters are stored as atomics and rendered by the `/metrics` handler.

pub mod metrics;

pub use metrics::GateMetrics;
