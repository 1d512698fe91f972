//! Evaluation engine for scientific activity efficiency.
//!
//! The `evaluation` module carries the scoring rules, record lifecycle, and
//! report projection; `config` and `telemetry` hold the runtime plumbing the
//! serving layer builds on.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod telemetry;
