//! Scenario tests for the evaluation pipeline and record lifecycle, driven
//! through the public service facade with an in-memory store.

mod common;
mod lifecycle;
