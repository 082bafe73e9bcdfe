//! telemetry/mod.rs
//! Decode outcome counters for observability of reader sessions and batch jobs.

pub mod counters;

pub use counters::*;
