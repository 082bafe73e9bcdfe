// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Decode outcome counters.
//!
//! Summary: each decode call fills its own `DecodeCounters`; owners (the
//! reader, a batch job) merge them. No locks or atomics in the hot path.
use serde::Serialize;
use std::ops::AddAssign;

use crate::record::FieldIssue;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecodeCounters {
    pub tags_decoded: u64,
    pub tags_rejected: u64,
    pub payloads_decoded: u64,
    pub payloads_rejected: u64,
    pub fields_defaulted: u64,
    pub fields_truncated: u64,
}

impl DecodeCounters {
    /// Record one verified tag decode and its recovered fields.
    pub fn add_tag(&mut self, issues: &[FieldIssue]) {
        self.tags_decoded += 1;
        self.add_issues(issues);
    }

    pub fn add_tag_rejected(&mut self) {
        self.tags_rejected += 1;
    }

    /// Record one forgiving-path decode and its recovered fields.
    pub fn add_payload(&mut self, issues: &[FieldIssue]) {
        self.payloads_decoded += 1;
        self.add_issues(issues);
    }

    pub fn add_payload_rejected(&mut self) {
        self.payloads_rejected += 1;
    }

    fn add_issues(&mut self, issues: &[FieldIssue]) {
        for issue in issues {
            if issue.defaulted() {
                self.fields_defaulted += 1;
            } else {
                self.fields_truncated += 1;
            }
        }
    }

    pub fn total_decoded(&self) -> u64 {
        self.tags_decoded + self.payloads_decoded
    }

    pub fn total_rejected(&self) -> u64 {
        self.tags_rejected + self.payloads_rejected
    }

    pub fn merge(&mut self, other: &DecodeCounters) {
        self.tags_decoded += other.tags_decoded;
        self.tags_rejected += other.tags_rejected;
        self.payloads_decoded += other.payloads_decoded;
        self.payloads_rejected += other.payloads_rejected;
        self.fields_defaulted += other.fields_defaulted;
        self.fields_truncated += other.fields_truncated;
    }
}

impl AddAssign for DecodeCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
