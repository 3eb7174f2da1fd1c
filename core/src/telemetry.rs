//! telemetry.rs
//! Deterministic counters collected by writers and scanners.
//!
//! No locks, no atomics: every instance is single-owner. Merge counters from
//! several instances with `merge` or `+=`.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::constants::HEADER_LEN;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    pub records: u64,
    pub bytes_unique_key: u64,
    pub bytes_sort_key: u64,
    pub bytes_vector: u64,
    /// Header bytes (8 per record).
    pub bytes_overhead: u64,
}

impl StreamCounters {
    /// Record one framed chunk with the given segment lengths.
    pub fn add_record(&mut self, unique_key: usize, sort_key: usize, vector: usize) {
        self.records += 1;
        self.bytes_unique_key += unique_key as u64;
        self.bytes_sort_key += sort_key as u64;
        self.bytes_vector += vector as u64;
        self.bytes_overhead += HEADER_LEN as u64;
    }

    /// Payload bytes across all segments.
    pub fn payload_bytes(&self) -> u64 {
        self.bytes_unique_key + self.bytes_sort_key + self.bytes_vector
    }

    /// Total bytes on the wire, headers included.
    pub fn wire_bytes(&self) -> u64 {
        self.payload_bytes() + self.bytes_overhead
    }

    pub fn merge(&mut self, other: &StreamCounters) {
        self.records += other.records;
        self.bytes_unique_key += other.bytes_unique_key;
        self.bytes_sort_key += other.bytes_sort_key;
        self.bytes_vector += other.bytes_vector;
        self.bytes_overhead += other.bytes_overhead;
    }
}

impl AddAssign for StreamCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_bytes_include_headers() {
        let mut c = StreamCounters::default();
        c.add_record(1, 2, 16);
        c.add_record(0, 0, 0);

        assert_eq!(c.records, 2);
        assert_eq!(c.payload_bytes(), 19);
        assert_eq!(c.wire_bytes(), 19 + 2 * HEADER_LEN as u64);
    }

    #[test]
    fn merge_adds_fieldwise() {
        let mut a = StreamCounters::default();
        a.add_record(1, 1, 1);
        let mut b = a.clone();
        b += a.clone();

        assert_eq!(b.records, 2);
        assert_eq!(b.bytes_overhead, 2 * HEADER_LEN as u64);
    }
}
