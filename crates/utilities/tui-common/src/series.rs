//! Fixed capacity sample buffer.

use std::collections::VecDeque;

/// A FIFO buffer of samples that never grows past its capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedSeries {
    samples: VecDeque<u64>,
    max_len: usize,
}

impl BoundedSeries {
    /// Creates an empty series holding at most `max_len` samples.
    pub fn new(max_len: usize) -> Self {
        Self { samples: VecDeque::with_capacity(max_len), max_len }
    }

    /// Appends a sample, evicting the oldest one when full.
    pub fn push(&mut self, sample: u64) {
        if self.max_len == 0 {
            return;
        }
        if self.samples.len() == self.max_len {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Drops the oldest sample.
    pub fn drop_oldest(&mut self) -> Option<u64> {
        self.samples.pop_front()
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples held.
    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<u64> {
        self.samples.back().copied()
    }

    /// Samples from oldest to newest.
    pub fn to_vec(&self) -> Vec<u64> {
        self.samples.iter().copied().collect()
    }
}
