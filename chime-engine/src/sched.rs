//! Deferred tone scheduling against the render clock.
//!
//! The original design fired effect steps with wall-clock timers. Here the
//! deferral is explicit data: each pending tone carries an absolute start
//! time in samples and is drained by whoever advances the clock. Tests get
//! a virtual clock for free (render N samples instead of sleeping N ms).
//!
//! Fire-and-forget by contract: once pushed, a tone cannot be cancelled.
//! Ties on the start sample keep submission order, so simultaneous tones
//! within one sequence fire in sequence order, while independently
//! triggered sequences interleave freely.

use crate::voice::ToneSpec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A tone waiting on the clock.
#[derive(Copy, Clone, Debug)]
pub struct Pending {
    /// Absolute start time, samples since engine construction.
    pub start_at: u64,
    seq: u64,
    pub spec: ToneSpec,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.start_at == other.start_at && self.seq == other.seq
    }
}
impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap semantics: earliest start first, submission order on ties
        (other.start_at, other.seq).cmp(&(self.start_at, self.seq))
    }
}
impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of pending tones keyed by start sample.
#[derive(Debug, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Pending>,
    seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tone to fire at the absolute sample time `start_at`.
    pub fn push(&mut self, start_at: u64, spec: ToneSpec) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Pending { start_at, seq, spec });
    }

    /// Take the next tone whose start time has passed, if any.
    pub fn pop_due(&mut self, now: u64) -> Option<Pending> {
        if self.heap.peek().map_or(false, |p| p.start_at <= now) {
            self.heap.pop()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
