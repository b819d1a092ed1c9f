//! Striped queue bank: the lane arrays and their round-robin cursors.
//!
//! A bank is two parallel arrays of `N` SPSC queues — `in[0..N)` carrying
//! unconverted items and `out[0..N)` carrying converted ones — with `N` a
//! power of two so lane selection is `(idx + 1) & (N - 1)`.
//!
//! The caller-facing halves live here. [`LaneSubmitter`] owns the producer
//! endpoints of every input lane plus the submit cursor; [`LaneReceiver`]
//! owns the consumer endpoints of every output lane plus the receive cursor.
//! Because both cursors start at zero and advance by one only on success,
//! the submit stream and the receive stream traverse the bank in identical
//! round-robin order, and global FIFO reduces to per-lane FIFO (which the
//! SPSC queues provide).
//!
//! Each cursor sits in its own [`CachePadded`] cell: the pushing thread and
//! the popping thread may be distinct, and sharing a line between the two
//! cursors (or with the lane arrays) is the measured bottleneck, not a
//! theoretical one.

use crossbeam_utils::CachePadded;

use crate::spsc::{SpscConsumer, SpscProducer};

/// Producer half of the bank: input-lane producers plus the submit cursor.
///
/// Single-writer: `&mut self` on [`push`](Self::push) keeps the pushing role
/// on one thread at a time.
pub struct LaneSubmitter<I: Send + 'static> {
    lanes: Box<[SpscProducer<I>]>,
    mask: usize,
    /// Next lane to submit into. Owned by the pushing thread.
    cursor: CachePadded<usize>,
}

impl<I: Send + 'static> LaneSubmitter<I> {
    pub(crate) fn new(lanes: Vec<SpscProducer<I>>) -> Self {
        debug_assert!(lanes.len().is_power_of_two());
        let mask = lanes.len() - 1;
        Self {
            lanes: lanes.into_boxed_slice(),
            mask,
            cursor: CachePadded::new(0),
        }
    }

    /// Attempt to push into the current lane, advancing the cursor only on
    /// success so a refused item retries the same lane.
    #[inline]
    pub fn push(&mut self, item: I) -> bool {
        let idx = *self.cursor;
        match self.lanes[idx].try_push(item) {
            Ok(()) => {
                *self.cursor = (idx + 1) & self.mask;
                true
            }
            Err(_) => false,
        }
    }

    /// Summed best-effort backlog across all input lanes. Observational
    /// only; linear in total block count.
    pub fn len_approx(&self) -> usize {
        self.lanes.iter().map(|lane| lane.len_approx()).sum()
    }

    /// Number of lanes in the bank.
    #[inline]
    pub fn lanes(&self) -> usize {
        self.lanes.len()
    }
}

/// Consumer half of the bank: output-lane consumers plus the receive cursor.
pub struct LaneReceiver<O: Send + 'static> {
    lanes: Box<[SpscConsumer<O>]>,
    mask: usize,
    /// Next lane to receive from. Owned by the popping thread.
    cursor: CachePadded<usize>,
}

impl<O: Send + 'static> LaneReceiver<O> {
    pub(crate) fn new(lanes: Vec<SpscConsumer<O>>) -> Self {
        debug_assert!(lanes.len().is_power_of_two());
        let mask = lanes.len() - 1;
        Self {
            lanes: lanes.into_boxed_slice(),
            mask,
            cursor: CachePadded::new(0),
        }
    }

    /// Attempt to pop from the current lane, advancing the cursor only on
    /// success so an empty lane is retried until its worker catches up.
    #[inline]
    pub fn pop(&mut self) -> Option<O> {
        let idx = *self.cursor;
        let item = self.lanes[idx].try_pop()?;
        *self.cursor = (idx + 1) & self.mask;
        Some(item)
    }

    /// Summed best-effort converted-item count across all output lanes.
    pub fn len_approx(&self) -> usize {
        self.lanes.iter().map(|lane| lane.len_approx()).sum()
    }

    /// Number of lanes in the bank.
    #[inline]
    pub fn lanes(&self) -> usize {
        self.lanes.len()
    }
}
