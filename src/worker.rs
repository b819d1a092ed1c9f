//! Per-lane worker routine.
//!
//! Worker `i` owns the consumer endpoint of `in[i]` and the producer
//! endpoint of `out[i]` for as long as it runs, so every cursor in the bank
//! keeps exactly one writer. The body is the same in every mode: pop an
//! item, convert it into a fresh output slot, forward the slot to the
//! output lane. Only the empty-queue reaction differs, and it is fixed at
//! spawn time — a worker never changes mode.
//!
//! A refused output enqueue is retried until it lands. The output lane has
//! the same capacity policy as its input lane and the popper drains it, so
//! head-of-line blocking here is bounded; dropping the slot instead would
//! silently break the pipeline's ordering guarantee.

use std::hint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::spsc::{SpscConsumer, SpscProducer};

/// What a worker does when its input lane is empty. Selected by the start
/// variant and immutable for the worker's lifetime.
#[derive(Clone, Copy, Debug)]
pub(crate) enum IdlePolicy {
    /// Busy-spin until stopped. Lowest latency, burns a core per lane.
    Spin,
    /// Exit on the first empty observation. Used for drain-style runs where
    /// the full input is queued up front.
    Drain,
    /// Sleep for the interval, then poll again.
    Sleep(Duration),
}

/// The endpoints a worker borrows from the bank while it runs. Returned by
/// the worker thread on exit so the parser can be started again.
pub(crate) struct LaneEndpoints<I: Send + 'static, O: Send + 'static> {
    pub input: SpscConsumer<I>,
    pub output: SpscProducer<O>,
}

/// Run lane `lane` until the policy's exit condition holds.
///
/// Spin and sleep workers re-check `active` (relaxed load, per the rarity
/// of stop) on every iteration, so a stop interrupts them even with items
/// still queued. Drain workers ignore the flag entirely.
pub(crate) fn lane_loop<I, O, F>(
    lane: usize,
    mut ep: LaneEndpoints<I, O>,
    convert: &F,
    active: &AtomicBool,
    policy: IdlePolicy,
) -> LaneEndpoints<I, O>
where
    I: Send + 'static,
    O: Default + Send + 'static,
    F: Fn(&I, &mut O),
{
    let mut warned = false;
    match policy {
        IdlePolicy::Spin => {
            while active.load(Ordering::Relaxed) {
                match ep.input.try_pop() {
                    Some(item) => convert_and_forward(lane, &item, convert, &mut ep.output, &mut warned),
                    None => hint::spin_loop(),
                }
            }
        }
        IdlePolicy::Drain => {
            while let Some(item) = ep.input.try_pop() {
                convert_and_forward(lane, &item, convert, &mut ep.output, &mut warned);
            }
        }
        IdlePolicy::Sleep(interval) => {
            while active.load(Ordering::Relaxed) {
                match ep.input.try_pop() {
                    Some(item) => convert_and_forward(lane, &item, convert, &mut ep.output, &mut warned),
                    None => thread::sleep(interval),
                }
            }
        }
    }
    ep
}

/// Convert one item and enqueue the result, retrying until the output lane
/// accepts it.
#[inline]
fn convert_and_forward<I, O, F>(
    lane: usize,
    item: &I,
    convert: &F,
    output: &mut SpscProducer<O>,
    warned: &mut bool,
) where
    O: Default + Send + 'static,
    F: Fn(&I, &mut O),
{
    let mut slot = O::default();
    convert(item, &mut slot);
    loop {
        match output.try_push(slot) {
            Ok(()) => return,
            Err(refused) => {
                if !*warned {
                    log::warn!("lane {lane}: output lane at capacity bound, retrying enqueue");
                    *warned = true;
                }
                slot = refused;
                thread::yield_now();
            }
        }
    }
}
