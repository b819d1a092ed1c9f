//! Wait-free SPSC (Single-Producer, Single-Consumer) segmented ring queue.
//!
//! # Design
//!
//! The queue is a forward-linked chain of ring blocks. The producer fills its
//! current block and, when the block is full and the capacity bound allows,
//! links a fresh block (per-block capacity doubles geometrically) and never
//! returns to an earlier block. The consumer drains each block completely,
//! then follows the `next` link. Growth therefore never disturbs in-flight
//! cursors, and a queue whose bound equals its initial capacity degenerates
//! to a plain fixed ring.
//!
//! # Key properties
//!
//! - **Wait-free**: `try_push` and `try_pop` complete in bounded steps (the
//!   grow path is one allocation, taken at most once per block).
//! - **No CAS**: only `Acquire`/`Release` loads and stores. On x86-64 TSO
//!   these compile to plain `MOV`.
//! - **Cached remote index**: the producer caches the consumer's `head` and
//!   reloads it only on apparent-full; the consumer caches the producer's
//!   `tail` and reloads only on apparent-empty. This keeps the common case
//!   free of cross-core cache-coherence traffic.
//! - **Cache-line padded**: `head` and `tail` live on separate cache lines
//!   so the producer and consumer threads never false-share a cursor.
//! - **Power-of-2 blocks**: bitwise AND masking for slot selection.
//!
//! # Ordering rationale
//!
//! ```text
//! Producer writes slot, then Release-stores tail  →  consumer Acquire-loads tail, then reads slot
//! Consumer reads slot, then Release-stores head   →  producer Acquire-loads head, then writes slot
//! Producer Release-stores next after its final tail store
//!                                                 →  consumer Acquire-loads next, then re-reads tail
//! ```
//!
//! The third edge is what makes block hand-off sound: once the consumer
//! observes a non-null `next`, the preceding block's `tail` is final, so a
//! single re-read decides between "stragglers remain" and "advance".
//!
//! # Retired blocks
//!
//! Fully consumed blocks stay linked (and allocated) until the queue drops.
//! This keeps `len_approx`/`capacity` walks safe from any thread without
//! reclamation machinery; resident memory is bounded by the peak backlog,
//! not by total throughput, because the producer wraps in place inside its
//! last block during steady state.
//!
//! # Safety
//!
//! Uses `unsafe` for `MaybeUninit` slot access and the raw block chain.
//! Invariants are documented per operation. Run under Miri to validate.

#[cfg(not(loom))]
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::Arc;

use crossbeam_utils::CachePadded;

/// Upper limit on a single block's slot count. Growth doubles per block up
/// to this; beyond it the chain extends with same-sized blocks.
const MAX_BLOCK_CAP: usize = 1 << 20;

/// Largest power of two that is `<= x`. Requires `x > 0`.
#[inline]
pub(crate) fn floor_pow2(x: usize) -> usize {
    debug_assert!(x > 0);
    1 << (usize::BITS - 1 - x.leading_zeros())
}

// ============================================================================
// Block
// ============================================================================

/// One ring segment of the queue.
///
/// # Invariants
///
/// - `cap` is a power of 2; `mask == cap - 1`.
/// - `head` and `tail` are monotonically increasing within the block (they
///   wrap via `mask` at slot selection, not in the atomic itself).
/// - Slots in the logical range `[head, tail)` are initialized; all other
///   slots are uninitialized.
/// - Only the producer thread writes `tail` and `next`; only the consumer
///   thread writes `head`.
/// - Once `next` is non-null the producer never touches this block again,
///   so `tail` is final.
struct Block<T> {
    cap: usize,
    mask: usize,

    /// Consumer's read cursor. Release-stored by the consumer, Acquire-loaded
    /// by the producer to detect space.
    head: CachePadded<AtomicUsize>,

    /// Producer's write cursor. Release-stored by the producer, Acquire-loaded
    /// by the consumer to detect data.
    tail: CachePadded<AtomicUsize>,

    /// Successor block, linked by the producer when this block fills.
    next: AtomicPtr<Block<T>>,

    /// Slot storage. Producer and consumer touch disjoint slots; the SPSC
    /// protocol on `head`/`tail` is what makes the `UnsafeCell` sound.
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
}

impl<T> Block<T> {
    fn boxed(cap: usize) -> Box<Self> {
        debug_assert!(cap.is_power_of_two());
        let slots = (0..cap)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Box::new(Self {
            cap,
            mask: cap - 1,
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            next: AtomicPtr::new(ptr::null_mut()),
            slots,
        })
    }
}

// ============================================================================
// Shared chain ownership
// ============================================================================

/// Shared anchor for the block chain. Freed (with any undelivered items)
/// when the last handle drops.
struct Inner<T> {
    first: *mut Block<T>,
}

// SAFETY: The SPSC protocol ensures producer and consumer access disjoint
// slots; the chain itself is only mutated by the producer (appends) and
// observed through Acquire loads.
unsafe impl<T: Send> Send for Inner<T> {}
unsafe impl<T: Send> Sync for Inner<T> {}

impl<T> Inner<T> {
    /// Best-effort count of queued items. Walks the chain, so cost is linear
    /// in the number of blocks; do not hot-loop it.
    fn len_approx(&self) -> usize {
        let mut total = 0usize;
        let mut cur = self.first;
        while !cur.is_null() {
            // SAFETY: blocks are never freed before `Inner` drops.
            let block = unsafe { &*cur };
            let tail = block.tail.load(Ordering::Acquire);
            let head = block.head.load(Ordering::Acquire);
            // A racing head store can be observed ahead of the matching tail;
            // clamp instead of underflowing.
            total = total.saturating_add(tail.saturating_sub(head).min(block.cap));
            cur = block.next.load(Ordering::Acquire);
        }
        total
    }

    /// Total allocated slot count across the chain.
    fn capacity(&self) -> usize {
        let mut total = 0usize;
        let mut cur = self.first;
        while !cur.is_null() {
            // SAFETY: blocks are never freed before `Inner` drops.
            let block = unsafe { &*cur };
            total += block.cap;
            cur = block.next.load(Ordering::Acquire);
        }
        total
    }
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        // Both handles are gone, so all loads can be relaxed.
        let mut cur = self.first;
        while !cur.is_null() {
            // SAFETY: we own the chain exclusively now; every block was
            // allocated via `Box::into_raw`.
            let block = unsafe { Box::from_raw(cur) };
            let head = block.head.load(Ordering::Relaxed);
            let tail = block.tail.load(Ordering::Relaxed);
            for i in head..tail {
                // SAFETY: slots in [head, tail) are initialized.
                unsafe { (*block.slots[i & block.mask].get()).assume_init_drop() };
            }
            cur = block.next.load(Ordering::Relaxed);
        }
    }
}

// ============================================================================
// Producer
// ============================================================================

/// Producer handle. `Send + !Sync`: it can move to another thread, but
/// `&mut self` on `try_push` keeps it on exactly one thread at a time.
pub struct SpscProducer<T: Send + 'static> {
    inner: Arc<Inner<T>>,
    /// Current tail block. The producer only ever moves forward.
    block: *mut Block<T>,
    /// Cached snapshot of the consumer's `head`, refreshed on apparent-full.
    cached_head: usize,
    /// Slots allocated across the chain so far.
    allocated: usize,
    /// Hard bound on `allocated`.
    max_capacity: usize,
}

// SAFETY: one thread at a time, enforced by `&mut`; the chain is anchored
// by `inner`.
unsafe impl<T: Send + 'static> Send for SpscProducer<T> {}

impl<T: Send + 'static> SpscProducer<T> {
    /// Attempt to push `value`.
    ///
    /// Returns `Err(value)` only when the current block is full and the
    /// capacity bound forbids linking another. Never blocks.
    ///
    /// # Ordering
    ///
    /// 1. Read `tail` (Relaxed — we are the only writer).
    /// 2. If the block appears full against the cached head, Acquire-reload
    ///    `head`; if genuinely full, take the grow path.
    /// 3. Write the slot at `tail & mask`.
    /// 4. Release-store `tail + 1` to publish the slot.
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<(), T> {
        // SAFETY: `block` points into the chain anchored by `inner`.
        let block = unsafe { &*self.block };
        let tail = block.tail.load(Ordering::Relaxed);

        if tail.wrapping_sub(self.cached_head) >= block.cap {
            self.cached_head = block.head.load(Ordering::Acquire);
            if tail.wrapping_sub(self.cached_head) >= block.cap {
                return self.push_grow(value);
            }
        }

        // SAFETY: the slot is outside the consumer's [head, tail) range and
        // stays invisible until the tail store below.
        unsafe {
            (*block.slots.get_unchecked(tail & block.mask).get()).write(value);
        }
        block.tail.store(tail.wrapping_add(1), Ordering::Release);
        Ok(())
    }

    /// Cold path: current block is full. Link a new block with the value
    /// already seated in slot 0, or fail at the capacity bound.
    #[cold]
    fn push_grow(&mut self, value: T) -> Result<(), T> {
        // SAFETY: as in `try_push`.
        let block = unsafe { &*self.block };

        let Some(cap) = self.next_block_cap(block.cap) else {
            return Err(value);
        };

        let fresh = Block::boxed(cap);
        // SAFETY: `fresh` is uniquely owned until published below.
        unsafe { (*fresh.slots[0].get()).write(value) };
        fresh.tail.store(1, Ordering::Relaxed);

        let raw = Box::into_raw(fresh);
        // The Release store publishes the seated slot and tail together with
        // the link; it also marks this block's tail as final.
        block.next.store(raw, Ordering::Release);

        self.block = raw;
        self.cached_head = 0;
        self.allocated += cap;
        Ok(())
    }

    /// Capacity for the next block, or `None` when the bound is exhausted.
    fn next_block_cap(&self, prev_cap: usize) -> Option<usize> {
        let remaining = self.max_capacity - self.allocated;
        if remaining == 0 {
            return None;
        }
        let want = prev_cap.saturating_mul(2).min(MAX_BLOCK_CAP);
        Some(want.min(floor_pow2(remaining)))
    }

    /// Best-effort queued-item count. Linear in block count.
    pub fn len_approx(&self) -> usize {
        self.inner.len_approx()
    }

    /// Currently allocated slot count.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

// ============================================================================
// Consumer
// ============================================================================

/// Consumer handle. `Send + !Sync`, mirroring [`SpscProducer`].
pub struct SpscConsumer<T: Send + 'static> {
    inner: Arc<Inner<T>>,
    /// Current head block. The consumer only ever moves forward.
    block: *mut Block<T>,
    /// Cached snapshot of the producer's `tail`, refreshed on apparent-empty.
    cached_tail: usize,
}

// SAFETY: one thread at a time, enforced by `&mut`.
unsafe impl<T: Send + 'static> Send for SpscConsumer<T> {}

impl<T: Send + 'static> SpscConsumer<T> {
    /// Attempt to pop the oldest value. Returns `None` when empty. Never
    /// blocks.
    ///
    /// # Ordering
    ///
    /// 1. Read `head` (Relaxed — we are the only writer).
    /// 2. On apparent-empty, Acquire-reload `tail`; if still empty, check
    ///    `next` (Acquire). A non-null link finalizes `tail`, so one more
    ///    reload decides between draining stragglers and advancing.
    /// 3. Read the slot at `head & mask`.
    /// 4. Release-store `head + 1` to return the slot to the producer.
    #[inline]
    pub fn try_pop(&mut self) -> Option<T> {
        loop {
            // SAFETY: `block` points into the chain anchored by `inner`.
            let block = unsafe { &*self.block };
            let head = block.head.load(Ordering::Relaxed);

            if head == self.cached_tail {
                self.cached_tail = block.tail.load(Ordering::Acquire);
                if head == self.cached_tail {
                    let next = block.next.load(Ordering::Acquire);
                    if next.is_null() {
                        return None;
                    }
                    // The link is published after the final tail store, so
                    // this reload observes every item the block will ever
                    // hold.
                    self.cached_tail = block.tail.load(Ordering::Acquire);
                    if head == self.cached_tail {
                        self.block = next;
                        self.cached_tail = 0;
                        continue;
                    }
                }
            }

            // SAFETY: the slot is inside [head, tail), hence initialized, and
            // the producer cannot reuse it until the head store below.
            let value = unsafe {
                (*block.slots.get_unchecked(head & block.mask).get()).assume_init_read()
            };
            block.head.store(head.wrapping_add(1), Ordering::Release);
            return Some(value);
        }
    }

    /// Best-effort queued-item count. Linear in block count.
    pub fn len_approx(&self) -> usize {
        self.inner.len_approx()
    }

    /// Currently allocated slot count.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

// ============================================================================
// Constructor
// ============================================================================

/// Create an SPSC queue and split it into its two role handles.
///
/// `init_capacity` is rounded up to a power of two (minimum 1) and allocated
/// eagerly. `max_capacity` bounds total growth; pass `usize::MAX` for an
/// effectively unbounded queue, or the initial capacity for a fixed ring.
///
/// The handles may move to different threads; the queue is reclaimed when
/// both have dropped.
///
/// # Panics
///
/// Panics if `max_capacity` is below the rounded-up initial capacity.
pub fn spsc_channel<T: Send + 'static>(
    init_capacity: usize,
    max_capacity: usize,
) -> (SpscProducer<T>, SpscConsumer<T>) {
    let cap = init_capacity.max(1).next_power_of_two();
    assert!(
        max_capacity >= cap,
        "max_capacity {} below initial capacity {}",
        max_capacity,
        cap
    );

    let first = Box::into_raw(Block::<T>::boxed(cap));
    let inner = Arc::new(Inner { first });

    let producer = SpscProducer {
        inner: Arc::clone(&inner),
        block: first,
        cached_head: 0,
        allocated: cap,
        max_capacity,
    };
    let consumer = SpscConsumer {
        inner,
        block: first,
        cached_tail: 0,
    };
    (producer, consumer)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn empty_pop_returns_none() {
        let (_, mut rx) = spsc_channel::<u64>(4, 4);
        assert_eq!(rx.try_pop(), None);
    }

    #[test]
    fn push_then_pop() {
        let (mut tx, mut rx) = spsc_channel::<u64>(4, 4);
        assert!(tx.try_push(42).is_ok());
        assert_eq!(rx.try_pop(), Some(42));
        assert_eq!(rx.try_pop(), None);
    }

    #[test]
    fn bounded_push_to_capacity_then_full() {
        let (mut tx, mut rx) = spsc_channel::<u64>(4, 4);
        for i in 0..4u64 {
            assert!(tx.try_push(i).is_ok());
        }
        // Ring is full at its bound — push fails and returns the value.
        assert_eq!(tx.try_push(99), Err(99));

        for i in 0..4u64 {
            assert_eq!(rx.try_pop(), Some(i));
        }
        assert_eq!(rx.try_pop(), None);
    }

    #[test]
    fn init_capacity_rounds_up() {
        let (tx, _rx) = spsc_channel::<u64>(5, usize::MAX);
        assert_eq!(tx.capacity(), 8);

        let (tx, _rx) = spsc_channel::<u64>(0, usize::MAX);
        assert_eq!(tx.capacity(), 1);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let (mut tx, mut rx) = spsc_channel::<u64>(2, usize::MAX);
        for i in 0..1000u64 {
            assert!(tx.try_push(i).is_ok(), "push {} failed", i);
        }
        assert!(tx.capacity() >= 1000);
        assert_eq!(tx.len_approx(), 1000);

        for i in 0..1000u64 {
            assert_eq!(rx.try_pop(), Some(i), "FIFO violation at {}", i);
        }
        assert_eq!(rx.try_pop(), None);
        assert_eq!(rx.len_approx(), 0);
    }

    #[test]
    fn growth_stops_at_bound() {
        let (mut tx, mut rx) = spsc_channel::<u64>(2, 8);
        let mut accepted = 0u64;
        while tx.try_push(accepted).is_ok() {
            accepted += 1;
        }
        assert_eq!(accepted, 8);
        assert_eq!(tx.capacity(), 8);

        // Repeated pushes keep failing while full.
        assert!(tx.try_push(99).is_err());
        assert!(tx.try_push(99).is_err());

        for i in 0..accepted {
            assert_eq!(rx.try_pop(), Some(i));
        }
    }

    #[test]
    fn bounded_ring_wraps_after_drain() {
        let (mut tx, mut rx) = spsc_channel::<u64>(2, 2);

        // Fill and drain many times to exercise in-place wraparound.
        for round in 0..10u64 {
            let base = round * 2;
            for i in 0..2 {
                assert!(tx.try_push(base + i).is_ok());
            }
            assert!(tx.try_push(u64::MAX).is_err());
            for i in 0..2 {
                assert_eq!(rx.try_pop(), Some(base + i));
            }
            assert_eq!(rx.try_pop(), None);
        }
        // No growth ever happened.
        assert_eq!(tx.capacity(), 2);
    }

    #[test]
    fn partial_fill_and_drain() {
        let (mut tx, mut rx) = spsc_channel::<u64>(8, 8);

        assert!(tx.try_push(1).is_ok());
        assert!(tx.try_push(2).is_ok());
        assert!(tx.try_push(3).is_ok());

        assert_eq!(rx.try_pop(), Some(1));
        assert_eq!(rx.try_pop(), Some(2));

        assert!(tx.try_push(4).is_ok());
        assert!(tx.try_push(5).is_ok());

        assert_eq!(rx.try_pop(), Some(3));
        assert_eq!(rx.try_pop(), Some(4));
        assert_eq!(rx.try_pop(), Some(5));
        assert_eq!(rx.try_pop(), None);
    }

    #[test]
    fn len_approx_spans_blocks() {
        let (mut tx, mut rx) = spsc_channel::<u64>(2, usize::MAX);
        for i in 0..20u64 {
            assert!(tx.try_push(i).is_ok());
        }
        assert_eq!(tx.len_approx(), 20);
        assert_eq!(rx.len_approx(), 20);

        for _ in 0..5 {
            rx.try_pop();
        }
        assert_eq!(tx.len_approx(), 15);
        assert!(tx.len_approx() <= tx.capacity());
    }

    #[test]
    fn drop_remaining_items() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let drop_count = Arc::new(AtomicUsize::new(0));

        struct DropTracker(Arc<AtomicUsize>);
        impl Drop for DropTracker {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        {
            let (mut tx, mut rx) = spsc_channel::<DropTracker>(2, usize::MAX);
            // Spread items across several blocks, consume a few.
            for _ in 0..9 {
                assert!(tx.try_push(DropTracker(drop_count.clone())).is_ok());
            }
            drop(rx.try_pop());
            drop(rx.try_pop());
            // Drop both handles with 7 items still queued.
        }

        assert_eq!(drop_count.load(Ordering::Relaxed), 9);
    }

    #[test]
    fn cross_thread_fifo() {
        let (mut tx, mut rx) = spsc_channel::<u64>(8, 8);
        let count = 100_000u64;

        let producer = std::thread::spawn(move || {
            for i in 0..count {
                loop {
                    match tx.try_push(i) {
                        Ok(()) => break,
                        Err(_) => std::hint::spin_loop(),
                    }
                }
            }
        });

        let consumer = std::thread::spawn(move || {
            let mut received = Vec::with_capacity(count as usize);
            while received.len() < count as usize {
                if let Some(v) = rx.try_pop() {
                    received.push(v);
                } else {
                    std::hint::spin_loop();
                }
            }
            received
        });

        producer.join().unwrap();
        let received = consumer.join().unwrap();

        assert_eq!(received.len(), count as usize);
        for (i, &v) in received.iter().enumerate() {
            assert_eq!(v, i as u64, "FIFO violation at index {}", i);
        }
    }

    #[test]
    fn cross_thread_fifo_with_growth() {
        let (mut tx, mut rx) = spsc_channel::<u64>(2, usize::MAX);
        let count = 100_000u64;

        let producer = std::thread::spawn(move || {
            for i in 0..count {
                assert!(tx.try_push(i).is_ok());
            }
        });

        let consumer = std::thread::spawn(move || {
            let mut received = Vec::with_capacity(count as usize);
            while received.len() < count as usize {
                if let Some(v) = rx.try_pop() {
                    received.push(v);
                } else {
                    std::hint::spin_loop();
                }
            }
            received
        });

        producer.join().unwrap();
        let received = consumer.join().unwrap();

        for (i, &v) in received.iter().enumerate() {
            assert_eq!(v, i as u64, "FIFO violation at index {}", i);
        }
    }

    #[test]
    fn floor_pow2_values() {
        assert_eq!(floor_pow2(1), 1);
        assert_eq!(floor_pow2(2), 2);
        assert_eq!(floor_pow2(3), 2);
        assert_eq!(floor_pow2(7), 4);
        assert_eq!(floor_pow2(8), 8);
        assert_eq!(floor_pow2(usize::MAX), 1 << (usize::BITS - 1));
    }

    #[test]
    #[should_panic(expected = "max_capacity")]
    fn rejects_bound_below_initial() {
        let _ = spsc_channel::<u64>(8, 4);
    }
}

// ============================================================================
// Property Tests
// ============================================================================


// ============================================================================
// Loom Tests
// ============================================================================

#[cfg(all(test, loom))]
mod loom_tests {
    use super::*;
    use loom::thread;

    /// FIFO ordering under loom's exhaustive scheduler, within one block.
    #[test]
    fn loom_spsc_fifo() {
        // Small K so loom can exhaust interleavings.
        const K: u64 = 3;

        loom::model(|| {
            let (mut tx, mut rx) = spsc_channel::<u64>(4, 4);

            let producer = thread::spawn(move || {
                for i in 0..K {
                    loop {
                        match tx.try_push(i) {
                            Ok(()) => break,
                            Err(_) => loom::thread::yield_now(),
                        }
                    }
                }
            });

            let consumer = thread::spawn(move || {
                let mut received = Vec::new();
                while received.len() < K as usize {
                    match rx.try_pop() {
                        Some(v) => received.push(v),
                        None => loom::thread::yield_now(),
                    }
                }
                received
            });

            producer.join().unwrap();
            let received = consumer.join().unwrap();

            assert_eq!(received, vec![0, 1, 2]);
        });
    }

    /// Block hand-off: pushing past a capacity-1 block forces a link while
    /// the consumer races the producer across it.
    #[test]
    fn loom_spsc_block_handoff() {
        loom::model(|| {
            let (mut tx, mut rx) = spsc_channel::<u64>(1, usize::MAX);

            let producer = thread::spawn(move || {
                for i in 0..3u64 {
                    assert!(tx.try_push(i).is_ok());
                }
            });

            let consumer = thread::spawn(move || {
                let mut received = Vec::new();
                while received.len() < 3 {
                    match rx.try_pop() {
                        Some(v) => received.push(v),
                        None => loom::thread::yield_now(),
                    }
                }
                received
            });

            producer.join().unwrap();
            let received = consumer.join().unwrap();

            assert_eq!(received, vec![0, 1, 2]);
        });
    }

    /// Full/drain cycling on a bounded ring under loom.
    #[test]
    fn loom_spsc_full_retry() {
        loom::model(|| {
            let (mut tx, mut rx) = spsc_channel::<u64>(2, 2);

            let producer = thread::spawn(move || {
                // 4 items through a capacity-2 ring requires consumer drain.
                for i in 0..4u64 {
                    loop {
                        match tx.try_push(i) {
                            Ok(()) => break,
                            Err(_) => loom::thread::yield_now(),
                        }
                    }
                }
            });

            let consumer = thread::spawn(move || {
                let mut received = Vec::new();
                while received.len() < 4 {
                    match rx.try_pop() {
                        Some(v) => received.push(v),
                        None => loom::thread::yield_now(),
                    }
                }
                received
            });

            producer.join().unwrap();
            let received = consumer.join().unwrap();

            assert_eq!(received, vec![0, 1, 2, 3]);
        });
    }
}
