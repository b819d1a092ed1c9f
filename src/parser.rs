//! The parser façade: construction, push/pop, and the start/stop surface.
//!
//! # Architecture
//!
//! ```text
//!            push                                         pop
//!  caller ──────────► in[submit_idx] ─► worker[i] ─► out[i] ──────────► caller
//!            │        (N input lanes)     │ f      (N output lanes)│
//!            └─ advance (idx+1)&(N-1)     │                        └─ advance (idx+1)&(N-1)
//!                                    one thread per lane
//! ```
//!
//! Push advances the submit cursor by one lane per accepted item and pop
//! advances the receive cursor identically, so both streams traverse the
//! bank in the same round-robin order. Each lane's worker preserves its
//! lane's FIFO, therefore the k-th successful pop is `f(v_k)` for the k-th
//! successful push — with no global lock anywhere on the path.
//!
//! # Threading roles
//!
//! Exactly one pusher, exactly one popper, exactly `N` workers. The two
//! caller roles may be one thread calling [`Parser::push`] and
//! [`Parser::pop`] serially, or two threads holding the halves from
//! [`Parser::halves`]. The `&mut` receivers make a third concurrent role a
//! compile error rather than a data race.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::lanes::{LaneReceiver, LaneSubmitter};
use crate::lifecycle::{AlreadyRunning, WorkerSet};
use crate::spsc::{floor_pow2, spsc_channel};
use crate::worker::{IdlePolicy, LaneEndpoints};

/// Default per-lane initial queue capacity.
pub const DEFAULT_INIT_CAPACITY: usize = 4096;

// ============================================================================
// Configuration
// ============================================================================

/// Construction-time knobs for a [`Parser`].
///
/// `lanes` must be a non-zero power of two so lane selection can mask
/// instead of dividing. `init_capacity` is allocated per lane up front and
/// rounded up to a power of two; `max_capacity` bounds per-lane growth
/// (`usize::MAX` leaves the queues effectively unbounded, equal to the
/// rounded initial capacity pins them as fixed rings).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Number of lanes, i.e. worker threads and queue pairs.
    pub lanes: usize,
    /// Initial slot count per SPSC queue.
    pub init_capacity: usize,
    /// Growth bound per SPSC queue.
    pub max_capacity: usize,
}

impl Default for ParserConfig {
    /// Lanes default to the platform's concurrent-thread estimate, rounded
    /// down to a power of two.
    fn default() -> Self {
        let threads = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            lanes: floor_pow2(threads),
            init_capacity: DEFAULT_INIT_CAPACITY,
            max_capacity: usize::MAX,
        }
    }
}

impl ParserConfig {
    /// Validate lane count and capacities.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.lanes == 0 || !self.lanes.is_power_of_two() {
            return Err(BuildError::InvalidLaneCount(self.lanes));
        }
        if self.init_capacity == 0 {
            return Err(BuildError::InvalidCapacity {
                init: self.init_capacity,
                max: self.max_capacity,
            });
        }
        if self.max_capacity < self.init_capacity.next_power_of_two() {
            return Err(BuildError::InvalidCapacity {
                init: self.init_capacity,
                max: self.max_capacity,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Construction failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// Lane count is zero or not a power of two.
    InvalidLaneCount(usize),
    /// Initial capacity is zero, or the growth bound is below it.
    InvalidCapacity { init: usize, max: usize },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::InvalidLaneCount(n) => {
                write!(f, "lane count must be a non-zero power of two, got {}", n)
            }
            BuildError::InvalidCapacity { init, max } => write!(
                f,
                "invalid queue capacities: init {} with growth bound {}",
                init, max
            ),
        }
    }
}

impl std::error::Error for BuildError {}

// ============================================================================
// Parser
// ============================================================================

/// Order-preserving parallel converter from `I` to `O`.
///
/// The conversion function is taken by value so closures inline into the
/// worker loop; it must tolerate concurrent invocation on distinct inputs
/// (each lane converts independently).
pub struct Parser<I, O, F>
where
    I: Send + 'static,
    O: Send + 'static,
{
    convert: Arc<F>,
    submit: LaneSubmitter<I>,
    receive: LaneReceiver<O>,
    workers: WorkerSet<I, O>,
    config: ParserConfig,
}

impl<I, O, F> Parser<I, O, F>
where
    I: Send + 'static,
    O: Default + Send + 'static,
    F: Fn(&I, &mut O) + Send + Sync + 'static,
{
    /// Build a parser with the default configuration.
    pub fn new(convert: F) -> Result<Self, BuildError> {
        Self::with_config(convert, ParserConfig::default())
    }

    /// Build a parser with an explicit configuration.
    pub fn with_config(convert: F, config: ParserConfig) -> Result<Self, BuildError> {
        config.validate()?;

        let mut in_producers = Vec::with_capacity(config.lanes);
        let mut out_consumers = Vec::with_capacity(config.lanes);
        let mut endpoints = Vec::with_capacity(config.lanes);
        for _ in 0..config.lanes {
            let (in_tx, in_rx) = spsc_channel::<I>(config.init_capacity, config.max_capacity);
            let (out_tx, out_rx) = spsc_channel::<O>(config.init_capacity, config.max_capacity);
            in_producers.push(in_tx);
            out_consumers.push(out_rx);
            endpoints.push(LaneEndpoints {
                input: in_rx,
                output: out_tx,
            });
        }

        Ok(Self {
            convert: Arc::new(convert),
            submit: LaneSubmitter::new(in_producers),
            receive: LaneReceiver::new(out_consumers),
            workers: WorkerSet::new(endpoints),
            config,
        })
    }

    /// Attempt to push an item. Returns false when the current lane is full
    /// at its capacity bound; the caller may retry. Never blocks.
    #[inline]
    pub fn push(&mut self, item: I) -> bool {
        self.submit.push(item)
    }

    /// Attempt to pop the next converted item in push order. Returns `None`
    /// when the next item is not ready. Never blocks.
    #[inline]
    pub fn pop(&mut self) -> Option<O> {
        self.receive.pop()
    }

    /// Split the caller surface into its pushing and popping halves so two
    /// threads can drive the pipeline concurrently, one per role.
    pub fn halves(&mut self) -> (&mut LaneSubmitter<I>, &mut LaneReceiver<O>) {
        (&mut self.submit, &mut self.receive)
    }

    /// Best-effort count of items awaiting conversion. Observational only;
    /// cost is linear in queue segment count, so avoid hot-looping it.
    pub fn input_size(&self) -> usize {
        self.submit.len_approx()
    }

    /// Best-effort count of converted items awaiting pop.
    pub fn output_size(&self) -> usize {
        self.receive.len_approx()
    }

    /// Start spin-mode workers: lowest latency, one busy core per lane,
    /// until [`stop`](Self::stop).
    pub fn start(&mut self) -> Result<(), AlreadyRunning> {
        self.workers.start(IdlePolicy::Spin, &self.convert)
    }

    /// Start drain-mode workers: each exits the first time its input lane
    /// reads empty. Suited to runs where the input is queued up front.
    pub fn start_wait(&mut self) -> Result<(), AlreadyRunning> {
        self.workers.start(IdlePolicy::Drain, &self.convert)
    }

    /// Start sleep-poll workers: sleep `interval` on an empty lane, until
    /// [`stop_sleep`](Self::stop_sleep).
    pub fn start_sleep(&mut self, interval: Duration) -> Result<(), AlreadyRunning> {
        self.workers.start(IdlePolicy::Sleep(interval), &self.convert)
    }

    /// Clear the active flag and join all workers. After return no worker
    /// runs. A second stop is a no-op.
    pub fn stop(&mut self) {
        self.workers.stop();
    }

    /// Join drain-mode workers. Provided for symmetry with
    /// [`start_wait`](Self::start_wait); behaves as [`stop`](Self::stop).
    pub fn stop_wait(&mut self) {
        self.workers.stop();
    }

    /// Stop sleep-poll workers. Behaves as [`stop`](Self::stop); the join
    /// waits out at most one sleep interval per lane.
    pub fn stop_sleep(&mut self) {
        self.workers.stop();
    }

    /// Whether workers are currently running.
    pub fn is_running(&self) -> bool {
        self.workers.is_running()
    }

    /// Number of lanes.
    pub fn lanes(&self) -> usize {
        self.config.lanes
    }

    /// The configuration this parser was built with.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================
