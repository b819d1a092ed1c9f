//! Worker lifecycle: the active flag and the spawn/join state machine.
//!
//! A [`WorkerSet`] is either idle (it holds every lane's worker endpoints)
//! or running (the endpoints are out with the threads). Start hands the
//! endpoints to `N` named threads; stop joins them and takes the endpoints
//! back, so start/stop cycles are supported. Starting while running is an
//! error; stopping while idle is a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::worker::{lane_loop, IdlePolicy, LaneEndpoints};

/// Attempted to start workers while a previous set is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlreadyRunning;

impl std::fmt::Display for AlreadyRunning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "workers are already running; stop them before starting again")
    }
}

impl std::error::Error for AlreadyRunning {}

pub(crate) struct WorkerSet<I: Send + 'static, O: Send + 'static> {
    /// Consulted by spin/sleep workers on every iteration. Release-stored
    /// at stop, relaxed-loaded on the hot path.
    active: Arc<AtomicBool>,
    /// Lane endpoints, present while idle. Indexed by lane.
    idle: Vec<LaneEndpoints<I, O>>,
    /// Join handles, present while running. Indexed by lane.
    running: Vec<JoinHandle<LaneEndpoints<I, O>>>,
}

impl<I: Send + 'static, O: Default + Send + 'static> WorkerSet<I, O> {
    pub(crate) fn new(endpoints: Vec<LaneEndpoints<I, O>>) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            idle: endpoints,
            running: Vec::new(),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.running.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Spawn one worker per lane under the given idle policy.
    ///
    /// Drain workers run on their input backlog alone, so the flag stays
    /// false for them; the other policies set it before any thread spawns.
    pub(crate) fn start<F>(&mut self, policy: IdlePolicy, convert: &Arc<F>) -> Result<(), AlreadyRunning>
    where
        F: Fn(&I, &mut O) + Send + Sync + 'static,
    {
        if self.is_running() {
            return Err(AlreadyRunning);
        }

        if !matches!(policy, IdlePolicy::Drain) {
            self.active.store(true, Ordering::Release);
        }

        for (lane, ep) in self.idle.drain(..).enumerate() {
            let active = Arc::clone(&self.active);
            let convert = Arc::clone(convert);
            let handle = thread::Builder::new()
                .name(format!("lane-worker-{lane}"))
                .spawn(move || lane_loop(lane, ep, convert.as_ref(), &active, policy))
                .expect("failed to spawn lane worker thread");
            self.running.push(handle);
        }
        Ok(())
    }

    /// Clear the active flag and join every worker, reclaiming the lane
    /// endpoints in lane order. No-op when already stopped.
    ///
    /// # Panics
    ///
    /// Re-panics on the calling thread if a worker panicked.
    pub(crate) fn stop(&mut self) {
        self.active.store(false, Ordering::Release);
        for handle in self.running.drain(..) {
            let ep = handle.join().expect("lane worker panicked");
            self.idle.push(ep);
        }
    }
}

impl<I: Send + 'static, O: Send + 'static> Drop for WorkerSet<I, O> {
    fn drop(&mut self) {
        // Joining here is the drop-safe rendition of "destroying a running
        // parser is a usage error": spin/sleep workers see the cleared flag
        // and exit; drain workers are already on their way out.
        self.active.store(false, Ordering::Release);
        for handle in self.running.drain(..) {
            let _ = handle.join();
        }
    }
}
