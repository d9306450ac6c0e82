use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::error::RasterError;

/// Runs a batch of jobs on scoped threads.
///
/// The pool only records a worker count; it owns no threads. Each
/// [`run`](Self::run) spawns up to that many workers, lets them pull jobs from
/// a shared cursor until the batch is drained, and joins them all before
/// returning. No thread survives between calls, so jobs may borrow local data.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self, RasterError> {
        if workers == 0 {
            return Err(RasterError::NoWorkers);
        }
        Ok(Self { workers })
    }

    /// One worker per available core, or one if that cannot be queried.
    pub fn with_available_parallelism() -> Self {
        let workers = thread::available_parallelism().map_or(1, |n| n.get());
        Self { workers }
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Processes every job exactly once and returns each worker's final state.
    ///
    /// `init` builds per-worker state; `work` is called with that state and a
    /// job. A worker that panics is logged and its state is lost; the jobs it
    /// had not reached are picked up by the others.
    pub fn run<J, S, I, W>(&self, jobs: &[J], init: I, work: W) -> Vec<S>
    where
        J: Sync,
        S: Send,
        I: Fn() -> S + Sync,
        W: Fn(&mut S, &J) + Sync,
    {
        if jobs.is_empty() {
            return Vec::new();
        }

        let cursor = AtomicUsize::new(0);
        let workers = self.workers.min(jobs.len());

        let worker = || {
            let mut state = init();
            loop {
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(job) = jobs.get(index) else { break };
                work(&mut state, job);
            }
            state
        };

        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers).map(|_| scope.spawn(&worker)).collect();
            handles
                .into_iter()
                .enumerate()
                .filter_map(|(i, handle)| match handle.join() {
                    Ok(state) => Some(state),
                    Err(_) => {
                        log::error!("raster worker {i} panicked");
                        None
                    }
                })
                .collect()
        })
    }
}
