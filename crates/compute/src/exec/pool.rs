//! Fixed-size worker pool with result-carrying task handles.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc;

use crate::error::ComputeError;

/// Pool of OS worker threads, sized once at construction.
///
/// Two submission styles are offered: [`TaskPool::submit`] for detached
/// `'static` jobs whose value comes back through a [`TaskHandle`], and
/// [`TaskPool::scope`] for jobs that borrow from the caller's stack and
/// must all finish before the call returns.
pub struct TaskPool {
    pool: rayon::ThreadPool,
}

impl TaskPool {
    /// Builds a pool with `workers` threads; `0` means one per available
    /// core.
    pub fn new(workers: usize) -> Result<Self, ComputeError> {
        let workers = resolve_workers(workers);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("spanner-worker-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Submits one unit of work. Completion order is unrelated to
    /// submission order; the handle is the only way to observe the result.
    pub fn submit<T, F>(&self, job: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        self.pool.spawn(move || {
            let outcome = catch_unwind(AssertUnwindSafe(job));
            // The handle may already be gone; that is the caller's choice.
            let _ = tx.send(outcome);
        });
        TaskHandle { rx }
    }

    /// Runs borrowing jobs to completion on the pool. A panic in any
    /// spawned job resurfaces here once every job has finished.
    pub fn scope<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&rayon::Scope<'scope>) -> R + Send,
        R: Send,
    {
        self.pool.scope(op)
    }
}

/// `0` workers means one per core, like the usual thread-count knobs.
fn resolve_workers(workers: usize) -> usize {
    if workers > 0 {
        workers
    } else {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Pending result of a submitted task.
pub struct TaskHandle<T> {
    rx: mpsc::Receiver<std::thread::Result<T>>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the task finishes. A panic inside the task surfaces
    /// as [`ComputeError::TaskPanicked`] instead of unwinding here.
    pub fn wait(self) -> Result<T, ComputeError> {
        match self.rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(ComputeError::TaskPanicked(panic_message(payload.as_ref()))),
            Err(_) => Err(ComputeError::Disconnected),
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn submit_returns_the_job_value() {
        let pool = TaskPool::new(2).unwrap();
        let handle = pool.submit(|| 21 * 2);
        assert_eq!(handle.wait().unwrap(), 42);
    }

    #[test]
    fn completion_order_is_independent_of_submission_order() {
        let pool = TaskPool::new(2).unwrap();
        let slow = pool.submit(|| {
            std::thread::sleep(Duration::from_millis(50));
            "slow"
        });
        let fast = pool.submit(|| "fast");
        // Joining in submission order still yields both values.
        assert_eq!(slow.wait().unwrap(), "slow");
        assert_eq!(fast.wait().unwrap(), "fast");
    }

    #[test]
    fn panic_in_job_becomes_an_error() {
        let pool = TaskPool::new(1).unwrap();
        let handle = pool.submit(|| -> u32 { panic!("boom") });
        match handle.wait() {
            Err(ComputeError::TaskPanicked(msg)) => assert!(msg.contains("boom")),
            other => panic!("expected TaskPanicked, got {other:?}"),
        }
    }

    #[test]
    fn panic_does_not_kill_the_pool() {
        let pool = TaskPool::new(1).unwrap();
        let bad = pool.submit(|| panic!("first"));
        assert!(bad.wait().is_err());
        let good = pool.submit(|| 7);
        assert_eq!(good.wait().unwrap(), 7);
    }

    #[test]
    fn zero_workers_resolves_to_available_cores() {
        let pool = TaskPool::new(0).unwrap();
        assert!(pool.workers() >= 1);
    }

    #[test]
    fn scope_jobs_all_run_before_return() {
        let pool = TaskPool::new(4).unwrap();
        let counter = AtomicUsize::new(0);
        pool.scope(|s| {
            for _ in 0..16 {
                s.spawn(|_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
        });
        assert_eq!(counter.load(Ordering::SeqCst), 16);
    }

    #[test]
    fn every_submitted_job_runs() {
        let pool = TaskPool::new(3).unwrap();
        let handles: Vec<_> = (0..20).map(|i| pool.submit(move || i)).collect();
        let mut sum = 0;
        for h in handles {
            sum += h.wait().unwrap();
        }
        assert_eq!(sum, (0..20).sum());
    }
}
