//! Fixed-size worker pool built on Rayon.
//!
//! Tasks run on a dedicated pool (never the global one), each producing a
//! private result. [`WorkerPool::run`] returns only after every task has
//! finished, so the caller merges complete results on its own thread and
//! workers never share mutable state.
//!
//! A failing or panicking task fails the whole run with
//! [`Error::PartialWorkerFailure`]; no partial result is returned.
//!
//! # Example
//!
//! ```ignore
//! use metagraph_core::execution::{WorkerPool, partition_ranges};
//!
//! let pool = WorkerPool::new(4)?;
//! let sums = pool.run(partition_ranges(100, 4), |_, range| Ok(range.sum::<usize>()))?;
//! assert_eq!(sums.iter().sum::<usize>(), 4950);
//! ```

use std::any::Any;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use metagraph_common::utils::error::{Error, Result};
use rayon::prelude::*;

/// A fixed-size pool of worker threads.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl WorkerPool {
    /// Creates a pool with `threads` workers.
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(Error::invalid("threads", "must be greater than zero"));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("metagraph-worker-{i}"))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build worker pool: {e}")))?;
        Ok(Self { pool, threads })
    }

    /// Creates a single-worker pool. Results are identical to any larger pool.
    pub fn single() -> Result<Self> {
        Self::new(1)
    }

    /// Number of worker threads.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Runs one task per input and joins them all.
    ///
    /// `task` receives the input's index and the input. Outputs come back in
    /// input order regardless of completion order.
    pub fn run<I, T, F>(&self, inputs: Vec<I>, task: F) -> Result<Vec<T>>
    where
        I: Send,
        T: Send,
        F: Fn(usize, I) -> Result<T> + Sync + Send,
    {
        self.pool.install(|| {
            inputs
                .into_par_iter()
                .enumerate()
                .map(|(index, input)| run_task(index, input, &task))
                .collect()
        })
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads)
            .finish()
    }
}

fn run_task<I, T, F>(index: usize, input: I, task: &F) -> Result<T>
where
    F: Fn(usize, I) -> Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| task(index, input))) {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(Error::PartialWorkerFailure {
            task: index,
            source: Box::new(source),
        }),
        Err(payload) => Err(Error::PartialWorkerFailure {
            task: index,
            source: Box::new(Error::Internal(panic_message(payload.as_ref()))),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Hardware parallelism, falling back to 1 when it cannot be queried.
#[must_use]
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Splits `0..len` into `partitions` contiguous ranges.
///
/// Every range but the last holds `len / partitions` items; the last one
/// absorbs the remainder. Ranges never overlap and always cover `0..len`.
/// With `partitions == 0` the result is empty.
#[must_use]
pub fn partition_ranges(len: usize, partitions: usize) -> Vec<Range<usize>> {
    if partitions == 0 {
        return Vec::new();
    }
    let chunk = len / partitions;
    (0..partitions)
        .map(|i| {
            let start = i * chunk;
            let end = if i + 1 == partitions { len } else { start + chunk };
            start..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use metagraph_common::types::NodeId;

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(
            WorkerPool::new(0),
            Err(Error::InvalidParameter { name: "threads", .. })
        ));
    }

    #[test]
    fn test_run_preserves_input_order() {
        let pool = WorkerPool::new(4).unwrap();
        let out = pool.run((0..64u64).collect(), |_, x: u64| Ok(x * 2)).unwrap();
        assert_eq!(out, (0..64u64).map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_worker_pool() {
        let pool = WorkerPool::single().unwrap();
        assert_eq!(pool.threads(), 1);
        let out = pool.run(vec![1, 2, 3], |i, x: i32| Ok(x + i as i32)).unwrap();
        assert_eq!(out, vec![1, 3, 5]);
    }

    #[test]
    fn test_task_error_fails_run() {
        let pool = WorkerPool::new(2).unwrap();
        let err = pool
            .run(vec![0u32, 1, 2], |_, x| {
                if x == 1 {
                    Err(Error::UnknownNode(NodeId::new(x)))
                } else {
                    Ok(x)
                }
            })
            .unwrap_err();
        match err {
            Error::PartialWorkerFailure { task, source } => {
                assert_eq!(task, 1);
                assert!(matches!(*source, Error::UnknownNode(NodeId(1))));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_task_panic_fails_run() {
        let pool = WorkerPool::new(2).unwrap();
        let err = pool
            .run(vec![0u32, 1], |_, x| {
                assert!(x == 0, "boom");
                Ok(x)
            })
            .unwrap_err();
        assert!(matches!(err, Error::PartialWorkerFailure { task: 1, .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_partition_ranges_cover_everything() {
        let ranges = partition_ranges(10, 3);
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);

        let ranges = partition_ranges(2, 4);
        assert_eq!(ranges, vec![0..0, 0..0, 0..0, 0..2]);

        assert!(partition_ranges(5, 0).is_empty());
        assert_eq!(partition_ranges(0, 2), vec![0..0, 0..0]);
    }
}
