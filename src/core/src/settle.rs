//! Settle - Wait for every task, fail never.
//!
//! Unlike a fail-fast `join_all`, settling never short-circuits: every task
//! runs to completion and its outcome is recorded as data.
//!
//! - [`settle`] polls all tasks concurrently inside the calling task
//! - [`settle_spawned`] spawns each task onto the tokio runtime so they run
//!   in parallel on worker threads, merging outcomes through one consumer
//!
//! # Example
//!
//! ```rust,ignore
//! use settle_core::settle::settle;
//!
//! let result = settle(vec![fetch("a"), fetch("b"), fetch("c")]).await;
//!
//! for err in &result.rejected {
//!     tracing::warn!(error = %err, "fetch failed");
//! }
//! let bodies = result.into_result("some fetches failed")?;
//! ```

use std::future::Future;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use metrics::counter;
use tokio::task::JoinSet;

use crate::aggregate::AggregateError;

/// Outcome partition of a settled set of tasks.
///
/// Within each vector, entries appear in the order their tasks completed,
/// not the order the tasks were supplied in. No ordering holds between the
/// two vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleResult<T, E> {
    /// Values of the tasks that succeeded
    pub fulfilled: Vec<T>,
    /// Errors of the tasks that failed
    pub rejected: Vec<E>,
}

impl<T, E> SettleResult<T, E> {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self {
            fulfilled: Vec::new(),
            rejected: Vec::new(),
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            fulfilled: Vec::with_capacity(capacity),
            rejected: Vec::new(),
        }
    }

    /// Record one task outcome.
    fn record(&mut self, outcome: Result<T, E>) {
        match outcome {
            Ok(value) => self.fulfilled.push(value),
            Err(error) => self.rejected.push(error),
        }
    }

    /// Total number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.fulfilled.len() + self.rejected.len()
    }

    /// Whether no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every task succeeded.
    pub fn is_all_fulfilled(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Split into `(fulfilled, rejected)`.
    pub fn into_parts(self) -> (Vec<T>, Vec<E>) {
        (self.fulfilled, self.rejected)
    }
}

impl<T, E: std::fmt::Display + std::fmt::Debug> SettleResult<T, E> {
    /// Convert into a `Result`, bundling any failures into an [`AggregateError`].
    ///
    /// Returns the fulfilled values when nothing was rejected. Otherwise the
    /// fulfilled values are dropped and the rejected errors become the
    /// children of an aggregate with the given summary message.
    pub fn into_result(self, message: impl Into<String>) -> Result<Vec<T>, AggregateError<E>> {
        if self.rejected.is_empty() {
            Ok(self.fulfilled)
        } else {
            Err(AggregateError::new(message, self.rejected))
        }
    }
}

impl<T, E> Default for SettleResult<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run every task to completion and partition the outcomes.
///
/// All tasks are polled concurrently from the calling task; none waits on
/// another. The returned future resolves only once every task has finished,
/// regardless of how many failed. An empty input resolves immediately to an
/// empty partition.
///
/// Dropping the returned future drops every task still in flight.
pub async fn settle<I, F, T, E>(tasks: I) -> SettleResult<T, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let mut in_flight: FuturesUnordered<F> = tasks.into_iter().collect();
    let total = in_flight.len();

    let mut result = SettleResult::with_capacity(total);
    while let Some(outcome) = in_flight.next().await {
        result.record(outcome);
    }

    report(&result, start);
    result
}

/// Spawn every task onto the tokio runtime and partition the outcomes.
///
/// Tasks run in parallel on the runtime's worker threads. Outcomes are
/// merged by this future alone, in the order the tasks complete. Must be
/// called from within a tokio runtime.
///
/// A task that panics has its panic resumed here. Dropping the returned
/// future aborts every task still running.
pub async fn settle_spawned<I, F, T, E>(tasks: I) -> SettleResult<T, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let start = Instant::now();
    let mut set = JoinSet::new();
    for task in tasks {
        set.spawn(task);
    }

    let mut result = SettleResult::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(outcome) => result.record(outcome),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                tracing::warn!(error = %e, "Settled task was cancelled before completing");
            }
        }
    }

    report(&result, start);
    result
}

fn report<T, E>(result: &SettleResult<T, E>, start: Instant) {
    let fulfilled = result.fulfilled.len();
    let rejected = result.rejected.len();

    counter!("settle_outcomes_total", "outcome" => "fulfilled").increment(fulfilled as u64);
    counter!("settle_outcomes_total", "outcome" => "rejected").increment(rejected as u64);

    tracing::debug!(
        tasks = fulfilled + rejected,
        fulfilled = fulfilled,
        rejected = rejected,
        duration_ms = start.elapsed().as_millis() as u64,
        "Settled tasks"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;

    #[test]
    fn test_settle_result_defaults() {
        let result: SettleResult<u32, String> = SettleResult::default();

        assert!(result.is_empty());
        assert!(result.is_all_fulfilled());
        assert_eq!(result, SettleResult::new());
    }

    #[test]
    fn test_record_partitions_outcomes() {
        let mut result = SettleResult::new();
        result.record(Ok(1));
        result.record(Err("boom"));
        result.record(Ok(2));

        assert_eq!(result.len(), 3);
        assert!(!result.is_all_fulfilled());
        assert_eq!(result.into_parts(), (vec![1, 2], vec!["boom"]));
    }

    #[test]
    fn test_into_result_ok_when_nothing_rejected() {
        let result: SettleResult<u32, &str> = SettleResult {
            fulfilled: vec![1, 2],
            rejected: vec![],
        };
        assert_eq!(result.into_result("failed"), Ok(vec![1, 2]));
    }

    #[test]
    fn test_into_result_aggregates_rejections() {
        let result = SettleResult {
            fulfilled: vec![1],
            rejected: vec!["one", "two"],
        };

        let err = result.into_result("2 tasks failed").unwrap_err();
        assert_eq!(err.summary(), "2 tasks failed");
        assert_eq!(err.iter().copied().collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn test_settle_ready_futures_blocking() {
        let result = futures::executor::block_on(settle(vec![
            ready(Ok::<_, String>(1)),
            ready(Err("nope".to_string())),
        ]));

        assert_eq!(result.fulfilled, vec![1]);
        assert_eq!(result.rejected, vec!["nope".to_string()]);
    }

    #[tokio::test]
    async fn test_settle_empty() {
        let tasks: Vec<std::future::Ready<Result<u32, String>>> = Vec::new();
        let result = settle(tasks).await;

        assert!(result.fulfilled.is_empty());
        assert!(result.rejected.is_empty());
    }

    #[tokio::test]
    async fn test_settle_spawned_empty() {
        let tasks: Vec<std::future::Ready<Result<u32, String>>> = Vec::new();
        let result = settle_spawned(tasks).await;

        assert!(result.is_empty());
    }
}
