//! Poll a background task until it reaches a terminal state.
//!
//! Ticks follow a fixed grid of `interval` starting one interval after the
//! call. Only one status fetch is ever in flight; what happens to ticks that
//! elapse while a fetch is running is decided by [`OverlapPolicy`].

use std::future::Future;
use std::time::Duration;

use bon::Builder;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::{ClientError, Result};
use crate::types::{TaskState, TaskStatus};

/// Default delay between status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Callback receiving every fetched snapshot before termination is evaluated.
pub type ProgressObserver<'a> = &'a mut (dyn FnMut(&TaskStatus) + Send);

/// What to do with ticks that elapse while a fetch is still in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Drop them and wait for the next tick on the interval grid.
    #[default]
    Skip,
    /// Fetch once immediately after the slow fetch settles, then restart the
    /// interval from that point.
    Queue,
}

/// Polling configuration.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use postcraft::poll::{OverlapPolicy, PollOptions};
///
/// let options = PollOptions::builder()
///     .interval(Duration::from_secs(1))
///     .overlap(OverlapPolicy::Queue)
///     .max_wait(Duration::from_secs(120))
///     .build();
/// assert_eq!(options.interval, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct PollOptions {
    #[builder(default = DEFAULT_POLL_INTERVAL)]
    pub interval: Duration,
    #[builder(default)]
    pub overlap: OverlapPolicy,
    /// Give up with [`ClientError::Timeout`] once this much time has passed.
    pub max_wait: Option<Duration>,
    /// Cancelling stops the loop with [`ClientError::Canceled`].
    #[builder(default)]
    pub cancel: CancellationToken,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Poll `fetch` until the task completes, fails, or the loop is stopped.
///
/// Resolves with the `completed` snapshot. A `failed` snapshot yields
/// [`ClientError::TaskFailed`]; a failing fetch ends polling immediately with
/// [`ClientError::PollTransport`]. After this returns the observer is never
/// called again.
pub async fn poll_task<F, Fut>(
    task_id: &str,
    options: &PollOptions,
    fetch: F,
    observer: Option<ProgressObserver<'_>>,
) -> Result<TaskStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<TaskStatus>>,
{
    if options.interval.is_zero() {
        return Err(ClientError::Configuration(
            "poll interval must be greater than zero".to_string(),
        ));
    }

    let polling = run_poll_loop(task_id, options, fetch, observer);
    match options.max_wait {
        Some(max_wait) => match tokio::time::timeout(max_wait, polling).await {
            Ok(result) => result,
            Err(_) => {
                let max_wait_ms = max_wait.as_millis() as u64;
                debug!(task_id, max_wait_ms, "Gave up waiting for task");
                Err(ClientError::Timeout(max_wait_ms))
            }
        },
        None => polling.await,
    }
}

async fn run_poll_loop<F, Fut>(
    task_id: &str,
    options: &PollOptions,
    mut fetch: F,
    mut observer: Option<ProgressObserver<'_>>,
) -> Result<TaskStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<TaskStatus>>,
{
    let cancel = &options.cancel;
    let mut next_tick = Instant::now() + options.interval;
    let mut attempt: u32 = 0;

    debug!(task_id, interval_ms = options.interval.as_millis() as u64, "Polling task");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(canceled(task_id, attempt)),
            _ = sleep_until(next_tick) => {}
        }

        attempt += 1;
        trace!(task_id, attempt, "Fetching task status");

        let snapshot = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(canceled(task_id, attempt)),
            result = fetch() => result.map_err(|e| ClientError::poll_transport(task_id, e))?,
        };

        if let Some(observer) = observer.as_mut() {
            observer(&snapshot);
        }

        match snapshot.status {
            TaskState::Completed => {
                debug!(task_id, attempt, "Task completed");
                return Ok(snapshot);
            }
            TaskState::Failed => {
                debug!(task_id, attempt, "Task failed");
                return Err(ClientError::task_failed(
                    snapshot.task_id,
                    snapshot.error_message,
                ));
            }
            TaskState::Pending | TaskState::Processing => {}
        }

        next_tick = schedule_next(next_tick, Instant::now(), options.interval, options.overlap);
    }
}

/// Next tick after a fetch that was started at `tick` and settled at `now`.
fn schedule_next(tick: Instant, now: Instant, interval: Duration, overlap: OverlapPolicy) -> Instant {
    let next = tick + interval;
    if next > now {
        return next;
    }
    match overlap {
        OverlapPolicy::Skip => {
            let behind = now.duration_since(tick);
            let skipped = (behind.as_nanos() / interval.as_nanos()) as u32;
            trace!(skipped, "Skipping ticks elapsed during in-flight fetch");
            tick + interval * (skipped + 1)
        }
        OverlapPolicy::Queue => now,
    }
}

fn canceled(task_id: &str, attempt: u32) -> ClientError {
    debug!(task_id, attempt, "Polling canceled");
    ClientError::Canceled
}
