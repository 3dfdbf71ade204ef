//! Waiting recovery steps and the delay policy that shapes them.
//!
//! A waiting step is a recovery function that blocks the caller before
//! passing its outcome through unchanged, typically placed between two
//! retry attempts in a [`chain`](crate::recover::chain). The wait is an
//! explicit, visible pipeline step, not hidden concurrency.
//!
//! [`DelayPolicy`] is pure data describing how long to wait per attempt;
//! [`pause`] and [`backoff`] turn durations and policies into recovery
//! functions; [`pause_cancellable`] adds an interruptible wait via
//! [`CancelToken`].

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::error::WaitInterrupted;
use crate::Outcome;

/// A policy describing how long to wait before each recovery attempt.
///
/// Policies are pure data - they describe delays but never sleep
/// themselves, which keeps them easy to test, clone, and inspect. The
/// attempt *budget* is deliberately not part of the policy: in this
/// algebra, bounding attempts is [`repeat`](crate::recover::repeat)'s job,
/// and the policy only shapes the waits in between.
///
/// # Examples
///
/// ```
/// use kintsugi::recover::DelayPolicy;
/// use std::time::Duration;
///
/// let policy = DelayPolicy::exponential(Duration::from_millis(100))
///     .with_max_delay(Duration::from_secs(1));
///
/// assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
/// assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
/// assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(1)); // capped
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayPolicy {
    strategy: DelayStrategy,
    max_delay: Option<Duration>,
}

/// The backoff strategy for per-attempt delays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelayStrategy {
    /// Fixed delay between attempts.
    Constant(Duration),
    /// Delay increases linearly: base * (attempt + 1).
    Linear {
        /// Base delay duration.
        base: Duration,
    },
    /// Delay doubles: base * 2^attempt.
    Exponential {
        /// Base delay duration.
        base: Duration,
    },
    /// Delay follows the Fibonacci sequence: base * fib(attempt + 1).
    Fibonacci {
        /// Base delay duration.
        base: Duration,
    },
}

impl DelayPolicy {
    /// Create a policy with a constant delay.
    pub fn constant(delay: Duration) -> Self {
        Self {
            strategy: DelayStrategy::Constant(delay),
            max_delay: None,
        }
    }

    /// Create a policy with linearly increasing delay.
    ///
    /// Delay = base * (attempt + 1)
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::recover::DelayPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = DelayPolicy::linear(Duration::from_millis(100));
    ///
    /// assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
    /// assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
    /// assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(300));
    /// ```
    pub fn linear(base: Duration) -> Self {
        Self {
            strategy: DelayStrategy::Linear { base },
            max_delay: None,
        }
    }

    /// Create a policy with exponentially increasing delay.
    ///
    /// Delay = base * 2^attempt
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::recover::DelayPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = DelayPolicy::exponential(Duration::from_millis(100));
    ///
    /// assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
    /// assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
    /// assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
    /// ```
    pub fn exponential(base: Duration) -> Self {
        Self {
            strategy: DelayStrategy::Exponential { base },
            max_delay: None,
        }
    }

    /// Create a policy with Fibonacci-based delay.
    ///
    /// Delay = base * fib(attempt + 1)
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::recover::DelayPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = DelayPolicy::fibonacci(Duration::from_millis(100));
    ///
    /// assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
    /// assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
    /// assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
    /// assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(300));
    /// assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(500));
    /// ```
    pub fn fibonacci(base: Duration) -> Self {
        Self {
            strategy: DelayStrategy::Fibonacci { base },
            max_delay: None,
        }
    }

    /// Cap every delay at `d`, regardless of the strategy.
    pub fn with_max_delay(mut self, d: Duration) -> Self {
        self.max_delay = Some(d);
        self
    }

    /// Get the delay strategy.
    pub fn strategy(&self) -> &DelayStrategy {
        &self.strategy
    }

    /// Get the maximum delay cap.
    pub fn max_delay(&self) -> Option<Duration> {
        self.max_delay
    }

    /// Calculate the delay before attempt N (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay = match &self.strategy {
            DelayStrategy::Constant(d) => *d,
            DelayStrategy::Linear { base } => base.saturating_mul(attempt + 1),
            DelayStrategy::Exponential { base } => {
                base.saturating_mul(2u32.saturating_pow(attempt))
            }
            DelayStrategy::Fibonacci { base } => base.saturating_mul(fibonacci(attempt + 1)),
        };

        match self.max_delay {
            Some(max) => base_delay.min(max),
            None => base_delay,
        }
    }
}

/// Calculate the nth Fibonacci number.
fn fibonacci(n: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    let mut a = 0u32;
    let mut b = 1u32;
    for _ in 1..n {
        let temp = a.saturating_add(b);
        a = b;
        b = temp;
    }
    b
}

/// A recovery step that waits for a fixed duration.
///
/// Sleeps only when the outcome is a failure, then passes it through
/// unchanged; successes pass through without waiting. Place it between two
/// retry steps to space out attempts:
///
/// ```no_run
/// use kintsugi::{chain, recover::pause, Outcome};
/// use std::time::Duration;
///
/// let retry = |o: Outcome<String, String>| o; // stand-in for a real retry
/// let mut policy = chain![
///     retry,
///     pause(Duration::from_secs(3)),
///     |o: Outcome<String, String>| o,
/// ];
/// ```
pub fn pause<S, F>(delay: Duration) -> impl FnMut(Outcome<S, F>) -> Outcome<S, F> {
    move |outcome| {
        if outcome.is_failure() {
            #[cfg(feature = "tracing")]
            tracing::trace!(?delay, "pausing before next recovery step");
            std::thread::sleep(delay);
        }
        outcome
    }
}

/// A recovery step that waits according to a [`DelayPolicy`].
///
/// Carries its own attempt counter: the first failure it sees waits
/// `delay_for_attempt(0)`, the next `delay_for_attempt(1)`, and so on.
/// Successes pass through without waiting and without advancing the
/// counter.
///
/// # Examples
///
/// ```no_run
/// use kintsugi::recover::{backoff, DelayPolicy};
/// use kintsugi::Outcome;
/// use std::time::Duration;
///
/// let policy = DelayPolicy::exponential(Duration::from_millis(100));
/// let mut wait = backoff::<String, String>(policy);
///
/// let out = wait(Outcome::failure("transient".to_string())); // waits 100ms
/// let out = wait(out);                                       // waits 200ms
/// ```
pub fn backoff<S, F>(policy: DelayPolicy) -> impl FnMut(Outcome<S, F>) -> Outcome<S, F> {
    let mut attempt = 0u32;
    move |outcome| {
        if outcome.is_failure() {
            let delay = policy.delay_for_attempt(attempt);
            #[cfg(feature = "tracing")]
            tracing::trace!(attempt, ?delay, "backing off before next recovery step");
            std::thread::sleep(delay);
            attempt = attempt.saturating_add(1);
        }
        outcome
    }
}

/// A handle for interrupting waits in progress.
///
/// Cloning the token yields another handle to the same cancellation state.
/// `cancel` is sticky: once cancelled, every current and future wait on the
/// token ends immediately.
///
/// # Examples
///
/// ```
/// use kintsugi::recover::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
///
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    /// Create a new, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token, waking every wait blocked on it.
    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *cancelled = true;
        cvar.notify_all();
    }

    /// Returns `true` if the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for `delay`, ending early with an error if cancelled.
    pub(crate) fn wait_for(&self, delay: Duration) -> Result<(), WaitInterrupted> {
        let (lock, cvar) = &*self.inner;
        let deadline = Instant::now() + delay;
        let mut cancelled = lock.lock().unwrap_or_else(PoisonError::into_inner);

        loop {
            if *cancelled {
                return Err(WaitInterrupted::new(delay));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            let (guard, _timeout) = cvar
                .wait_timeout(cancelled, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            cancelled = guard;
        }
    }
}

/// A recovery step that waits for a fixed duration, unless cancelled.
///
/// Like [`pause`], but the wait can be interrupted through the given
/// [`CancelToken`]. An interrupted wait does not raise: it is converted, at
/// the point of interruption, into a failure outcome carrying
/// [`WaitInterrupted`] (via `F: From<WaitInterrupted>`), so the pipeline's
/// failure-propagation contract holds and a later fallback step can still
/// run or report it.
///
/// # Examples
///
/// ```
/// use kintsugi::recover::{pause_cancellable, CancelToken, WaitInterrupted};
/// use kintsugi::Outcome;
/// use std::time::Duration;
///
/// #[derive(Debug, PartialEq)]
/// enum Error {
///     NotFound,
///     Interrupted(WaitInterrupted),
/// }
///
/// impl From<WaitInterrupted> for Error {
///     fn from(w: WaitInterrupted) -> Self {
///         Error::Interrupted(w)
///     }
/// }
///
/// let token = CancelToken::new();
/// token.cancel(); // cancelled before the wait even starts
///
/// let mut wait = pause_cancellable::<i32, Error>(Duration::from_secs(60), token);
/// let out = wait(Outcome::failure(Error::NotFound));
///
/// assert!(matches!(out.unwrap_failure(), Error::Interrupted(_)));
/// ```
pub fn pause_cancellable<S, F>(
    delay: Duration,
    token: CancelToken,
) -> impl FnMut(Outcome<S, F>) -> Outcome<S, F>
where
    F: From<WaitInterrupted>,
{
    move |outcome| {
        if outcome.is_failure() {
            if let Err(interrupted) = token.wait_for(delay) {
                #[cfg(feature = "tracing")]
                tracing::trace!(?delay, "wait cancelled, surfacing as failure");
                return Outcome::failure(interrupted.into());
            }
        }
        outcome
    }
}
