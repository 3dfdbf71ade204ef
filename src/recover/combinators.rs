//! The bounded-repeat and ordered-fallback-chain combinators.

use crate::Outcome;

/// A boxed recovery function, as stored by [`chain`].
///
/// A recovery function maps a failed [`Outcome`] to a new one. It is `FnMut`
/// so a single policy value can be applied across a whole pipeline of
/// outcomes, and so it may carry internal state (an attempt counter, a
/// fallback table).
pub type Recovery<S, F> = Box<dyn FnMut(Outcome<S, F>) -> Outcome<S, F>>;

/// Information about a recovery application, passed to observer hooks.
#[derive(Debug)]
pub struct RecoveryEvent<'a, F> {
    /// Which application is about to run (1-indexed).
    pub attempt: u32,
    /// Applications left in the budget after this one.
    pub remaining: u32,
    /// The failure payload the recovery function will receive.
    pub error: &'a F,
}

/// Retry one recovery function up to `limit` times.
///
/// The returned combinator applies `op` repeatedly while the outcome remains
/// a failure and attempts remain, decrementing the budget before each
/// application. It stops as soon as the outcome becomes a success, or once
/// the budget is spent, returning whatever the last application produced.
/// A `limit` of zero performs no applications and returns the input
/// unchanged.
///
/// Each application receives the *previous* application's result, not the
/// pipeline's original input - a recovery function that needs retry
/// parameters must read them out of the evolving failure payload.
///
/// The combinator is itself a recovery function and may be nested, e.g. as
/// one link of a [`chain`].
///
/// # Examples
///
/// ```
/// use kintsugi::{recover::repeat, Outcome};
///
/// let mut calls = 0;
/// let mut retry = repeat(
///     |o: Outcome<i32, u32>| {
///         calls += 1;
///         if calls < 3 {
///             o
///         } else {
///             Outcome::success(99)
///         }
///     },
///     5,
/// );
///
/// assert_eq!(retry(Outcome::failure(0)), Outcome::success(99));
/// ```
pub fn repeat<S, F, R>(mut op: R, limit: u32) -> impl FnMut(Outcome<S, F>) -> Outcome<S, F>
where
    R: FnMut(Outcome<S, F>) -> Outcome<S, F>,
{
    move |mut outcome| {
        let mut remaining = limit;
        while outcome.is_failure() && remaining > 0 {
            remaining -= 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(remaining, "applying recovery to failed outcome");
            outcome = op(outcome);
        }
        outcome
    }
}

/// Like [`repeat`], invoking `hook` before each application.
///
/// The hook receives a [`RecoveryEvent`] borrowing the failure payload the
/// recovery function is about to see. Use it for diagnostics; the hook
/// cannot alter the outcome.
///
/// # Examples
///
/// ```
/// use kintsugi::{recover::repeat_observed, Outcome};
///
/// let mut attempts = Vec::new();
/// let mut retry = repeat_observed(
///     |o: Outcome<i32, &str>| o,
///     3,
///     |event| attempts.push(event.attempt),
/// );
///
/// assert!(retry(Outcome::failure("stuck")).is_failure());
/// drop(retry);
/// assert_eq!(attempts, vec![1, 2, 3]);
/// ```
pub fn repeat_observed<S, F, R, H>(
    mut op: R,
    limit: u32,
    mut hook: H,
) -> impl FnMut(Outcome<S, F>) -> Outcome<S, F>
where
    R: FnMut(Outcome<S, F>) -> Outcome<S, F>,
    H: FnMut(&RecoveryEvent<'_, F>),
{
    move |mut outcome| {
        let mut remaining = limit;
        let mut attempt = 0;
        while remaining > 0 {
            let error = match &outcome {
                Outcome::Failure(error) => error,
                Outcome::Success(_) => break,
            };
            attempt += 1;
            remaining -= 1;
            hook(&RecoveryEvent {
                attempt,
                remaining,
                error,
            });
            outcome = op(outcome);
        }
        outcome
    }
}

/// Try a sequence of recovery functions in order until one succeeds.
///
/// The returned combinator applies the first step if the input is a
/// failure; if the result is still a failure it applies the next step to
/// that *new* result, and so on left to right. It stops at the first
/// success. If every step is exhausted while still failing, the last
/// failure observed is returned. An empty chain is the identity.
///
/// Steps are boxed so a chain can mix closures, [`repeat`] products, and
/// waiting steps like [`pause`](crate::recover::pause); the [`chain!`]
/// macro boxes each step for you.
///
/// # Examples
///
/// ```
/// use kintsugi::{recover::{chain, Recovery}, Outcome};
///
/// let steps: Vec<Recovery<i32, &str>> = vec![
///     Box::new(|o| o),                          // does not help
///     Box::new(|_| Outcome::success(7)),        // this one does
///     Box::new(|_| unreachable!("never tried")),
/// ];
/// let mut fallback = chain(steps);
///
/// assert_eq!(fallback(Outcome::failure("e")), Outcome::success(7));
/// ```
pub fn chain<S, F>(mut steps: Vec<Recovery<S, F>>) -> impl FnMut(Outcome<S, F>) -> Outcome<S, F> {
    move |mut outcome| {
        for step in steps.iter_mut() {
            if outcome.is_success() {
                break;
            }
            #[cfg(feature = "tracing")]
            tracing::trace!("trying next fallback step");
            outcome = step(outcome);
        }
        outcome
    }
}

/// Like [`chain`], invoking `hook` before each step that runs.
///
/// `attempt` in the event is the 1-indexed position of the step about to
/// run; `remaining` counts the steps after it.
pub fn chain_observed<S, F, H>(
    mut steps: Vec<Recovery<S, F>>,
    mut hook: H,
) -> impl FnMut(Outcome<S, F>) -> Outcome<S, F>
where
    H: FnMut(&RecoveryEvent<'_, F>),
{
    move |mut outcome| {
        let total = steps.len() as u32;
        for (index, step) in steps.iter_mut().enumerate() {
            let error = match &outcome {
                Outcome::Failure(error) => error,
                Outcome::Success(_) => break,
            };
            let attempt = index as u32 + 1;
            hook(&RecoveryEvent {
                attempt,
                remaining: total - attempt,
                error,
            });
            outcome = step(outcome);
        }
        outcome
    }
}

/// Build an ordered-fallback-chain from a list of recovery closures.
///
/// Each argument is boxed into a [`Recovery`] and handed to
/// [`chain`](crate::recover::chain). With no arguments the chain is the
/// identity.
///
/// # Examples
///
/// ```
/// use kintsugi::{chain, Outcome};
///
/// let mut fallback = chain![
///     |o: Outcome<i32, &str>| o,
///     |_| Outcome::success(7),
/// ];
///
/// assert_eq!(fallback(Outcome::failure("e")), Outcome::success(7));
/// ```
#[macro_export]
macro_rules! chain {
    () => {
        $crate::recover::chain(::std::vec::Vec::new())
    };
    ($($step:expr),+ $(,)?) => {{
        let steps: ::std::vec::Vec<$crate::recover::Recovery<_, _>> =
            vec![$(::std::boxed::Box::new($step)),+];
        $crate::recover::chain(steps)
    }};
}
