//! # Kintsugi
//!
//! > *"The crack is part of the object's history, not the end of it"*
//!
//! A Rust library for composable failure capture and recovery.
//!
//! ## Philosophy
//!
//! **Kintsugi** treats failure as data to be mended, not a control-flow
//! event to be feared:
//! - An operation's outcome is a value - [`Outcome<S, F>`](Outcome) holds
//!   either the success or the failure, never both.
//! - Errors cross into data exactly once, at the [`capture`](capture())
//!   boundary; inside a pipeline they are only ever transformed, inspected,
//!   or reported.
//! - Recovery is composition: retries, waits, and fallback chains are
//!   ordinary functions from outcome to outcome, built with the
//!   combinators in [`recover`] and applied through
//!   [`Outcome::recover`].
//!
//! ## Quick Example
//!
//! ```rust
//! use kintsugi::{capture, chain, recover::repeat, Outcome};
//!
//! // An operation that fails twice before succeeding.
//! let mut attempts = 0;
//! let flaky = move |n: i32| {
//!     attempts += 1;
//!     if attempts < 3 {
//!         Err(format!("attempt {} failed", attempts))
//!     } else {
//!         Ok(n * 2)
//!     }
//! };
//!
//! let mut read = capture(flaky);
//! let retry = move |_: Outcome<i32, String>| read(21);
//!
//! let mut policy = chain![repeat(retry, 5)];
//! let out = capture(|n: i32| Err::<i32, _>(format!("cold start {}", n)))(21)
//!     .recover(&mut policy)
//!     .report(|f| eprintln!("still failing: {}", f));
//!
//! assert_eq!(out, Outcome::Success(42));
//! ```
//!
//! For runnable pipelines, see the programs under `demos/`.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod capture;
pub mod outcome;
pub mod recover;
pub mod testing;

// Re-exports
pub use capture::{capture, capture_map};
pub use outcome::Outcome;
pub use recover::{chain, repeat, DelayPolicy, Recovery, WaitInterrupted};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::capture::{capture, capture_map};
    pub use crate::outcome::{failures, partition, successes, Outcome};
    pub use crate::recover::{
        backoff, chain, chain_observed, pause, pause_cancellable, repeat, repeat_observed,
        CancelToken, DelayPolicy, DelayStrategy, Recovery, RecoveryEvent, WaitInterrupted,
    };
}
