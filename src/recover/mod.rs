//! Recovery combinators for failed outcomes.
//!
//! Everything here operates on recovery functions - transformations from
//! one [`Outcome`](crate::Outcome) to another that are applied only while
//! the outcome is a failure. [`Outcome::recover`](crate::Outcome::recover)
//! is the single building block; this module provides the policies built on
//! top of it:
//!
//! - [`repeat`]: retry one recovery function up to a fixed attempt limit
//! - [`chain`] / [`chain!`](macro@crate::chain): try recovery functions in
//!   order until one succeeds
//! - [`pause`], [`backoff`], [`pause_cancellable`]: waiting steps that
//!   space out attempts, shaped by a [`DelayPolicy`]
//! - [`repeat_observed`] / [`chain_observed`]: the same combinators with an
//!   injected diagnostics hook
//!
//! Combinators produce recovery functions themselves, so policies nest: a
//! bounded retry can be one link of a fallback chain, and a whole chain can
//! be retried.
//!
//! # Quick Start
//!
//! ```
//! use kintsugi::{capture, chain, Outcome};
//! use std::collections::HashMap;
//!
//! let store: HashMap<&str, &str> = [("backup.txt", "backup contents")].into();
//! let read = move |key: String| store.get(key.as_str()).copied().ok_or(key);
//!
//! // A recovery step that swaps the failing key for its backup.
//! let backups: HashMap<&str, &str> = [("main.txt", "backup.txt")].into();
//! let mut read_backup = capture(read.clone());
//! let use_backup = move |o: Outcome<&str, String>| {
//!     let key = o.unwrap_failure();
//!     match backups.get(key.as_str()) {
//!         Some(next) => read_backup(next.to_string()),
//!         None => Outcome::failure(key),
//!     }
//! };
//!
//! let mut policy = chain![use_backup];
//! let out = capture(read)("main.txt".to_string()).recover(&mut policy);
//!
//! assert_eq!(out, Outcome::Success("backup contents"));
//! ```
//!
//! # Failure semantics
//!
//! Combinators never raise. They only transform outcome values; a recovery
//! function that performs a fallible action must go through
//! [`capture`](crate::capture()) internally so its errors stay data. The one
//! blocking concern - a wait that gets cancelled - is converted into a
//! [`WaitInterrupted`] failure at the point of interruption.

mod combinators;
mod delay;
mod error;

pub use combinators::{
    chain, chain_observed, repeat, repeat_observed, Recovery, RecoveryEvent,
};
pub use delay::{backoff, pause, pause_cancellable, CancelToken, DelayPolicy, DelayStrategy};
pub use error::WaitInterrupted;
