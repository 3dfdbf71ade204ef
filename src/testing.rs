//! Testing utilities for outcome pipelines
//!
//! This module provides assertion macros for [`Outcome`] values and a
//! deterministic flaky operation for exercising retry policies.
//!
//! # Examples
//!
//! ```
//! use kintsugi::{assert_failure, assert_success, Outcome};
//!
//! let good = Outcome::<_, String>::success(42);
//! assert_success!(good);
//!
//! let bad = Outcome::<i32, _>::failure("error".to_string());
//! assert_failure!(bad);
//! ```

use crate::Outcome;

/// A deterministic flaky operation: fails a fixed number of times, then
/// succeeds forever after.
///
/// Useful for testing retry policies without real I/O. The invocation count
/// is observable, so a test can assert exactly how many attempts a policy
/// made.
///
/// # Examples
///
/// ```
/// use kintsugi::testing::FlakySource;
///
/// let mut source = FlakySource::new(2, "payload", "transient");
///
/// assert!(source.produce().is_failure());
/// assert!(source.produce().is_failure());
/// assert!(source.produce().is_success());
/// assert_eq!(source.calls(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct FlakySource<S, F> {
    failures: u32,
    calls: u32,
    success: S,
    failure: F,
}

impl<S: Clone, F: Clone> FlakySource<S, F> {
    /// Create a source that fails `failures` times before succeeding.
    pub fn new(failures: u32, success: S, failure: F) -> Self {
        Self {
            failures,
            calls: 0,
            success,
            failure,
        }
    }

    /// Run the operation once, producing the next outcome.
    pub fn produce(&mut self) -> Outcome<S, F> {
        self.calls += 1;
        if self.calls > self.failures {
            Outcome::success(self.success.clone())
        } else {
            Outcome::failure(self.failure.clone())
        }
    }

    /// Number of times the operation has run.
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

/// Assert that an outcome is a success.
///
/// Panics with the failure payload if the outcome is a `Failure`.
///
/// # Examples
///
/// ```
/// use kintsugi::{assert_success, Outcome};
///
/// let out = Outcome::<_, String>::success(42);
/// assert_success!(out);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Success(_) => {}
            $crate::Outcome::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that an outcome is a failure.
///
/// Panics with the success payload if the outcome is a `Success`.
///
/// # Examples
///
/// ```
/// use kintsugi::{assert_failure, Outcome};
///
/// let out = Outcome::<i32, _>::failure("error");
/// assert_failure!(out);
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Failure(_) => {}
            $crate::Outcome::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flaky_source_schedule() {
        let mut source = FlakySource::new(1, 7, "nope");

        assert_eq!(source.produce(), Outcome::failure("nope"));
        assert_eq!(source.produce(), Outcome::success(7));
        assert_eq!(source.produce(), Outcome::success(7));
        assert_eq!(source.calls(), 3);
    }

    #[test]
    fn test_flaky_source_zero_failures() {
        let mut source = FlakySource::new(0, (), "nope");
        assert!(source.produce().is_success());
    }

    #[test]
    fn test_assert_macros_pass() {
        assert_success!(Outcome::<i32, String>::success(1));
        assert_failure!(Outcome::<i32, String>::failure("e".to_string()));
    }

    #[test]
    #[should_panic(expected = "Expected Success")]
    fn test_assert_success_panics_on_failure() {
        assert_success!(Outcome::<i32, &str>::failure("e"));
    }

    #[test]
    #[should_panic(expected = "Expected Failure")]
    fn test_assert_failure_panics_on_success() {
        assert_failure!(Outcome::<i32, &str>::success(1));
    }
}
