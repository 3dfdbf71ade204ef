//! Error types for waiting recovery steps.

use std::time::Duration;

/// Error produced when a cancellable wait is interrupted.
///
/// A waiting recovery step that is cancelled mid-wait does not raise; it
/// converts the interruption into a failure-discriminated
/// [`Outcome`](crate::Outcome) carrying this value, so the surrounding
/// pipeline can continue its fallback chain or report it like any other
/// failure.
///
/// # Examples
///
/// ```
/// use kintsugi::recover::{pause_cancellable, CancelToken, WaitInterrupted};
/// use kintsugi::Outcome;
/// use std::time::Duration;
///
/// let token = CancelToken::new();
/// token.cancel();
///
/// let mut wait = pause_cancellable::<i32, WaitInterrupted>(
///     Duration::from_secs(60),
///     token,
/// );
///
/// let out = wait(Outcome::failure(WaitInterrupted::new(Duration::ZERO)));
/// assert_eq!(
///     out.unwrap_failure().requested,
///     Duration::from_secs(60),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitInterrupted {
    /// The wait duration that was requested but not completed.
    pub requested: Duration,
}

impl WaitInterrupted {
    /// Create a new WaitInterrupted error.
    pub fn new(requested: Duration) -> Self {
        Self { requested }
    }
}

impl std::fmt::Display for WaitInterrupted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wait interrupted before {:?} elapsed", self.requested)
    }
}

impl std::error::Error for WaitInterrupted {}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = WaitInterrupted::new(Duration::from_millis(250));
        let display = format!("{}", err);
        assert!(display.contains("wait interrupted"));
        assert!(display.contains("250ms"));
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&WaitInterrupted::new(Duration::ZERO));
    }
}
