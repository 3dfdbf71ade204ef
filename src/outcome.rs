//! The core success-or-failure outcome type
//!
//! `Outcome<S, F>` holds either a success payload or a failure payload, never
//! both and never neither. It is the value every other part of this crate
//! operates on: the [`capture`](crate::capture()) boundary produces
//! outcomes, and the [`recover`](crate::recover) combinators transform
//! them.
//!
//! Unlike `Result`, an `Outcome` is meant to keep flowing through a pipeline
//! after a failure: `report` lets you observe a failure without consuming it,
//! and `recover` applies a fallback strategy only when one is needed.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use kintsugi::Outcome;
//!
//! let good = Outcome::<_, String>::success(42);
//! let bad = Outcome::<i32, _>::failure("not found".to_string());
//!
//! assert!(good.is_success());
//! assert!(bad.is_failure());
//! ```
//!
//! ## Recovering from a failure
//!
//! ```
//! use kintsugi::Outcome;
//!
//! let out = Outcome::<i32, &str>::failure("missing")
//!     .recover(|_| Outcome::success(0));
//!
//! assert_eq!(out, Outcome::success(0));
//! ```
//!
//! ## Reporting without consuming
//!
//! ```
//! use kintsugi::Outcome;
//!
//! let mut seen = None;
//! let out = Outcome::<i32, &str>::failure("missing")
//!     .report(|f| seen = Some(f.to_string()));
//!
//! assert!(out.is_failure());
//! assert_eq!(seen.as_deref(), Some("missing"));
//! ```

/// A value that is either a `Success(S)` or a `Failure(F)`.
///
/// The discriminant makes the "both populated" and "neither populated"
/// states unrepresentable. Outcomes are immutable: every combinator consumes
/// its input and produces a new outcome (or returns the input unchanged),
/// so a pipeline is a chain of ownership transfers, never shared mutation.
///
/// # Type Parameters
///
/// * `S` - The type of the success payload
/// * `F` - The type of the failure payload
///
/// # Examples
///
/// ```
/// use kintsugi::Outcome;
///
/// fn parse(s: &str) -> Outcome<i32, String> {
///     Outcome::from_result(s.parse().map_err(|_| format!("bad input: {}", s)))
/// }
///
/// assert_eq!(parse("7"), Outcome::Success(7));
/// assert!(parse("seven").is_failure());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome<S, F> {
    /// The operation produced a value
    Success(S),
    /// The operation failed with an error payload
    Failure(F),
}

impl<S, F> Outcome<S, F> {
    // ========== Constructors ==========

    /// Create a success outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::<i32, String>::success(42);
    /// assert!(out.is_success());
    /// ```
    #[inline]
    pub fn success(value: S) -> Self {
        Outcome::Success(value)
    }

    /// Create a failure outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::<i32, &str>::failure("not found");
    /// assert!(out.is_failure());
    /// ```
    #[inline]
    pub fn failure(error: F) -> Self {
        Outcome::Failure(error)
    }

    /// Create an outcome from a `Result`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::from_result(Ok::<_, String>(42));
    /// assert_eq!(out, Outcome::Success(42));
    ///
    /// let out = Outcome::from_result(Err::<i32, _>("oops"));
    /// assert_eq!(out, Outcome::Failure("oops"));
    /// ```
    #[inline]
    pub fn from_result(result: Result<S, F>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }

    /// Convert this outcome into a `Result`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::<_, String>::success(42);
    /// assert_eq!(out.into_result(), Ok(42));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<S, F> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if this outcome is a success.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` if this outcome is a failure.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    // ========== Extractors ==========

    /// Extract the success payload, panicking on a failure.
    ///
    /// Calling this on a failure is a programmer error, not a recoverable
    /// condition; use [`recover`](Outcome::recover) or
    /// [`into_success`](Outcome::into_success) when failure is expected.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a `Failure`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::<_, String>::success(42);
    /// assert_eq!(out.unwrap_success(), 42);
    /// ```
    #[inline]
    pub fn unwrap_success(self) -> S {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => {
                panic!("called `Outcome::unwrap_success()` on a `Failure` value")
            }
        }
    }

    /// Extract the failure payload, panicking on a success.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a `Success`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::<i32, _>::failure("not found");
    /// assert_eq!(out.unwrap_failure(), "not found");
    /// ```
    #[inline]
    pub fn unwrap_failure(self) -> F {
        match self {
            Outcome::Success(_) => {
                panic!("called `Outcome::unwrap_failure()` on a `Success` value")
            }
            Outcome::Failure(error) => error,
        }
    }

    /// Extract the success payload with a custom panic message.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the outcome is a `Failure`.
    #[inline]
    pub fn expect_success(self, msg: &str) -> S {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => panic!("{}", msg),
        }
    }

    /// Extract the failure payload with a custom panic message.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the outcome is a `Success`.
    #[inline]
    pub fn expect_failure(self, msg: &str) -> F {
        match self {
            Outcome::Success(_) => panic!("{}", msg),
            Outcome::Failure(error) => error,
        }
    }

    /// Returns the success payload if present, consuming self.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// assert_eq!(Outcome::<_, &str>::success(42).into_success(), Some(42));
    /// assert_eq!(Outcome::<i32, _>::failure("e").into_success(), None);
    /// ```
    #[inline]
    pub fn into_success(self) -> Option<S> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Returns the failure payload if present, consuming self.
    #[inline]
    pub fn into_failure(self) -> Option<F> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Convert to `Outcome<&S, &F>`.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&S, &F> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    // ========== Transformations ==========

    /// Transform the success payload, passing failures through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::<_, String>::success(21);
    /// assert_eq!(out.map(|x| x * 2), Outcome::Success(42));
    /// ```
    #[inline]
    pub fn map<S2, Op>(self, op: Op) -> Outcome<S2, F>
    where
        Op: FnOnce(S) -> S2,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(op(value)),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transform the failure payload, passing successes through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::<i32, _>::failure("io");
    /// assert_eq!(out.map_failure(|e| e.len()), Outcome::Failure(2));
    /// ```
    #[inline]
    pub fn map_failure<F2, Op>(self, op: Op) -> Outcome<S, F2>
    where
        Op: FnOnce(F) -> F2,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(op(error)),
        }
    }

    /// Chain a computation on the success payload.
    ///
    /// The dual of [`recover`](Outcome::recover): `op` runs only on success,
    /// and failures pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::<_, String>::success(21)
    ///     .and_then(|x| Outcome::success(x * 2));
    /// assert_eq!(out, Outcome::Success(42));
    /// ```
    #[inline]
    pub fn and_then<S2, Op>(self, op: Op) -> Outcome<S2, F>
    where
        Op: FnOnce(S) -> Outcome<S2, F>,
    {
        match self {
            Outcome::Success(value) => op(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    // ========== Failure Handling ==========

    /// Invoke a side effect with the failure payload, if any.
    ///
    /// The outcome is returned unchanged either way, so `report` slots into
    /// a fluent pipeline without altering the value. On a success the
    /// callback is never invoked.
    ///
    /// Failures that are filtered out of a pipeline without being reported
    /// are silently dropped; call `report` before filtering when failure
    /// visibility matters.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let mut log = Vec::new();
    /// let out = Outcome::<i32, &str>::failure("b.txt")
    ///     .report(|f| log.push(f.to_string()));
    ///
    /// assert!(out.is_failure());
    /// assert_eq!(log, vec!["b.txt"]);
    /// ```
    #[inline]
    pub fn report<Op>(self, op: Op) -> Self
    where
        Op: FnOnce(&F),
    {
        if let Outcome::Failure(error) = &self {
            op(error);
        }
        self
    }

    /// Apply a recovery function if this outcome is a failure.
    ///
    /// On a success, `op` is never invoked and the outcome is returned
    /// unchanged. This is the single building block every recovery policy in
    /// [`crate::recover`] is expressed through: a recovery function takes
    /// the failed outcome (so it can read retry parameters out of the
    /// failure payload) and produces a new outcome, which may be a success
    /// or a different failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let out = Outcome::<i32, &str>::failure("missing")
    ///     .recover(|o| {
    ///         assert_eq!(o.unwrap_failure(), "missing");
    ///         Outcome::success(0)
    ///     });
    /// assert_eq!(out, Outcome::Success(0));
    ///
    /// // Never invoked on success:
    /// let out = Outcome::<i32, &str>::success(1)
    ///     .recover(|_| unreachable!());
    /// assert_eq!(out, Outcome::Success(1));
    /// ```
    #[inline]
    pub fn recover<Op>(self, op: Op) -> Self
    where
        Op: FnOnce(Self) -> Self,
    {
        if self.is_failure() {
            op(self)
        } else {
            self
        }
    }

    // ========== Iterator Support ==========

    /// Returns an iterator over the success payload (0 or 1 elements).
    ///
    /// # Examples
    ///
    /// ```
    /// use kintsugi::Outcome;
    ///
    /// let good = Outcome::<_, &str>::success(42);
    /// assert_eq!(good.iter().collect::<Vec<_>>(), vec![&42]);
    ///
    /// let bad = Outcome::<i32, &str>::failure("e");
    /// assert!(bad.iter().next().is_none());
    /// ```
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.as_ref().into_success().into_iter()
    }
}

// ========== Trait Implementations ==========

impl<S, F> From<Result<S, F>> for Outcome<S, F> {
    fn from(result: Result<S, F>) -> Self {
        Outcome::from_result(result)
    }
}

impl<S, F> From<Outcome<S, F>> for Result<S, F> {
    fn from(outcome: Outcome<S, F>) -> Self {
        outcome.into_result()
    }
}

impl<S, F> IntoIterator for Outcome<S, F> {
    type Item = S;
    type IntoIter = std::option::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_success().into_iter()
    }
}

impl<'a, S, F> IntoIterator for &'a Outcome<S, F> {
    type Item = &'a S;
    type IntoIter = std::option::IntoIter<&'a S>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_ref().into_success().into_iter()
    }
}

// ========== Collection Utilities ==========

/// Partition an iterator of outcomes into successes and failures.
///
/// # Examples
///
/// ```
/// use kintsugi::outcome::{partition, Outcome};
///
/// let items = vec![
///     Outcome::success(1),
///     Outcome::failure("a"),
///     Outcome::success(2),
/// ];
///
/// let (good, bad) = partition(items);
/// assert_eq!(good, vec![1, 2]);
/// assert_eq!(bad, vec!["a"]);
/// ```
pub fn partition<S, F, I>(iter: I) -> (Vec<S>, Vec<F>)
where
    I: IntoIterator<Item = Outcome<S, F>>,
{
    let mut good = Vec::new();
    let mut bad = Vec::new();

    for item in iter {
        match item {
            Outcome::Success(value) => good.push(value),
            Outcome::Failure(error) => bad.push(error),
        }
    }

    (good, bad)
}

/// Keep only the success payloads from an iterator of outcomes.
///
/// This is the terminal "filter then unwrap" step of a pipeline: failures
/// are dropped, so report them first if they should be visible.
///
/// # Examples
///
/// ```
/// use kintsugi::outcome::{successes, Outcome};
///
/// let items = vec![Outcome::success(1), Outcome::failure("a")];
/// let good: Vec<_> = successes(items).collect();
/// assert_eq!(good, vec![1]);
/// ```
pub fn successes<S, F, I>(iter: I) -> impl Iterator<Item = S>
where
    I: IntoIterator<Item = Outcome<S, F>>,
{
    iter.into_iter().filter_map(|o| o.into_success())
}

/// Keep only the failure payloads from an iterator of outcomes.
///
/// # Examples
///
/// ```
/// use kintsugi::outcome::{failures, Outcome};
///
/// let items = vec![Outcome::success(1), Outcome::failure("a")];
/// let bad: Vec<_> = failures(items).collect();
/// assert_eq!(bad, vec!["a"]);
/// ```
pub fn failures<S, F, I>(iter: I) -> impl Iterator<Item = F>
where
    I: IntoIterator<Item = Outcome<S, F>>,
{
    iter.into_iter().filter_map(|o| o.into_failure())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(Outcome::<i32, &str>::success(42).is_success());
        assert!(Outcome::<i32, &str>::failure("e").is_failure());
    }

    #[test]
    fn test_predicates_exclusive() {
        let good: Outcome<i32, &str> = Outcome::success(42);
        let bad: Outcome<i32, &str> = Outcome::failure("e");

        assert!(good.is_success());
        assert!(!good.is_failure());
        assert!(!bad.is_success());
        assert!(bad.is_failure());
    }

    #[test]
    fn test_unwrap_success() {
        let good: Outcome<i32, &str> = Outcome::success(42);
        assert_eq!(good.unwrap_success(), 42);
    }

    #[test]
    #[should_panic(expected = "called `Outcome::unwrap_success()` on a `Failure` value")]
    fn test_unwrap_success_panics_on_failure() {
        let bad: Outcome<i32, &str> = Outcome::failure("e");
        bad.unwrap_success();
    }

    #[test]
    fn test_unwrap_failure() {
        let bad: Outcome<i32, &str> = Outcome::failure("e");
        assert_eq!(bad.unwrap_failure(), "e");
    }

    #[test]
    #[should_panic(expected = "called `Outcome::unwrap_failure()` on a `Success` value")]
    fn test_unwrap_failure_panics_on_success() {
        let good: Outcome<i32, &str> = Outcome::success(42);
        good.unwrap_failure();
    }

    #[test]
    #[should_panic(expected = "wanted the success")]
    fn test_expect_success_panics_with_message() {
        let bad: Outcome<i32, &str> = Outcome::failure("e");
        bad.expect_success("wanted the success");
    }

    #[test]
    fn test_report_invoked_once_on_failure() {
        let mut calls = 0;
        let bad: Outcome<i32, &str> = Outcome::failure("e");
        let out = bad.clone().report(|_| calls += 1);

        assert_eq!(calls, 1);
        assert_eq!(out, bad);
    }

    #[test]
    fn test_report_not_invoked_on_success() {
        let mut calls = 0;
        let good: Outcome<i32, &str> = Outcome::success(42);
        let out = good.clone().report(|_| calls += 1);

        assert_eq!(calls, 0);
        assert_eq!(out, good);
    }

    #[test]
    fn test_recover_applies_on_failure() {
        let bad: Outcome<i32, &str> = Outcome::failure("e");
        let out = bad.recover(|o| {
            assert_eq!(o.unwrap_failure(), "e");
            Outcome::success(0)
        });
        assert_eq!(out, Outcome::success(0));
    }

    #[test]
    fn test_recover_skipped_on_success() {
        let mut invoked = false;
        let good: Outcome<i32, &str> = Outcome::success(42);
        let out = good.recover(|o| {
            invoked = true;
            o
        });

        assert!(!invoked);
        assert_eq!(out, Outcome::success(42));
    }

    #[test]
    fn test_recover_may_produce_new_failure() {
        let bad: Outcome<i32, &str> = Outcome::failure("first");
        let out = bad.recover(|_| Outcome::failure("second"));
        assert_eq!(out, Outcome::failure("second"));
    }

    #[test]
    fn test_map_and_map_failure() {
        let good: Outcome<i32, &str> = Outcome::success(21);
        assert_eq!(good.map(|x| x * 2), Outcome::success(42));

        let bad: Outcome<i32, &str> = Outcome::failure("io");
        assert_eq!(bad.map_failure(|e| e.len()), Outcome::failure(2));
    }

    #[test]
    fn test_and_then() {
        let good: Outcome<i32, &str> = Outcome::success(21);
        assert_eq!(
            good.and_then(|x| Outcome::success(x * 2)),
            Outcome::success(42)
        );

        let bad: Outcome<i32, &str> = Outcome::failure("e");
        assert_eq!(
            bad.and_then(|x| Outcome::success(x * 2)),
            Outcome::failure("e")
        );
    }

    #[test]
    fn test_result_conversions() {
        let out: Outcome<i32, &str> = Ok(42).into();
        assert_eq!(out, Outcome::success(42));

        let result: Result<i32, &str> = Outcome::failure("e").into();
        assert_eq!(result, Err("e"));
    }

    #[test]
    fn test_iteration() {
        let good: Outcome<i32, &str> = Outcome::success(42);
        assert_eq!(good.into_iter().collect::<Vec<_>>(), vec![42]);

        let bad: Outcome<i32, &str> = Outcome::failure("e");
        assert!(bad.into_iter().next().is_none());
    }

    #[test]
    fn test_partition() {
        let items = vec![
            Outcome::success(1),
            Outcome::failure("a"),
            Outcome::success(2),
            Outcome::failure("b"),
        ];

        let (good, bad) = partition(items);
        assert_eq!(good, vec![1, 2]);
        assert_eq!(bad, vec!["a", "b"]);
    }

    #[test]
    fn test_successes_and_failures() {
        let items = || {
            vec![
                Outcome::success(1),
                Outcome::failure("a"),
                Outcome::success(2),
            ]
        };

        assert_eq!(successes(items()).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(failures(items()).collect::<Vec<_>>(), vec!["a"]);
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_serialize_roundtrip() {
        let good: Outcome<i32, String> = Outcome::success(42);
        let json = serde_json::to_string(&good).unwrap();
        let back: Outcome<i32, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, good);

        let bad: Outcome<i32, String> = Outcome::failure("nope".to_string());
        let json = serde_json::to_string(&bad).unwrap();
        let back: Outcome<i32, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bad);
    }
}
