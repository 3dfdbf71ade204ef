//! The adapter boundary where a raised error becomes data
//!
//! [`capture`] turns a fallible operation (`A -> Result<S, E>`) into a total
//! function producing an [`Outcome`]. This is the only place in a pipeline
//! where an error converts into a failure payload; from here on, failures
//! are only ever transformed, inspected, or reported as values.
//!
//! # Examples
//!
//! ```
//! use kintsugi::capture;
//!
//! let mut read = capture(|n: i32| {
//!     if n >= 0 {
//!         Ok(n * 2)
//!     } else {
//!         Err(format!("negative input: {}", n))
//!     }
//! });
//!
//! assert!(read(21).is_success());
//! assert!(read(-1).is_failure());
//! ```

use crate::Outcome;

/// Wrap a fallible operation into one that returns an [`Outcome`].
///
/// The returned function is total: a normal return becomes
/// `Outcome::Success`, an error return becomes `Outcome::Failure` carrying
/// the error verbatim. The operation is `FnMut` so the adapter can be used
/// repeatedly, e.g. mapped over a collection of inputs.
///
/// # Examples
///
/// ```
/// use kintsugi::{capture, Outcome};
///
/// let mut parse = capture(|s: &str| s.parse::<i32>());
///
/// assert_eq!(parse("42").into_success(), Some(42));
/// assert!(parse("forty-two").is_failure());
/// ```
pub fn capture<A, S, E, Op>(mut op: Op) -> impl FnMut(A) -> Outcome<S, E>
where
    Op: FnMut(A) -> Result<S, E>,
{
    move |input| Outcome::from_result(op(input))
}

/// Like [`capture`], mapping the error into the pipeline's failure type.
///
/// Useful when a pipeline carries a single failure payload type and the
/// wrapped operation reports a different error.
///
/// # Examples
///
/// ```
/// use kintsugi::capture_map;
///
/// let mut parse = capture_map(
///     |s: &str| s.parse::<i32>(),
///     |e| format!("parse failed: {}", e),
/// );
///
/// let out = parse("oops");
/// assert!(out.unwrap_failure().starts_with("parse failed"));
/// ```
pub fn capture_map<A, S, E, F, Op, Map>(
    mut op: Op,
    map: Map,
) -> impl FnMut(A) -> Outcome<S, F>
where
    Op: FnMut(A) -> Result<S, E>,
    Map: Fn(E) -> F,
{
    move |input| Outcome::from_result(op(input).map_err(&map))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_success() {
        let mut op = capture(|n: u32| Ok::<_, String>(n + 1));
        assert_eq!(op(1), Outcome::success(2));
    }

    #[test]
    fn test_capture_failure_carries_error_verbatim() {
        let mut op = capture(|_: u32| Err::<u32, _>("broke"));
        assert_eq!(op(1), Outcome::failure("broke"));
    }

    #[test]
    fn test_capture_is_reusable() {
        let mut flips = 0;
        let mut op = capture(move |_: ()| {
            flips += 1;
            if flips % 2 == 0 {
                Ok(flips)
            } else {
                Err("odd call")
            }
        });

        assert!(op(()).is_failure());
        assert!(op(()).is_success());
        assert!(op(()).is_failure());
    }

    #[test]
    fn test_capture_map_converts_error() {
        let mut op = capture_map(|s: &str| s.parse::<i32>(), |_| "bad number");
        assert_eq!(op("x"), Outcome::failure("bad number"));
        assert_eq!(op("3"), Outcome::success(3));
    }
}
