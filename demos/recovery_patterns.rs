//! Recovery Patterns Example
//!
//! Demonstrates the recovery combinators one at a time:
//! - Bounded retry with `repeat`
//! - Ordered fallback with `chain!`
//! - Spacing attempts out with `pause` and `backoff`
//! - Observing recovery attempts with hooks
//! - Interrupting a wait with a `CancelToken`

use kintsugi::chain;
use kintsugi::prelude::*;
use kintsugi::testing::FlakySource;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// ==================== Bounded Retry ====================

/// Example 1: retry a transiently failing operation up to a limit.
fn example_bounded_retry() {
    println!("\n=== Example 1: Bounded Retry ===");

    let source = Rc::new(RefCell::new(FlakySource::new(
        2,
        "fresh data".to_string(),
        "connection refused".to_string(),
    )));
    let retry = {
        let source = source.clone();
        move |_: Outcome<String, String>| source.borrow_mut().produce()
    };

    let mut policy = repeat(retry, 5);
    let first = source.borrow_mut().produce();
    let out = first.recover(&mut policy);

    println!(
        "result after {} attempts: {:?}",
        source.borrow().calls(),
        out
    );
}

// ==================== Ordered Fallback ====================

/// Example 2: try distinct strategies in order until one succeeds.
fn example_fallback_chain() {
    println!("\n=== Example 2: Ordered Fallback ===");

    let from_cache = |o: Outcome<String, String>| {
        println!("  cache: miss");
        o
    };
    let from_replica = |_: Outcome<String, String>| {
        println!("  replica: hit");
        Outcome::success("replica data".to_string())
    };
    let from_origin = |_: Outcome<String, String>| {
        println!("  origin: (never reached)");
        Outcome::success("origin data".to_string())
    };

    let mut policy = chain![from_cache, from_replica, from_origin];
    let out = policy(Outcome::failure("primary down".to_string()));

    println!("result: {:?}", out);
}

// ==================== Delay Policies ====================

/// Example 3: how the delay strategies scale per attempt.
fn example_delay_policies() {
    println!("\n=== Example 3: Delay Policies ===");

    let policies = [
        ("constant", DelayPolicy::constant(Duration::from_millis(100))),
        ("linear", DelayPolicy::linear(Duration::from_millis(100))),
        (
            "exponential",
            DelayPolicy::exponential(Duration::from_millis(100)),
        ),
        (
            "fibonacci",
            DelayPolicy::fibonacci(Duration::from_millis(100)),
        ),
    ];

    for (name, policy) in policies {
        let delays: Vec<_> = (0..5).map(|n| policy.delay_for_attempt(n)).collect();
        println!("{:>12}: {:?}", name, delays);
    }

    // A backoff step carries its own attempt counter.
    let source = Rc::new(RefCell::new(FlakySource::new(
        2,
        "ready".to_string(),
        "not yet".to_string(),
    )));
    let retry = {
        let source = source.clone();
        move |_: Outcome<String, String>| source.borrow_mut().produce()
    };

    let mut policy = repeat(
        chain![
            backoff(DelayPolicy::exponential(Duration::from_millis(10))),
            retry,
        ],
        5,
    );
    let first = source.borrow_mut().produce();
    println!("with backoff: {:?}", first.recover(&mut policy));
}

// ==================== Observed Recovery ====================

/// Example 4: watch recovery attempts through an injected hook.
fn example_observed() {
    println!("\n=== Example 4: Observed Recovery ===");

    let stuck = |o: Outcome<String, String>| o;
    let mut policy = repeat_observed(stuck, 3, |event: &RecoveryEvent<'_, String>| {
        println!(
            "  attempt {} ({} left): {}",
            event.attempt, event.remaining, event.error
        );
    });

    let out = policy(Outcome::failure("disk full".to_string()));
    println!("result: {:?}", out);
}

// ==================== Cancellation ====================

/// Example 5: a wait interrupted from another thread becomes a failure
/// outcome, and the next fallback step still runs.
fn example_cancellation() {
    println!("\n=== Example 5: Cancellation ===");

    let token = CancelToken::new();
    let handle = token.clone();
    let canceller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        println!("  cancelling the wait");
        handle.cancel();
    });

    let rescue = |o: Outcome<String, WaitInterrupted>| {
        println!("  rescue saw: {}", o.unwrap_failure());
        Outcome::success("fallback data".to_string())
    };

    let mut policy = chain![
        pause_cancellable(Duration::from_secs(3600), token),
        rescue,
    ];

    let out = policy(Outcome::failure(WaitInterrupted::new(Duration::ZERO)));
    canceller.join().expect("canceller thread panicked");

    println!("result: {:?}", out);
}

fn main() {
    example_bounded_retry();
    example_fallback_chain();
    example_delay_policies();
    example_observed();
    example_cancellation();
}
