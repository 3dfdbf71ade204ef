//! Tracing Demo
//!
//! Shows the trace events the combinators emit when the `tracing` feature
//! is enabled. Run with:
//!
//! ```text
//! cargo run --example tracing_demo --features tracing
//! ```

use kintsugi::chain;
use kintsugi::prelude::*;
use kintsugi::testing::FlakySource;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    tracing::info!("starting recovery pipeline");

    let source = Rc::new(RefCell::new(FlakySource::new(
        3,
        "fresh data".to_string(),
        "connection refused".to_string(),
    )));
    let retry = {
        let source = source.clone();
        move |_: Outcome<String, String>| source.borrow_mut().produce()
    };

    let mut policy = chain![
        retry.clone(),
        pause(Duration::from_millis(20)),
        repeat(retry, 5),
    ];

    let first = source.borrow_mut().produce();
    let out = first.recover(&mut policy);

    tracing::info!(attempts = source.borrow().calls(), "pipeline finished");
    println!("result: {:?}", out);
}
