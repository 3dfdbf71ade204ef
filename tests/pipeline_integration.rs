//! End-to-end pipeline tests: capture a fallible read, compose recovery
//! policies around it, and inspect what comes out the far end.

use kintsugi::prelude::*;
use kintsugi::testing::FlakySource;
use kintsugi::{assert_failure, assert_success, chain};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// A tiny in-memory resource store standing in for the filesystem.
#[derive(Clone)]
struct Store {
    resources: HashMap<&'static str, &'static str>,
}

impl Store {
    fn demo() -> Self {
        Self {
            resources: [
                ("good.txt", "good contents"),
                ("backup.txt", "backup contents"),
            ]
            .into(),
        }
    }

    fn read(&self, key: &str) -> Result<String, ReadError> {
        self.resources
            .get(key)
            .map(|s| s.to_string())
            .ok_or_else(|| ReadError {
                key: key.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ReadError {
    key: String,
}

#[test]
fn missing_resource_is_captured_as_failure() {
    let store = Store::demo();
    let mut read = capture(move |key: &str| store.read(key));

    let out = read("missing.txt");

    match out {
        Outcome::Failure(e) => assert_eq!(e.key, "missing.txt"),
        Outcome::Success(v) => panic!("expected failure, got {:?}", v),
    }
}

#[test]
fn readable_resource_never_triggers_recovery() {
    let store = Store::demo();
    let mut read = capture(move |key: &str| store.read(key));

    let sentinel = Rc::new(RefCell::new(false));
    let recovery = {
        let sentinel = sentinel.clone();
        move |o: Outcome<String, ReadError>| {
            *sentinel.borrow_mut() = true;
            o
        }
    };

    let out = read("good.txt").recover(recovery);

    assert_eq!(out, Outcome::Success("good contents".to_string()));
    assert!(!*sentinel.borrow());
}

#[test]
fn backup_chain_recovers_missing_resource() {
    let store = Store::demo();
    let backups: HashMap<&str, &str> = [("missing.txt", "backup.txt")].into();

    let use_backup = {
        let store = store.clone();
        move |o: Outcome<String, ReadError>| {
            let error = o.unwrap_failure();
            match backups.get(error.key.as_str()) {
                Some(next) => capture(|key: &str| store.read(key))(*next),
                None => Outcome::failure(error),
            }
        }
    };

    let retry = {
        let store = store.clone();
        move |o: Outcome<String, ReadError>| {
            let error = o.unwrap_failure();
            let out = capture(|key: &str| store.read(key))(error.key.as_str());
            out
        }
    };

    let mut policy = chain![use_backup, retry];
    let mut read = capture(move |key: &str| store.read(key));
    let out = read("missing.txt").recover(&mut policy);

    assert_eq!(out, Outcome::Success("backup contents".to_string()));
}

#[test]
fn exhausted_repeat_returns_last_failure() {
    let calls = Rc::new(RefCell::new(0u32));
    let retry = {
        let calls = calls.clone();
        move |o: Outcome<String, ReadError>| {
            *calls.borrow_mut() += 1;
            o
        }
    };

    let mut policy = repeat(retry, 3);
    let out = policy(Outcome::failure(ReadError {
        key: "missing.txt".to_string(),
    }));

    assert_failure!(&out);
    assert_eq!(out.unwrap_failure().key, "missing.txt");
    assert_eq!(*calls.borrow(), 3);
}

#[test]
fn transient_failures_recover_with_wait_between_attempts() {
    let source = Rc::new(RefCell::new(FlakySource::new(
        2,
        "warmed up".to_string(),
        ReadError {
            key: "flaky.txt".to_string(),
        },
    )));
    let retry = {
        let source = source.clone();
        move |_: Outcome<String, ReadError>| source.borrow_mut().produce()
    };

    let mut policy = chain![
        retry.clone(),
        pause(Duration::from_millis(1)),
        retry,
    ];

    let first = source.borrow_mut().produce();
    let out = first.recover(&mut policy);

    assert_eq!(out, Outcome::Success("warmed up".to_string()));
    assert_eq!(source.borrow().calls(), 3);
}

#[test]
fn pipeline_reports_then_filters_unrecovered_failures() {
    let store = Store::demo();
    let backups: HashMap<&str, &str> = [("missing.txt", "backup.txt")].into();

    let use_backup = {
        let store = store.clone();
        move |o: Outcome<String, ReadError>| {
            let error = o.unwrap_failure();
            match backups.get(error.key.as_str()) {
                Some(next) => capture(|key: &str| store.read(key))(*next),
                None => Outcome::failure(error),
            }
        }
    };

    let mut policy = chain![use_backup];
    let reported = Rc::new(RefCell::new(Vec::new()));

    let read = {
        let store = store.clone();
        move |key: &str| store.read(key)
    };

    let good: Vec<_> = successes(
        ["good.txt", "missing.txt", "gone.txt"]
            .into_iter()
            .map(capture(read))
            .map(|o| o.recover(&mut policy))
            .map(|o| o.report(|f| reported.borrow_mut().push(f.key.clone()))),
    )
    .collect();

    assert_eq!(good, vec!["good contents", "backup contents"]);
    assert_eq!(*reported.borrow(), vec!["gone.txt".to_string()]);
}

#[test]
fn assert_macros_cover_both_outcomes() {
    let store = Store::demo();
    let mut read = capture(move |key: &str| store.read(key));

    assert_success!(read("good.txt"));
    assert_failure!(read("gone.txt"));
}
