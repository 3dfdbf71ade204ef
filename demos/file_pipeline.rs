//! File Pipeline Example
//!
//! The motivating scenario: read a batch of files where some are missing,
//! with a recovery pipeline that retries, waits, and falls back to backup
//! files before giving up. Unrecovered failures are reported, then only
//! successful contents flow to the output.
//!
//! Creates its working files in a temp directory, so some reads fail by
//! construction.

use kintsugi::chain;
use kintsugi::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Read failure carrying the file name, so recovery steps can decide what
/// to try next.
#[derive(Debug)]
struct ReadError {
    name: String,
    source: io::Error,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.source)
    }
}

fn read_file(dir: &Path, name: &str) -> Result<String, ReadError> {
    fs::read_to_string(dir.join(name)).map_err(|source| ReadError {
        name: name.to_string(),
        source,
    })
}

fn main() -> io::Result<()> {
    let dir = std::env::temp_dir().join("kintsugi-file-pipeline");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("a.txt"), "alpha line 1\nalpha line 2\n")?;
    fs::write(dir.join("recover.txt"), "recovered contents\n")?;
    // b.txt, c.txt, and e.txt stay missing on purpose.
    for missing in ["b.txt", "c.txt", "e.txt"] {
        let _ = fs::remove_file(dir.join(missing));
    }

    // b.txt falls back to e.txt, which itself falls back to recover.txt -
    // the bounded repeat below follows the whole chain.
    let backups: HashMap<&str, &str> = [("b.txt", "e.txt"), ("e.txt", "recover.txt")].into();

    let retry = {
        let dir = dir.clone();
        move |o: Outcome<String, ReadError>| {
            let error = o.unwrap_failure();
            println!("*** retry: re-reading {}", error.name);
            let out = capture(|name: &str| read_file(&dir, name))(error.name.as_str());
            out
        }
    };

    let use_backup = {
        let dir = dir.clone();
        move |o: Outcome<String, ReadError>| {
            let error = o.unwrap_failure();
            match backups.get(error.name.as_str()) {
                Some(next) => {
                    println!("*** use_backup: trying {} in place of {}", next, error.name);
                    capture(|name: &str| read_file(&dir, name))(*next)
                }
                None => {
                    println!("*** use_backup: no backup for {}", error.name);
                    Outcome::failure(error)
                }
            }
        }
    };

    let mut policy = chain![
        retry,
        pause(Duration::from_millis(300)),
        repeat(use_backup, 3),
    ];

    let read = {
        let dir = dir.clone();
        move |name: &str| read_file(&dir, name)
    };

    for contents in successes(
        ["a.txt", "b.txt", "c.txt"]
            .into_iter()
            .map(capture(read))
            .map(|o| o.recover(&mut policy))
            .map(|o| o.report(|f| println!("*** failed for good: {}", f))),
    ) {
        print!("{}", contents);
        println!("--------------------------");
    }

    Ok(())
}
