//! Terminal progress output.

use std::path::Path;

use log::debug;

use sprout::{
    Entry,
    materialize::{CreationFailure, Reporter},
};

/// Prints one confirmation line per created entry to stdout and skipped
/// entries to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

fn kind(entry: &Entry) -> &'static str {
    if entry.is_directory() {
        "directory"
    } else {
        "file"
    }
}

impl Reporter for ConsoleReporter {
    fn created(&mut self, entry: &Entry, path: &Path) {
        println!("Created {}: {}", kind(entry), path.display());
    }

    fn existing(&mut self, entry: &Entry, path: &Path) {
        debug!(path = path.display().to_string(), kind = kind(entry); "Left existing entry alone");
    }

    fn planned(&mut self, entry: &Entry, path: &Path) {
        println!("Would create {}: {}", kind(entry), path.display());
    }

    fn failed(&mut self, _entry: &Entry, failure: &CreationFailure) {
        eprintln!("Error: {failure}");
    }
}
