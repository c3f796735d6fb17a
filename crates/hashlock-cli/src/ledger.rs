//! # Ledger Handle
//!
//! Opens the file-backed ledger every subcommand operates on, with an
//! event sink that prints emissions to stdout so an operator sees what a
//! relaying agent would consume.

use std::path::Path;

use hashlock_state::{EventError, EventSink, FileStore, HashTimelock};

/// Prints each emitted event as one line: `event <name> <payload>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), EventError> {
        println!("event {name} {}", String::from_utf8_lossy(payload));
        Ok(())
    }
}

/// Open the ledger document at `path` as a state machine.
pub fn open_ledger(path: &Path) -> HashTimelock<FileStore, StdoutSink> {
    HashTimelock::new(FileStore::new(path), StdoutSink)
}
