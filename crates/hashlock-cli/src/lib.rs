//! # hashlock-cli — Operational CLI for the Hashlock Stack
//!
//! Thin glue over [`hashlock_state`]: each subcommand opens the
//! file-backed ledger named by `--ledger`, runs one operation, and prints
//! any emitted events to stdout. No protocol logic lives here.

pub mod confirm;
pub mod create;
pub mod invalidate;
pub mod ledger;
pub mod show;

pub use ledger::{open_ledger, StdoutSink};
