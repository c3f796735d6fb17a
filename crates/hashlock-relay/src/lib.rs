//! # hashlock-relay — Cross-Ledger Relaying Agents
//!
//! The protocol's ledgers never observe each other: consistency between
//! them is achieved only through external agents that watch one ledger's
//! events and submit operations to another. This crate provides reference
//! implementations of those agents.
//!
//! - [`ConfirmationRelay`] — harvests a disclosed pre-image from a
//!   confirmation event on one ledger and replays `confirm` onto another,
//!   completing the atomic hand-off.
//! - [`mirror_creation`] — copies a pending commitment onto a second
//!   ledger after its creation event is observed, so both sides hold the
//!   same hash before the secret is disclosed anywhere.
//! - [`TimeoutWatcher`] — the timelock half of the pattern: tracks
//!   creation events against a deadline and invalidates proposals whose
//!   secret was never disclosed in time.
//!
//! Trusted wall-clock time is unavailable to the core state machine, so
//! the timeout window lives here, with the agent that owns a clock.

pub mod relay;
pub mod watcher;

pub use relay::{mirror_creation, ConfirmationRelay, RelayError};
pub use watcher::TimeoutWatcher;
