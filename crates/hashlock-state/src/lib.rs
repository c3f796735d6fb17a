//! # hashlock-state — Proposal Lifecycle State Machine
//!
//! Owns the lifecycle of hash-timelock commitment records: creation,
//! confirmation against a disclosed pre-image, and invalidation. Emits
//! notification events as an observable side effect of successful
//! transitions and delegates persistence to an external keyed store.
//!
//! ## State Machine
//!
//! ```text
//! ∅ ──create──▶ PENDING ──confirm(valid pre-image)──▶ CONFIRMED (terminal)
//!                  │
//!             invalidate
//!                  │
//!                  ▼
//!                  ∅ (terminal, re-creatable)
//! ```
//!
//! `CONFIRMED` never reverts and is never deleted by this protocol.
//!
//! ## Concurrency Model
//!
//! Every operation is a single synchronous read-then-write against one
//! ledger's store; the machine holds no locks of its own. Serialization of
//! racing operations on the same key is the store's obligation — a store
//! that lets two conflicting writers both commit will lose updates.
//!
//! ## Collaborators
//!
//! - [`ProposalStore`] — durable keyed storage (get/put/delete).
//! - [`EventSink`] — best-effort notification transport.
//! - [`TransitionGuard`] — pluggable pre-transition veto hooks.

pub mod events;
pub mod guard;
pub mod machine;
pub mod store;

pub use events::{EmittedEvent, EventError, EventSink, NullSink, RecordingSink};
pub use guard::{GuardVeto, HandlerAllowList, Operation, TransitionContext, TransitionGuard};
pub use machine::HashTimelock;
pub use store::{FileStore, MemoryStore, ProposalStore, StoreError};
