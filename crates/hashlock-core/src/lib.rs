//! # hashlock-core — Foundational Types for the Hashlock Stack
//!
//! This crate is the bedrock of the Hashlock Stack. It defines the record
//! and event schemas of the hash-timelock commitment protocol plus the
//! error taxonomy shared by every operation surface. Every other crate in
//! the workspace depends on `hashlock-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Pinned wire schema.** The persisted [`ProposalEntry`] and the event
//!    payloads serialize to exactly the JSON the protocol's peers expect —
//!    field names and field order are fixed with explicit serde attributes,
//!    never left to Rust naming conventions.
//!
//! 2. **Algorithm tokens stay strings at rest.** A stored entry carries its
//!    `hashAlgorithm` as the literal token recorded at creation, so entries
//!    written by a foreign implementation with an unknown token remain
//!    readable. Tokens are parsed into [`HashAlgorithm`] at the point of use,
//!    and an unknown token at verification time is a distinct failure from a
//!    digest mismatch.
//!
//! 3. **One error taxonomy.** [`ProposalError`] classifies every failure an
//!    operation can return; callers match on the kind, not on message text.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hashlock-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod algorithm;
pub mod error;
pub mod event;
pub mod proposal;

// Re-export primary types for ergonomic imports.
pub use algorithm::HashAlgorithm;
pub use error::ProposalError;
pub use event::{
    created_event_name, ProposalConfirmed, ProposalCreated, CONFIRMED_EVENT,
    CREATED_HANDLER_EVENT_SUFFIX, CREATED_TIMEOUT_EVENT,
};
pub use proposal::{proposal_key, Proposal, ProposalEntry, ProposalStatus, PROPOSAL_KEY_PREFIX};
