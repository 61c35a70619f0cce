//! Domain model for the family tree.
//!
//! # Responsibility
//! - Define members, relation kinds and the symmetric relation store.
//! - Define the snapshot shape shared by persistence and the service layer.
//!
//! # Invariants
//! - Every member is identified by a stable `MemberId`.
//! - Relation edges are always stored in both directions.

pub mod member;
pub mod registry;
pub mod relation;
pub mod resolved;
pub mod snapshot;
