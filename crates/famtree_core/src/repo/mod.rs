//! Persistence layer: key-value storage and the snapshot repository on top.
//!
//! # Responsibility
//! - Treat the storage backend as an opaque whole-value get/set.
//! - Isolate snapshot encoding from service orchestration.

pub mod kv_store;
pub mod snapshot_repo;
