//! Core domain logic for the family tree viewer.
//! This crate owns the relation graph invariants and snapshot persistence.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::member::{Member, MemberId, MemberValidationError};
pub use model::registry::MemberRegistry;
pub use model::relation::{ParseRelationKindError, RelationKind, RelationSet, RelationStore};
pub use model::resolved::ResolvedRelations;
pub use model::snapshot::Snapshot;
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use repo::snapshot_repo::{
    KvSnapshotRepository, RepoError, RepoResult, SnapshotRepository, STORAGE_KEY,
};
pub use search::filter::filter_members;
pub use service::family_service::{FamilyResult, FamilyService, FamilyServiceError, NewMember};
pub use service::notifier::{LogNotifier, Notifier, RecordingNotifier};
pub use view::card::{render_card, MemberCard};
pub use view::dates::{age_in_years, format_birth_date};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
