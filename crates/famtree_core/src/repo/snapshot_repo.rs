//! Snapshot repository contracts and key-value implementation.
//!
//! # Responsibility
//! - Load the whole family tree once at startup.
//! - Overwrite the stored snapshot in full after every mutation.
//!
//! # Invariants
//! - A missing or malformed payload loads as an empty snapshot.
//! - Backend failures are returned, never masked as empty state.

use crate::model::snapshot::Snapshot;
use crate::repo::kv_store::{KeyValueStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Fixed storage key holding the serialized snapshot.
pub const STORAGE_KEY: &str = "family_tree_snapshot";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Persistence seam injected into the service layer.
pub trait SnapshotRepository {
    fn load(&self) -> RepoResult<Snapshot>;
    fn save(&mut self, snapshot: &Snapshot) -> RepoResult<()>;
}

/// Stores the snapshot as JSON under [`STORAGE_KEY`].
pub struct KvSnapshotRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvSnapshotRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> SnapshotRepository for KvSnapshotRepository<S> {
    fn load(&self) -> RepoResult<Snapshot> {
        let started_at = Instant::now();
        let Some(payload) = self.store.get(STORAGE_KEY)? else {
            info!("event=snapshot_load module=repo status=ok source=empty");
            return Ok(Snapshot::default());
        };

        match Snapshot::from_json(&payload) {
            Ok(snapshot) => {
                info!(
                    "event=snapshot_load module=repo status=ok source=stored members={} relation_sets={} duration_ms={}",
                    snapshot.members.len(),
                    snapshot.relations.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(snapshot)
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=recovered error_code=snapshot_malformed bytes={} error={err}",
                    payload.len()
                );
                Ok(Snapshot::default())
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> RepoResult<()> {
        let payload = snapshot.to_json().map_err(RepoError::Encode)?;
        self.store.set(STORAGE_KEY, &payload)?;
        info!(
            "event=snapshot_save module=repo status=ok members={} bytes={}",
            snapshot.members.len(),
            payload.len()
        );
        Ok(())
    }
}
