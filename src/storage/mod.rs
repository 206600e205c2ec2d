//! Durable persistence for the user store's persisted subset.
//!
//! One named JSON slot holds `{ profile, isAuthenticated, badges,
//! progressEntries }`. The slot is rewritten in full after every
//! effective user-store mutation by [`SlotPersistence`], which
//! subscribes to the store; the store itself performs no I/O.
//! Timestamp fields round-trip through the typed schema, so dates are
//! real date values after a reload, never raw strings.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::config::WorkspacePaths;
use crate::store::{StateChange, StoreObserver, UserStateSnapshot, UserStore};

/// File name of the durable slot under the workspace data directory.
pub const USER_STATE_FILE: &str = "user_state.json";

/// Result returned after writing the slot.
#[derive(Debug, Clone)]
pub struct SlotWriteOutcome {
    pub path: PathBuf,
    pub hash: String,
}

/// A named durable slot for the user-state snapshot.
#[derive(Debug, Clone)]
pub struct UserStateSlot {
    path: PathBuf,
}

impl UserStateSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_workspace(paths: &WorkspacePaths) -> Self {
        Self {
            path: paths.data_dir.join(USER_STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted snapshot if the slot exists.
    pub fn load(&self) -> Result<Option<UserStateSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read(&self.path)
            .with_context(|| format!("Failed reading user state slot {:?}", self.path))?;
        let snapshot = serde_json::from_slice(&data)
            .with_context(|| format!("Failed parsing user state slot {:?}", self.path))?;
        Ok(Some(snapshot))
    }

    /// Writes the snapshot as the slot's full contents and returns
    /// the content hash of what was written.
    pub fn save(&self, snapshot: &UserStateSnapshot) -> Result<SlotWriteOutcome> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed creating slot directory {:?}", parent))?;
        }
        let payload = serde_json::to_vec_pretty(snapshot)
            .with_context(|| format!("Failed serializing user state slot {:?}", self.path))?;
        let hash = compute_hash(&payload);
        let mut file = fs::File::create(&self.path)
            .with_context(|| format!("Failed opening user state slot {:?}", self.path))?;
        file.write_all(&payload)?;
        Ok(SlotWriteOutcome {
            path: self.path.clone(),
            hash,
        })
    }
}

/// Computes a lowercase hex SHA-256 hash of the provided bytes.
pub fn compute_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}

/// Store observer that mirrors every effective mutation into the
/// durable slot. Write failures are logged and swallowed: persistence
/// is fire-and-forget and must never fail a store operation.
pub struct SlotPersistence {
    slot: UserStateSlot,
}

impl SlotPersistence {
    pub fn new(slot: UserStateSlot) -> Self {
        Self { slot }
    }
}

impl StoreObserver for SlotPersistence {
    fn state_changed(&self, change: StateChange, store: &UserStore) {
        let snapshot = store.snapshot();
        if let Err(error) = self.slot.save(&snapshot) {
            warn!(?change, %error, slot = ?self.slot.path(), "failed to persist user state");
        }
    }
}
