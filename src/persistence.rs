//! Saving and restoring the editor session between runs.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;
use crate::util::time::timestamp_secs;
use crate::view::View;

/// Bumped whenever the snapshot layout changes incompatibly.
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to serialize session: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse session: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// Everything worth carrying across app restarts. The active tool travels
/// by display name so a stale name degrades to the default tool instead of
/// failing the whole restore.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub timestamp: u64,
    pub document: Document,
    pub view: View,
    pub tool_name: String,
}

impl Snapshot {
    pub fn new(document: Document, view: View, tool_name: &str) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            timestamp: timestamp_secs(),
            document,
            view,
            tool_name: tool_name.to_owned(),
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(PersistenceError::Serialize)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(PersistenceError::Deserialize)?;
        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                "session snapshot version {} (current {}), restoring anyway",
                snapshot.version, SNAPSHOT_VERSION
            );
        }
        Ok(snapshot)
    }
}
