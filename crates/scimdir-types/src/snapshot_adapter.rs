//! Persistence gateway trait and the snapshot document it reads and writes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::config::Config;
use crate::error::SdResult;
use crate::resource::{Group, User};

/// Full durable state: config plus both collections, serialized as the
/// ordered JSON triple `[config, users, groups]`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Snapshot(pub Config, pub Vec<User>, pub Vec<Group>);

impl Snapshot {
	pub fn config(&self) -> &Config {
		&self.0
	}

	pub fn users(&self) -> &[User] {
		&self.1
	}

	pub fn groups(&self) -> &[Group] {
		&self.2
	}
}

/// Durable storage for the directory snapshot.
///
/// `load` returning `Ok(None)` means no snapshot exists yet; that is the
/// bootstrap trigger, not an error. `save` overwrites the previous
/// snapshot; write failures propagate to the in-flight mutation.
#[async_trait]
pub trait SnapshotStore: Debug + Send + Sync {
	async fn load(&self) -> SdResult<Option<Snapshot>>;
	async fn save(&self, snapshot: &Snapshot) -> SdResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_snapshot_is_json_triple() {
		let snapshot = Snapshot(Config::default(), Vec::new(), Vec::new());
		let value = serde_json::to_value(&snapshot).unwrap();
		let entries = value.as_array().unwrap();
		assert_eq!(entries.len(), 3);
		assert!(entries[0].is_object());
		assert!(entries[1].is_array());
		assert!(entries[2].is_array());
	}
}

// vim: ts=4
