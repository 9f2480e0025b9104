//! Shared fixtures for the integration tests: a directory wired to the
//! real filesystem snapshot adapter and filter compiler in a temp dir.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use scimdir::directory::Directory;
use scimdir_filter_adapter_scim::ScimFilterCompiler;
use scimdir_snapshot_adapter_fs::SnapshotAdapterFs;
use scimdir_types::config::{Config, GroupWeight};
use scimdir_types::resource::User;
use scimdir_user_source_random::UserSourceRandom;

pub fn snapshot_path(dir: &TempDir) -> PathBuf {
	dir.path().join("config.json")
}

/// Config with a deterministic assignment table: every listed group gets
/// probability 1.0, so the multigroup policy links every user to all of
/// them.
pub fn certain_config(groups: &[&str], seed_users: usize) -> Config {
	Config {
		groups: groups.iter().map(|name| GroupWeight::new(*name, 1.0)).collect(),
		multigroup: true,
		seed_users,
		..Config::default()
	}
}

pub fn new_directory(config: Config, dir: &TempDir) -> Arc<Directory> {
	Arc::new(Directory::new(
		config,
		Vec::new(),
		Vec::new(),
		Arc::new(SnapshotAdapterFs::new(snapshot_path(dir))),
		Arc::new(ScimFilterCompiler::new()),
		Arc::new(UserSourceRandom::new()),
	))
}

pub fn user(id: &str, username: &str) -> User {
	serde_json::from_value(serde_json::json!({
		"id": id,
		"username": username,
		"name": { "givenname": "Test", "familyname": "User" },
	}))
	.unwrap()
}

// vim: ts=4
