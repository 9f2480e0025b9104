//! Startup: restore the directory from its snapshot, or build a fresh one.
//!
//! A fresh directory gets a default configuration, a bearer token derived
//! from the host name, and a handful of generated seed users so the API is
//! immediately explorable. Seeding goes through the normal mutation path,
//! so the first snapshot is written before the server starts listening.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::directory::Directory;
use crate::prelude::*;
use scimdir_types::config::Config;
use scimdir_types::filter_adapter::FilterCompiler;
use scimdir_types::snapshot_adapter::{Snapshot, SnapshotStore};
use scimdir_types::user_source::UserSource;

/// Deterministic per-host bearer token: the hex SHA-256 of the host name.
/// Stable across restarts on the same machine, different across machines.
pub async fn host_token() -> Box<str> {
	let hostname = match tokio::fs::read_to_string("/etc/hostname").await {
		Ok(contents) if !contents.trim().is_empty() => contents.trim().to_string(),
		_ => std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".into()),
	};
	Sha256::digest(hostname.as_bytes())
		.iter()
		.map(|byte| format!("{:02x}", byte))
		.collect::<String>()
		.into()
}

pub async fn bootstrap(
	snapshot_store: Arc<dyn SnapshotStore>,
	filter: Arc<dyn FilterCompiler>,
	source: Arc<dyn UserSource>,
) -> SdResult<Directory> {
	if let Some(Snapshot(config, users, groups)) = snapshot_store.load().await? {
		info!("Loaded snapshot: {} users, {} groups", users.len(), groups.len());
		return Ok(Directory::new(config, users, groups, snapshot_store, filter, source));
	}

	info!("No snapshot found, bootstrapping a fresh directory");
	let config = Config { token: Some(host_token().await), ..Config::default() };
	let seed = config.seed_users;
	let directory =
		Directory::new(config, Vec::new(), Vec::new(), snapshot_store, filter, source);
	if seed > 0 {
		directory.create_users(seed).await?;
	}
	Ok(directory)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_host_token_is_hex_sha256() {
		let token = host_token().await;
		assert_eq!(token.len(), 64);
		assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
	}

	#[tokio::test]
	async fn test_host_token_is_stable() {
		assert_eq!(host_token().await, host_token().await);
	}
}

// vim: ts=4
