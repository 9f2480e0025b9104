//! The directory core: both record collections, the revision tracker, and
//! the configuration, behind one explicitly constructed facade.
//!
//! Every mutation pairs one store operation with one revision commit; the
//! commit snapshots config plus both collections and hands the snapshot to
//! the persistence gateway. Cross-collection cascades are two independent
//! critical sections with two discrete revision bumps, not one atomic
//! transaction.

pub mod groups;
pub mod meta;
pub mod resource;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::revision::RevisionTracker;
use crate::core::store::IdentityStore;
use crate::prelude::*;
use scimdir_types::config::Config;
use scimdir_types::filter_adapter::{FilterCompiler, Predicate};
use scimdir_types::hooks::ListConstraints;
use scimdir_types::resource::{Group, User};
use scimdir_types::snapshot_adapter::{Snapshot, SnapshotStore};
use scimdir_types::user_source::UserSource;

pub struct Directory {
	pub users: IdentityStore<User>,
	pub groups: IdentityStore<Group>,
	revision: RevisionTracker,
	config: RwLock<Config>,
	snapshot_store: Arc<dyn SnapshotStore>,
	filter: Arc<dyn FilterCompiler>,
	source: Arc<dyn UserSource>,
}

impl Directory {
	pub fn new(
		config: Config,
		users: Vec<User>,
		groups: Vec<Group>,
		snapshot_store: Arc<dyn SnapshotStore>,
		filter: Arc<dyn FilterCompiler>,
		source: Arc<dyn UserSource>,
	) -> Self {
		Directory {
			users: IdentityStore::new(users),
			groups: IdentityStore::new(groups),
			revision: RevisionTracker::new(),
			config: RwLock::new(config),
			snapshot_store,
			filter,
			source,
		}
	}

	pub fn config(&self) -> Config {
		self.config.read().clone()
	}

	pub fn revision(&self) -> u64 {
		self.revision.current()
	}

	pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
		self.revision.subscribe()
	}

	/// Bump the revision and write the snapshot. Called exactly once per
	/// store mutation, even when the mutation removed nothing.
	async fn commit(&self) -> SdResult<u64> {
		let snapshot = Snapshot(self.config(), self.users.get_all(), self.groups.get_all());
		self.revision.advance(&*self.snapshot_store, snapshot).await
	}

	pub async fn add_user(&self, user: User) -> SdResult<()> {
		if let Ok(json) = serde_json::to_string(&user) {
			info!("Added {}", json);
		}
		self.users.add(user);
		self.commit().await?;
		Ok(())
	}

	pub async fn add_group(&self, group: Group) -> SdResult<()> {
		if let Ok(json) = serde_json::to_string(&group) {
			info!("Added {}", json);
		}
		self.groups.add(group);
		self.commit().await?;
		Ok(())
	}

	/// Cascading user deletion: strip the user from every group's member
	/// list (dropping groups left empty), then remove the user itself.
	/// Two separately-locked, separately-revisioned operations.
	pub async fn delete_user(&self, id: &str) -> SdResult<()> {
		self.groups.retain(|group| {
			group.members.retain(|member| member.value.as_ref() != id);
			!group.members.is_empty()
		});
		self.commit().await?;

		self.users.remove(id);
		self.commit().await?;
		Ok(())
	}

	pub async fn remove_group(&self, id: &str) -> SdResult<()> {
		self.groups.remove(id);
		self.commit().await?;
		Ok(())
	}

	/// Fetch fresh candidates from the user source and insert each through
	/// the normal mutation path. The fetch holds no store lock.
	pub async fn create_users(&self, count: usize) -> SdResult<()> {
		let config = self.config();
		let candidates = self.source.fetch_users(count, &config.countries).await?;

		for mut user in candidates {
			meta::stamp(&mut user, &config.scimbase);
			groups::assign_to_groups(self, &mut user).await?;
			self.add_user(user).await?;
		}
		Ok(())
	}

	pub fn user_exists(&self, username: &str) -> bool {
		self.users.get_all().iter().any(|user| user.username.as_ref() == username)
	}

	/// Resolve a user id to a display name for UI payloads
	pub fn name_from_id(&self, id: &str) -> Box<str> {
		for user in self.users.get_all() {
			if user.id.as_deref() == Some(id) {
				let given = user.name.given_name.as_deref().unwrap_or_default();
				let family = user.name.family_name.as_deref().unwrap_or_default();
				return format!("{} {}", given, family).trim().into();
			}
		}
		"Unknown user".into()
	}

	fn compile_filter(&self, filter: Option<&str>) -> SdResult<Option<Predicate>> {
		filter.map(|expression| self.filter.compile(expression)).transpose()
	}

	pub fn choose_users(
		&self,
		filter: Option<&str>,
		constraints: ListConstraints,
	) -> SdResult<Vec<User>> {
		let predicate = self.compile_filter(filter)?;
		Ok(self.users.choose(predicate.as_ref(), constraints))
	}

	pub fn choose_groups(
		&self,
		filter: Option<&str>,
		constraints: ListConstraints,
	) -> SdResult<Vec<Group>> {
		let predicate = self.compile_filter(filter)?;
		Ok(self.groups.choose(predicate.as_ref(), constraints))
	}
}

impl std::fmt::Debug for Directory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Directory")
			.field("users", &self.users.len())
			.field("groups", &self.groups.len())
			.field("revision", &self.revision())
			.finish()
	}
}

// vim: ts=4
