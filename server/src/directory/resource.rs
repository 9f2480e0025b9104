//! [`ResourceHooks`] implementations bridging the SCIM handlers to the
//! directory. Records cross this boundary as JSON values; the hooks
//! deserialize, stamp, and apply the per-type policies (username
//! uniqueness, deletion cascade) before touching the stores.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{groups, meta, Directory};
use crate::prelude::*;
use scimdir_types::hooks::{ListConstraints, ResourceHooks};
use scimdir_types::resource::{Group, User};

#[derive(Debug)]
pub struct UserResource {
	directory: Arc<Directory>,
}

impl UserResource {
	pub fn new(directory: Arc<Directory>) -> Self {
		UserResource { directory }
	}
}

#[async_trait]
impl ResourceHooks for UserResource {
	async fn ingress(&self, record: Value) -> SdResult<Value> {
		let mut user: User = serde_json::from_value(record)
			.map_err(|err| Error::ValidationError(err.to_string()))?;

		// Duplicate usernames are skipped without an error; the incoming
		// record is echoed back unstored.
		if self.directory.user_exists(&user.username) {
			debug!("Skipping duplicate username '{}'", user.username);
			return Ok(serde_json::to_value(&user)?);
		}

		meta::stamp(&mut user, &self.directory.config().scimbase);
		// Records arriving without memberships are new users and get the
		// weighted assignment; already-linked records keep their links.
		if user.groups.is_empty() {
			groups::assign_to_groups(&self.directory, &mut user).await?;
		}
		let stored = serde_json::to_value(&user)?;
		self.directory.add_user(user).await?;
		Ok(stored)
	}

	async fn egress(
		&self,
		filter: Option<&str>,
		constraints: ListConstraints,
	) -> SdResult<Vec<Value>> {
		self.directory
			.choose_users(filter, constraints)?
			.iter()
			.map(|user| serde_json::to_value(user).map_err(Error::from))
			.collect()
	}

	async fn removal(&self, id: &str) -> SdResult<()> {
		self.directory.delete_user(id).await
	}
}

#[derive(Debug)]
pub struct GroupResource {
	directory: Arc<Directory>,
}

impl GroupResource {
	pub fn new(directory: Arc<Directory>) -> Self {
		GroupResource { directory }
	}
}

#[async_trait]
impl ResourceHooks for GroupResource {
	async fn ingress(&self, record: Value) -> SdResult<Value> {
		let mut group: Group = serde_json::from_value(record)
			.map_err(|err| Error::ValidationError(err.to_string()))?;

		meta::stamp(&mut group, &self.directory.config().scimbase);
		let stored = serde_json::to_value(&group)?;
		self.directory.add_group(group).await?;
		Ok(stored)
	}

	async fn egress(
		&self,
		filter: Option<&str>,
		constraints: ListConstraints,
	) -> SdResult<Vec<Value>> {
		self.directory
			.choose_groups(filter, constraints)?
			.iter()
			.map(|group| serde_json::to_value(group).map_err(Error::from))
			.collect()
	}

	async fn removal(&self, id: &str) -> SdResult<()> {
		self.directory.remove_group(id).await
	}
}

// vim: ts=4
