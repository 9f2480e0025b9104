//! Cross-collection integration tests: membership invariants, deletion
//! cascades, bootstrap, revisions, and snapshot round-trips, all against
//! the real filesystem adapter in a temp directory.

mod common;

use std::sync::Arc;

use tempfile::TempDir;

use common::{certain_config, new_directory, snapshot_path, user};
use scimdir::bootstrap::bootstrap;
use scimdir::directory::resource::UserResource;
use scimdir_filter_adapter_scim::ScimFilterCompiler;
use scimdir_snapshot_adapter_fs::SnapshotAdapterFs;
use scimdir_types::hooks::{ListConstraints, ResourceHooks};
use scimdir_types::snapshot_adapter::SnapshotStore;
use scimdir_user_source_random::UserSourceRandom;

#[tokio::test]
async fn test_generated_users_have_bidirectional_membership() {
	let dir = TempDir::new().unwrap();
	let directory = new_directory(certain_config(&["Runners", "Readers"], 0), &dir);

	directory.create_users(3).await.unwrap();

	let users = directory.users.get_all();
	let groups = directory.groups.get_all();
	assert_eq!(users.len(), 3);
	assert_eq!(groups.len(), 2);

	// every user back-reference has a matching member entry
	for user in &users {
		assert_eq!(user.groups.len(), 2);
		for group_ref in &user.groups {
			let group = groups
				.iter()
				.find(|g| g.id.as_deref() == Some(group_ref.value.as_ref()))
				.unwrap();
			assert!(group
				.members
				.iter()
				.any(|m| Some(m.value.as_ref()) == user.id.as_deref()));
		}
	}

	// and every member entry points at a stored user
	for group in &groups {
		assert_eq!(group.members.len(), 3);
		for member in &group.members {
			assert!(users.iter().any(|u| u.id.as_deref() == Some(member.value.as_ref())));
		}
	}
}

#[tokio::test]
async fn test_delete_user_cascades_and_drops_empty_groups() {
	let dir = TempDir::new().unwrap();
	let directory = new_directory(certain_config(&["Runners"], 0), &dir);

	directory.create_users(2).await.unwrap();
	let users = directory.users.get_all();
	let first_id = users[0].id.clone().unwrap();

	directory.delete_user(&first_id).await.unwrap();

	assert_eq!(directory.users.len(), 1);
	let groups = directory.groups.get_all();
	assert_eq!(groups.len(), 1);
	assert_eq!(groups[0].members.len(), 1);
	assert!(groups[0].members.iter().all(|m| m.value.as_ref() != first_id.as_ref()));

	// removing the last member drops the group entirely
	let second_id = directory.users.get_all()[0].id.clone().unwrap();
	directory.delete_user(&second_id).await.unwrap();
	assert!(directory.users.is_empty());
	assert!(directory.groups.is_empty());
}

#[tokio::test]
async fn test_fresh_bootstrap_seeds_and_persists() {
	let dir = TempDir::new().unwrap();
	let store = Arc::new(SnapshotAdapterFs::new(snapshot_path(&dir)));

	let directory = bootstrap(
		store.clone(),
		Arc::new(ScimFilterCompiler::new()),
		Arc::new(UserSourceRandom::new()),
	)
	.await
	.unwrap();

	let config = directory.config();
	let token = config.token.unwrap();
	assert_eq!(token.len(), 64);
	assert_eq!(directory.users.len(), config.seed_users);
	assert!(directory.revision() > 0);

	// seeding went through the mutation path, so a snapshot exists
	let snapshot = store.load().await.unwrap().unwrap();
	assert_eq!(snapshot.users().len(), config.seed_users);
	assert_eq!(snapshot.config().token.as_deref(), Some(token.as_ref()));
}

#[tokio::test]
async fn test_bootstrap_restores_snapshot_with_revision_zero() {
	let dir = TempDir::new().unwrap();
	let store = Arc::new(SnapshotAdapterFs::new(snapshot_path(&dir)));

	{
		let directory = new_directory(certain_config(&["Runners"], 0), &dir);
		directory.create_users(2).await.unwrap();
	}

	let directory = bootstrap(
		store,
		Arc::new(ScimFilterCompiler::new()),
		Arc::new(UserSourceRandom::new()),
	)
	.await
	.unwrap();

	assert_eq!(directory.revision(), 0);
	assert_eq!(directory.users.len(), 2);
	assert_eq!(directory.groups.len(), 1);
}

#[tokio::test]
async fn test_revision_counts_discrete_mutations() {
	let dir = TempDir::new().unwrap();
	let directory = new_directory(certain_config(&[], 0), &dir);

	assert_eq!(directory.revision(), 0);
	directory.add_user(user("u1", "alice")).await.unwrap();
	assert_eq!(directory.revision(), 1);
	directory.add_user(user("u2", "bob")).await.unwrap();
	assert_eq!(directory.revision(), 2);

	// the deletion cascade is two discrete commits
	directory.delete_user("u1").await.unwrap();
	assert_eq!(directory.revision(), 4);
}

#[tokio::test]
async fn test_ingress_skips_duplicate_username() {
	let dir = TempDir::new().unwrap();
	let directory = new_directory(certain_config(&[], 0), &dir);
	let hooks = UserResource::new(directory.clone());

	hooks
		.ingress(serde_json::json!({ "username": "jdoe", "displayname": "John" }))
		.await
		.unwrap();
	hooks
		.ingress(serde_json::json!({ "username": "jdoe", "displayname": "Imposter" }))
		.await
		.unwrap();

	assert_eq!(directory.users.len(), 1);
	assert_eq!(directory.users.get_all()[0].display_name.as_deref(), Some("John"));
}

#[tokio::test]
async fn test_ingress_stamps_and_egress_filters() {
	let dir = TempDir::new().unwrap();
	let directory = new_directory(certain_config(&[], 0), &dir);
	let hooks = UserResource::new(directory.clone());

	let stored = hooks
		.ingress(serde_json::json!({ "username": "jdoe", "title": "Architect" }))
		.await
		.unwrap();
	assert!(stored["id"].is_string());
	assert_eq!(stored["meta"]["resourceType"], serde_json::json!("User"));

	hooks
		.ingress(serde_json::json!({ "username": "asmith", "title": "Engineer" }))
		.await
		.unwrap();

	let page = hooks
		.egress(Some("title eq \"Architect\""), ListConstraints::default())
		.await
		.unwrap();
	assert_eq!(page.len(), 1);
	assert_eq!(page[0]["username"], serde_json::json!("jdoe"));
}

#[tokio::test]
async fn test_snapshot_round_trip_preserves_collections() {
	let dir = TempDir::new().unwrap();
	let directory = new_directory(certain_config(&["Runners"], 0), &dir);
	directory.create_users(2).await.unwrap();

	let expected_users = directory.users.get_all();

	let store = SnapshotAdapterFs::new(snapshot_path(&dir));
	let snapshot = store.load().await.unwrap().unwrap();

	assert_eq!(snapshot.users().len(), expected_users.len());
	for (restored, expected) in snapshot.users().iter().zip(&expected_users) {
		assert_eq!(restored.id, expected.id);
		assert_eq!(restored.username, expected.username);
		assert_eq!(restored.groups.len(), expected.groups.len());
	}
	assert_eq!(snapshot.groups().len(), 1);
}

// vim: ts=4
