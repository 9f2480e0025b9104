//! Mutually-exclusive-access ordered record collection.
//!
//! One instance exists per collection (users, groups). Mutations hold the
//! collection lock for the whole append or scan-and-replace, so readers
//! only ever observe a fully applied pass, never a partial one. The store
//! knows nothing about revisions; the `Directory` facade pairs every
//! mutation with exactly one revision commit.

use parking_lot::Mutex;

use scimdir_types::filter_adapter::Predicate;
use scimdir_types::hooks::ListConstraints;
use scimdir_types::resource::DirectoryRecord;

#[derive(Debug, Default)]
pub struct IdentityStore<T> {
	records: Mutex<Vec<T>>,
}

impl<T: DirectoryRecord> IdentityStore<T> {
	pub fn new(records: Vec<T>) -> Self {
		IdentityStore { records: Mutex::new(records) }
	}

	/// Snapshot read of the whole collection, in insertion order
	pub fn get_all(&self) -> Vec<T> {
		self.records.lock().clone()
	}

	pub fn len(&self) -> usize {
		self.records.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.lock().is_empty()
	}

	/// Append a record. Duplicate id policy belongs to the caller; the
	/// store never rejects an append.
	pub fn add(&self, record: T) {
		self.records.lock().push(record);
	}

	/// Keep only records for which the predicate returns true. The
	/// predicate may mutate a record it keeps (the deletion cascade strips
	/// membership references in the same pass). The whole scan-and-replace
	/// happens under one lock hold.
	pub fn retain(&self, mut predicate: impl FnMut(&mut T) -> bool) {
		self.records.lock().retain_mut(|record| predicate(record));
	}

	/// Remove the record with the given id, keeping everything else
	pub fn remove(&self, id: &str) {
		self.retain(|record| record.id() != Some(id));
	}

	/// Run a closure over the locked collection. Used for membership-list
	/// maintenance on records already in the store; the enclosing
	/// directory operation commits afterward.
	pub fn edit<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
		f(&mut self.records.lock())
	}

	/// Read-only filtered + paginated selection: predicate first, then the
	/// 1-based `startIndex` skip, then `count` truncation. Returns fresh
	/// clones, never live handles.
	pub fn choose(&self, predicate: Option<&Predicate>, constraints: ListConstraints) -> Vec<T> {
		let records = self.records.lock();

		let mut selection: Vec<T> = match predicate {
			Some(predicate) => records
				.iter()
				.filter(|record| {
					serde_json::to_value(record).is_ok_and(|value| predicate(&value))
				})
				.cloned()
				.collect(),
			None => records.clone(),
		};
		drop(records);

		if let Some(start_index) = constraints.start_index {
			selection.drain(..start_index.saturating_sub(1).min(selection.len()));
		}
		if let Some(count) = constraints.count {
			selection.truncate(count);
		}
		selection
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use scimdir_types::resource::User;

	fn user(id: &str, username: &str) -> User {
		serde_json::from_value(serde_json::json!({
			"id": id,
			"username": username,
		}))
		.unwrap()
	}

	fn seeded() -> IdentityStore<User> {
		IdentityStore::new(vec![
			user("u1", "alice"),
			user("u2", "bob"),
			user("u3", "carol"),
			user("u4", "dave"),
			user("u5", "erin"),
		])
	}

	#[test]
	fn test_add_preserves_order() {
		let store = IdentityStore::new(Vec::new());
		store.add(user("u1", "alice"));
		store.add(user("u2", "bob"));

		let all = store.get_all();
		assert_eq!(all.len(), 2);
		assert_eq!(all[0].id.as_deref(), Some("u1"));
		assert_eq!(all[1].id.as_deref(), Some("u2"));
	}

	#[test]
	fn test_remove_keeps_others() {
		let store = seeded();
		store.remove("u3");
		assert_eq!(store.len(), 4);
		assert!(store.get_all().iter().all(|u| u.id.as_deref() != Some("u3")));
	}

	#[test]
	fn test_retain_may_mutate_kept_records() {
		let store = seeded();
		store.retain(|record| {
			record.active = false;
			record.id() != Some("u1")
		});
		let all = store.get_all();
		assert_eq!(all.len(), 4);
		assert!(all.iter().all(|u| !u.active));
	}

	#[test]
	fn test_choose_start_index_and_count() {
		// startIndex 3, count 2 on a 5-record collection: positions 3-4
		let store = seeded();
		let constraints = ListConstraints { start_index: Some(3), count: Some(2) };
		let page = store.choose(None, constraints);
		assert_eq!(page.len(), 2);
		assert_eq!(page[0].username.as_ref(), "carol");
		assert_eq!(page[1].username.as_ref(), "dave");
	}

	#[test]
	fn test_choose_constraints_out_of_range() {
		let store = seeded();
		let page =
			store.choose(None, ListConstraints { start_index: Some(9), count: Some(10) });
		assert!(page.is_empty());

		let page = store.choose(None, ListConstraints { start_index: None, count: Some(99) });
		assert_eq!(page.len(), 5);
	}

	#[test]
	fn test_choose_applies_predicate_before_pagination() {
		let store = seeded();
		let predicate: Predicate =
			Box::new(|value| value["username"].as_str().is_some_and(|u| u > "alice"));
		let page = store.choose(
			Some(&predicate),
			ListConstraints { start_index: Some(2), count: Some(2) },
		);
		// matches: bob carol dave erin; page: carol dave
		assert_eq!(page.len(), 2);
		assert_eq!(page[0].username.as_ref(), "carol");
		assert_eq!(page[1].username.as_ref(), "dave");
	}

	#[test]
	fn test_choose_returns_fresh_clones() {
		let store = seeded();
		let mut page = store.choose(None, ListConstraints::default());
		page[0].username = "changed".into();
		assert_eq!(store.get_all()[0].username.as_ref(), "alice");
	}
}

// vim: ts=4
