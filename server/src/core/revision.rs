//! Monotonic revision counter with wake-on-change subscription.
//!
//! Advanced once after every store mutation. The snapshot write happens
//! inside the advance critical section, so mutation latency includes the
//! file I/O and a write failure propagates to the mutating caller while
//! the counter stays advanced (memory and disk diverge until the next
//! successful write). The counter restarts at 0 each process; it is not
//! part of the snapshot.

use tokio::sync::watch;

use crate::prelude::*;
use scimdir_types::snapshot_adapter::{Snapshot, SnapshotStore};

#[derive(Debug)]
pub struct RevisionTracker {
	// Serializes advances from both collections; distinct from the
	// per-collection locks.
	advance_lock: tokio::sync::Mutex<()>,
	tx: watch::Sender<u64>,
}

impl RevisionTracker {
	pub fn new() -> Self {
		let (tx, _rx) = watch::channel(0);
		RevisionTracker { advance_lock: tokio::sync::Mutex::new(()), tx }
	}

	pub fn current(&self) -> u64 {
		*self.tx.borrow()
	}

	/// Receiver for long-poll waiters; resolves whenever the counter moves
	pub fn subscribe(&self) -> watch::Receiver<u64> {
		self.tx.subscribe()
	}

	/// Increment the counter, publish the new value to subscribers, and
	/// write the snapshot before releasing the advance lock.
	pub async fn advance(
		&self,
		snapshot_store: &dyn SnapshotStore,
		snapshot: Snapshot,
	) -> SdResult<u64> {
		let _guard = self.advance_lock.lock().await;
		let next = self.current() + 1;
		self.tx.send_replace(next);
		snapshot_store.save(&snapshot).await.inspect_err(|err| {
			error!("Snapshot write failed at revision {}: {}", next, err);
		})?;
		Ok(next)
	}
}

impl Default for RevisionTracker {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use scimdir_types::config::Config;

	#[derive(Debug, Default)]
	struct NullStore {
		fail: bool,
	}

	#[async_trait]
	impl SnapshotStore for NullStore {
		async fn load(&self) -> SdResult<Option<Snapshot>> {
			Ok(None)
		}

		async fn save(&self, _snapshot: &Snapshot) -> SdResult<()> {
			if self.fail {
				Err(Error::Persistence("disk full".into()))
			} else {
				Ok(())
			}
		}
	}

	fn empty_snapshot() -> Snapshot {
		Snapshot(Config::default(), Vec::new(), Vec::new())
	}

	#[tokio::test]
	async fn test_advance_increments_by_one() {
		let tracker = RevisionTracker::new();
		let store = NullStore::default();
		assert_eq!(tracker.current(), 0);

		assert_eq!(tracker.advance(&store, empty_snapshot()).await.unwrap(), 1);
		assert_eq!(tracker.advance(&store, empty_snapshot()).await.unwrap(), 2);
		assert_eq!(tracker.current(), 2);
	}

	#[tokio::test]
	async fn test_subscribers_wake_on_advance() {
		let tracker = RevisionTracker::new();
		let mut rx = tracker.subscribe();
		assert_eq!(*rx.borrow_and_update(), 0);

		tracker.advance(&NullStore::default(), empty_snapshot()).await.unwrap();
		rx.changed().await.unwrap();
		assert_eq!(*rx.borrow_and_update(), 1);
	}

	#[tokio::test]
	async fn test_save_failure_propagates_but_counter_stays_advanced() {
		let tracker = RevisionTracker::new();
		let store = NullStore { fail: true };

		assert!(tracker.advance(&store, empty_snapshot()).await.is_err());
		assert_eq!(tracker.current(), 1);
	}
}

// vim: ts=4
