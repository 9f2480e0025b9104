//! Filesystem snapshot persistence.
//!
//! Stores the full directory state as one pretty-printed JSON file,
//! overwritten on every save. A missing file is the bootstrap signal, not
//! an error; every other failure propagates to the mutation that triggered
//! the write.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs::File, io::AsyncWriteExt};

use scimdir::prelude::*;
use scimdir::snapshot_adapter::{Snapshot, SnapshotStore};

#[derive(Debug)]
pub struct SnapshotAdapterFs {
	path: PathBuf,
}

impl SnapshotAdapterFs {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

#[async_trait]
impl SnapshotStore for SnapshotAdapterFs {
	async fn load(&self) -> SdResult<Option<Snapshot>> {
		let data = match tokio::fs::read(&self.path).await {
			Ok(data) => data,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				debug!("No snapshot at {:?}, starting fresh", self.path);
				return Ok(None);
			}
			Err(err) => return Err(err.into()),
		};
		let snapshot: Snapshot = serde_json::from_slice(&data)?;
		info!(
			"Loaded snapshot from {:?}: {} users, {} groups",
			self.path,
			snapshot.users().len(),
			snapshot.groups().len()
		);
		Ok(Some(snapshot))
	}

	async fn save(&self, snapshot: &Snapshot) -> SdResult<()> {
		let data = serde_json::to_vec_pretty(snapshot)?;
		let mut file = File::create(&self.path)
			.await
			.map_err(|err| Error::Persistence(format!("{:?}: {}", self.path, err)))?;
		file.write_all(&data)
			.await
			.map_err(|err| Error::Persistence(format!("{:?}: {}", self.path, err)))?;
		file.sync_all()
			.await
			.map_err(|err| Error::Persistence(format!("{:?}: {}", self.path, err)))?;
		Ok(())
	}
}


// vim: ts=4
