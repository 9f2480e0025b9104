//! The narrow contract a protocol middleware consumes the store through.
//!
//! For each resource type the core exposes exactly three operations:
//! ingress (create), egress (filtered/paginated read), and removal. The
//! middleware stays protocol-specific; the core stays protocol-agnostic.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SdResult;

/// Pagination constraints for an egress read. `start_index` is 1-based,
/// applied after filtering and before `count` truncation.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct ListConstraints {
	#[serde(rename = "startIndex")]
	pub start_index: Option<usize>,
	pub count: Option<usize>,
}

#[async_trait]
pub trait ResourceHooks: Send + Sync {
	/// Stamp and insert an already-shaped incoming record, returning the
	/// stored form. Uniqueness policy is applied here, not in the store.
	async fn ingress(&self, record: Value) -> SdResult<Value>;

	/// Filtered, paginated read of the collection
	async fn egress(
		&self,
		filter: Option<&str>,
		constraints: ListConstraints,
	) -> SdResult<Vec<Value>>;

	/// Delete by id, cascading into membership references where applicable
	async fn removal(&self, id: &str) -> SdResult<()>;
}

// vim: ts=4
