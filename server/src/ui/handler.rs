//! Management endpoints: directory state, mutation shortcuts, long-poll.
//!
//! These sit outside the SCIM base path and outside the auth layer; they
//! drive the original operator console. `/api` swallows failures and
//! always answers `OK` so a flaky disk never wedges the console; the
//! failure still lands in the log.

use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::{
	extract::{Query, State},
	http::StatusCode,
	Json,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use scimdir_types::resource::{Group, User};

const POLL_TIMEOUT: Duration = Duration::from_secs(25);

#[derive(Debug, Deserialize)]
pub struct ApiQuery {
	pub op: Option<String>,
	pub id: Option<String>,
	pub count: Option<usize>,
}

/// GET /api?op=delete&id=… | op=generate&count=…
pub async fn api_op(State(app): State<App>, Query(query): Query<ApiQuery>) -> &'static str {
	match query.op.as_deref() {
		Some("delete") => {
			if let Some(id) = query.id.as_deref() {
				let name = app.directory.name_from_id(id);
				info!("Deleting {} ({})", name, id);
				if let Err(err) = app.directory.delete_user(id).await {
					error!("Delete failed for {}: {}", id, err);
				}
			}
		}
		Some("generate") => {
			let count = query.count.unwrap_or(1);
			if let Err(err) = app.directory.create_users(count).await {
				error!("User generation failed: {}", err);
			}
		}
		_ => {}
	}
	"OK"
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
	pub revision: u64,
	pub users: Vec<User>,
	pub groups: Vec<Group>,
}

/// GET /api/state — full dump plus the revision it reflects. The served
/// revision becomes the caller's long-poll baseline.
pub async fn get_state(State(app): State<App>) -> Json<StateResponse> {
	let revision = app.directory.revision();
	app.ui_revision.store(revision, Ordering::Relaxed);

	Json(StateResponse {
		revision,
		users: app.directory.users.get_all(),
		groups: app.directory.groups.get_all(),
	})
}

/// GET /poll — long-poll for changes past the last served revision.
/// Resolves immediately when the directory already moved on; otherwise
/// waits on the revision channel, bounded to 25 s, then `204 No Content`.
pub async fn poll(State(app): State<App>) -> StatusCode {
	let baseline = app.ui_revision.load(Ordering::Relaxed);
	if app.directory.revision() > baseline {
		return StatusCode::OK;
	}

	let mut rx = app.directory.subscribe();
	let wait = async {
		loop {
			if *rx.borrow_and_update() > baseline {
				return;
			}
			if rx.changed().await.is_err() {
				return;
			}
		}
	};

	match tokio::time::timeout(POLL_TIMEOUT, wait).await {
		Ok(()) if app.directory.revision() > baseline => StatusCode::OK,
		_ => StatusCode::NO_CONTENT,
	}
}

// vim: ts=4
