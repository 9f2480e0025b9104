//! SCIM resource handlers
//!
//! A thin collaborator layer over the per-type [`ResourceHooks`]: the
//! handlers only translate between HTTP and the hook contract. List
//! responses are plain resource arrays; envelope rendering and schema
//! validation live with the external middleware, not here.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::prelude::*;
use scimdir_types::hooks::ListConstraints;

/// `filter`, `startIndex`, and `count` query parameters of a list read
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
	pub filter: Option<String>,
	#[serde(rename = "startIndex")]
	pub start_index: Option<usize>,
	pub count: Option<usize>,
}

impl ListQuery {
	fn constraints(&self) -> ListConstraints {
		ListConstraints { start_index: self.start_index, count: self.count }
	}
}

/// GET {scimbase}/Users
pub async fn list_users(
	State(app): State<App>,
	Query(query): Query<ListQuery>,
) -> SdResult<Json<Vec<Value>>> {
	let users = app.user_hooks.egress(query.filter.as_deref(), query.constraints()).await?;
	Ok(Json(users))
}

/// POST {scimbase}/Users
pub async fn post_user(
	State(app): State<App>,
	Json(record): Json<Value>,
) -> SdResult<(StatusCode, Json<Value>)> {
	let stored = app.user_hooks.ingress(record).await?;
	Ok((StatusCode::CREATED, Json(stored)))
}

/// DELETE {scimbase}/Users/{id}
pub async fn delete_user(
	State(app): State<App>,
	Path(id): Path<String>,
) -> SdResult<StatusCode> {
	app.user_hooks.removal(&id).await?;
	Ok(StatusCode::NO_CONTENT)
}

/// GET {scimbase}/Groups
pub async fn list_groups(
	State(app): State<App>,
	Query(query): Query<ListQuery>,
) -> SdResult<Json<Vec<Value>>> {
	let groups = app.group_hooks.egress(query.filter.as_deref(), query.constraints()).await?;
	Ok(Json(groups))
}

/// POST {scimbase}/Groups
pub async fn post_group(
	State(app): State<App>,
	Json(record): Json<Value>,
) -> SdResult<(StatusCode, Json<Value>)> {
	let stored = app.group_hooks.ingress(record).await?;
	Ok((StatusCode::CREATED, Json(stored)))
}

/// DELETE {scimbase}/Groups/{id}
pub async fn delete_group(
	State(app): State<App>,
	Path(id): Path<String>,
) -> SdResult<StatusCode> {
	app.group_hooks.removal(&id).await?;
	Ok(StatusCode::NO_CONTENT)
}

// vim: ts=4
