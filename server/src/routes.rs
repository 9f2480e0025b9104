use axum::{
	middleware,
	routing::{delete, get},
	Router,
};
use tower_http::trace::TraceLayer;

use crate::core::route_auth::require_auth;
use crate::prelude::*;
use crate::{scim, ui};

fn init_scim(app: App) -> Router<App> {
	Router::new()
		.route("/Users", get(scim::handler::list_users).post(scim::handler::post_user))
		.route("/Users/{id}", delete(scim::handler::delete_user))
		.route("/Groups", get(scim::handler::list_groups).post(scim::handler::post_group))
		.route("/Groups/{id}", delete(scim::handler::delete_group))
		.layer(middleware::from_fn_with_state(app, require_auth))
}

pub fn init(app: App) -> Router {
	let scimbase = app.directory.config().scimbase;

	Router::new()
		.nest(&scimbase, init_scim(app.clone()))
		.route("/api", get(ui::handler::api_op))
		.route("/api/state", get(ui::handler::get_state))
		.route("/poll", get(ui::handler::poll))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
