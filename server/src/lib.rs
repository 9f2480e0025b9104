//! scimdir is a small self-hosted SCIM directory server.
//!
//! # Features
//!
//! - In-memory identity store (users and groups)
//!		- filtered, paginated reads
//!		- bidirectional group membership maintenance
//!	- Revision counter with long-poll change notification
//!	- Snapshot persistence after every mutation
//!	- Random user seeding with weighted group assignment
//!	- SCIM ingress/egress/removal hooks for a protocol middleware

#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod core;
pub mod directory;
pub mod prelude;
pub mod routes;
pub mod scim;
pub mod ui;

pub use crate::core::app::{App, AppBuilder, AppState};

pub use scimdir_types::{
	config, error, filter_adapter, hooks, resource, snapshot_adapter, user_source,
};

// vim: ts=4
