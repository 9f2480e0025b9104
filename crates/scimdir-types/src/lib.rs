//! Shared types, adapter traits, and core utilities for the scimdir server.
//!
//! This crate contains the foundational types that are shared between the
//! server crate and all adapter implementations. Extracting these into a
//! separate crate allows adapter crates to compile in parallel with the
//! server's feature modules.

pub mod config;
pub mod error;
pub mod filter_adapter;
pub mod hooks;
pub mod prelude;
pub mod resource;
pub mod snapshot_adapter;
pub mod user_source;

// vim: ts=4
