pub mod app;
pub mod revision;
pub mod route_auth;
pub mod store;

// vim: ts=4
