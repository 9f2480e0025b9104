//! Request authentication for the SCIM routes.
//!
//! Two schemes are accepted: HTTP Basic against the configured username
//! and password, and Bearer against the configured token. Comparison is
//! exact; a request with no Authorization header or an unknown scheme is
//! rejected.

use axum::{
	body::Body,
	extract::State,
	http::{header::AUTHORIZATION, Request},
	middleware::Next,
	response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::prelude::*;

/// Scheme-dispatching credential check, pure so it can be tested without a
/// request in flight.
pub fn check_credentials(
	header: Option<&str>,
	username: &str,
	password: &str,
	token: Option<&str>,
) -> SdResult<()> {
	let header = header.ok_or(Error::Unauthorized)?;

	if let Some(bearer) = header.strip_prefix("Bearer ") {
		return match token {
			Some(token) if bearer == token => Ok(()),
			_ => Err(Error::Unauthorized),
		};
	}

	if let Some(basic) = header.strip_prefix("Basic ") {
		let decoded = BASE64.decode(basic).map_err(|_| Error::Unauthorized)?;
		let decoded = String::from_utf8(decoded).map_err(|_| Error::Unauthorized)?;
		let expected = format!("{}:{}", username, password);
		if decoded == expected {
			return Ok(());
		}
		return Err(Error::Unauthorized);
	}

	Err(Error::Unauthorized)
}

pub async fn require_auth(
	State(app): State<App>,
	req: Request<Body>,
	next: Next,
) -> SdResult<Response> {
	let header = req.headers().get(AUTHORIZATION).and_then(|h| h.to_str().ok());
	let config = app.directory.config();

	check_credentials(header, &config.username, &config.password, config.token.as_deref())
		.inspect_err(|_| warn!("Rejected unauthenticated SCIM request"))?;

	Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn basic(user: &str, pass: &str) -> String {
		format!("Basic {}", BASE64.encode(format!("{}:{}", user, pass)))
	}

	#[test]
	fn test_basic_auth_accepts_exact_match() {
		let header = basic("admin", "secret");
		assert!(check_credentials(Some(&header), "admin", "secret", None).is_ok());
	}

	#[test]
	fn test_basic_auth_rejects_wrong_password() {
		let header = basic("admin", "wrong");
		assert!(check_credentials(Some(&header), "admin", "secret", None).is_err());
	}

	#[test]
	fn test_bearer_accepts_configured_token() {
		assert!(check_credentials(Some("Bearer tok123"), "admin", "secret", Some("tok123")).is_ok());
		assert!(
			check_credentials(Some("Bearer other"), "admin", "secret", Some("tok123")).is_err()
		);
	}

	#[test]
	fn test_bearer_rejected_when_no_token_configured() {
		assert!(check_credentials(Some("Bearer tok123"), "admin", "secret", None).is_err());
	}

	#[test]
	fn test_missing_header_and_unknown_scheme_rejected() {
		assert!(check_credentials(None, "admin", "secret", None).is_err());
		assert!(check_credentials(Some("Digest abc"), "admin", "secret", None).is_err());
		assert!(check_credentials(Some("Basic !!!"), "admin", "secret", None).is_err());
	}
}

// vim: ts=4
