//! Error type shared by the server and all adapters.

use axum::{http::StatusCode, response::IntoResponse};

pub type SdResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Resource or snapshot not found
	NotFound,
	/// Missing or invalid credentials
	Unauthorized,
	PermissionDenied,
	/// Malformed input that could not be parsed (filter expressions, records)
	Parse,
	ValidationError(String),
	/// Snapshot write failure; fatal to the in-flight mutation
	Persistence(String),
	Internal(String),

	// externals
	Io(std::io::Error),
	Json(serde_json::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Parse => write!(f, "parse error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::Persistence(msg) => write!(f, "persistence error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			Error::Json(err) => write!(f, "json error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
			Error::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized").into_response(),
			Error::PermissionDenied => (StatusCode::FORBIDDEN, "forbidden").into_response(),
			Error::Parse | Error::ValidationError(_) => {
				(StatusCode::BAD_REQUEST, "bad request").into_response()
			}
			_ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
		}
	}
}

// vim: ts=4
