//! Error type shared by every Remail crate.
//!
//! One enum covers the whole taxonomy: validation failures reject a request
//! before anything runs, authorization failures reject it with no state
//! change, and everything else is either a storage error or a per-item
//! mailer/audit error that the batch runner collects without aborting.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

pub type RmResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	Unauthorized,
	DbError,
	ValidationError(String),
	ConfigError(String),
	MailerError(String),
	ServiceUnavailable(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::DbError => write!(f, "database error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::MailerError(msg) => write!(f, "mailer error: {}", msg),
			Error::ServiceUnavailable(msg) => write!(f, "service unavailable: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

#[derive(Serialize)]
struct ErrorBody {
	error: &'static str,
	message: String,
}

impl Error {
	fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "NOT_FOUND",
			Error::PermissionDenied => "PERMISSION_DENIED",
			Error::Unauthorized => "UNAUTHORIZED",
			Error::DbError => "DB_ERROR",
			Error::ValidationError(_) => "VALIDATION_ERROR",
			Error::ConfigError(_) => "CONFIG_ERROR",
			Error::MailerError(_) => "MAILER_ERROR",
			Error::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
			Error::Internal(_) | Error::Io(_) => "INTERNAL",
		}
	}

	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::ConfigError(_) => StatusCode::PRECONDITION_FAILED,
			Error::ServiceUnavailable(_) | Error::MailerError(_) => StatusCode::SERVICE_UNAVAILABLE,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let body = ErrorBody { error: self.code(), message: self.to_string() };
		(self.status(), Json(body)).into_response()
	}
}


// vim: ts=4
