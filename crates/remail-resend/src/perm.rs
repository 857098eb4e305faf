//! Manager permission middleware

use axum::{
	extract::{Request, State},
	middleware::Next,
	response::Response,
};

use crate::prelude::*;
use remail_core::extract::Auth;

/// Role required to run bulk resends (the host platform's store-manager
/// capability, carried into Remail's access tokens)
pub const ROLE_MANAGER: &str = "MGR";

/// Middleware that checks if the current user has the manager role.
///
/// Runs inside `require_auth`; rejects with `PermissionDenied` so the caller
/// can distinguish "log in" from "not allowed".
pub async fn require_manager(
	State(_app): State<App>,
	Auth(auth_ctx): Auth,
	req: Request,
	next: Next,
) -> Result<Response, Error> {
	if !auth_ctx.has_role(ROLE_MANAGER) {
		warn!(
			subject = %auth_ctx.user,
			roles = ?auth_ctx.roles,
			"Resend permission denied - manager role required"
		);
		return Err(Error::PermissionDenied);
	}

	Ok(next.run(req).await)
}

// vim: ts=4
