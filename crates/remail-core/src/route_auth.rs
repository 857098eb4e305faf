//! Bearer-token route middleware.
//!
//! Access tokens are HS256 JWTs carrying the caller name and a
//! comma-separated role list. Tokens are minted out-of-band (see the server
//! binary's `mint-token` subcommand); there is no login flow, because the
//! host platform owns user management.

const TOKEN_EXPIRE: u64 = 8; /* hours */

use axum::{
	body::Body,
	extract::State,
	http::{Request, response::Response},
	middleware::Next,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::time;

use crate::extract::{Auth, AuthCtx};
use crate::prelude::*;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthToken<S> {
	pub sub: S,
	pub exp: u64,
	pub r: Option<S>,
}

pub fn generate_access_token(secret: &str, user: &str, roles: Option<&str>) -> RmResult<Box<str>> {
	let expire = time::SystemTime::now()
		.duration_since(time::UNIX_EPOCH)
		.map_err(|_| Error::Internal("system clock before epoch".into()))?
		.as_secs() + 3600 * TOKEN_EXPIRE;

	let token = jsonwebtoken::encode(
		&jsonwebtoken::Header::new(Algorithm::HS256),
		&AuthToken::<&str> { sub: user, exp: expire, r: roles },
		&jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|_| Error::Unauthorized)?
	.into();

	Ok(token)
}

fn validate_token(secret: &str, token: &str) -> RmResult<AuthCtx> {
	let decoding_key = DecodingKey::from_secret(secret.as_bytes());

	let token_data = decode::<AuthToken<Box<str>>>(
		token,
		&decoding_key,
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|_| Error::Unauthorized)?;

	Ok(AuthCtx {
		user: token_data.claims.sub,
		roles: token_data
			.claims
			.r
			.unwrap_or_default()
			.split(',')
			.filter(|r| !r.is_empty())
			.map(Box::from)
			.collect(),
	})
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> RmResult<Response<Body>> {
	let auth_header = req
		.headers()
		.get("Authorization")
		.and_then(|h| h.to_str().ok())
		.ok_or(Error::Unauthorized)?;

	let token = auth_header.strip_prefix("Bearer ").ok_or(Error::Unauthorized)?;
	let ctx = validate_token(&app.opts.auth_secret, token)?;

	req.extensions_mut().insert(Auth(ctx));

	Ok(next.run(req).await)
}

pub async fn optional_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> RmResult<Response<Body>> {
	if let Some(auth_header) = req.headers().get("Authorization").and_then(|h| h.to_str().ok()) {
		if let Some(token) = auth_header.strip_prefix("Bearer ") {
			if let Ok(ctx) = validate_token(&app.opts.auth_secret, token) {
				req.extensions_mut().insert(Auth(ctx));
			}
		}
	}

	Ok(next.run(req).await)
}


// vim: ts=4
