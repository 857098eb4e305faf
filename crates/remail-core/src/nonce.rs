//! Replay-protection nonces for the resend step protocol.
//!
//! Stateless, time-windowed MACs in the style of the host platform's form
//! nonces: the token is an HMAC over the caller name, a fixed action tag,
//! and a coarse time tick. A nonce is accepted for the current tick and the
//! previous one, so it stays valid for at least half the configured window
//! and at most the whole of it. Nothing is stored server-side, which keeps
//! every step call servable by any stateless instance.

use axum::{
	body::Body,
	extract::State,
	http::{Request, response::Response},
	middleware::Next,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::extract::Auth;
use crate::prelude::*;

type HmacSha256 = Hmac<Sha256>;

/// Header the step protocol carries its nonce in
pub const NONCE_HEADER: &str = "x-remail-nonce";

const ACTION_TAG: &str = "remail-resend";

/// Truncated MAC length in bytes
const MAC_LEN: usize = 16;

#[derive(Debug)]
pub struct NonceKeeper {
	secret: Box<[u8]>,
	tick_secs: i64,
}

impl NonceKeeper {
	pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
		Self { secret: secret.into(), tick_secs: (ttl_secs / 2).max(1) }
	}

	/// Issues a nonce for `user`, valid for at least `tick_secs` from now
	pub fn issue(&self, user: &str) -> Box<str> {
		self.issue_at(user, Timestamp::now().0)
	}

	pub fn verify(&self, user: &str, token: &str) -> bool {
		self.verify_at(user, token, Timestamp::now().0)
	}

	/// Guaranteed validity of a freshly issued nonce, in seconds
	pub fn min_validity_secs(&self) -> i64 {
		self.tick_secs
	}

	fn issue_at(&self, user: &str, now: i64) -> Box<str> {
		URL_SAFE_NO_PAD.encode(&self.mac(user, now / self.tick_secs)[..MAC_LEN]).into()
	}

	fn verify_at(&self, user: &str, token: &str, now: i64) -> bool {
		let Ok(tag) = URL_SAFE_NO_PAD.decode(token) else {
			return false;
		};
		let tick = now / self.tick_secs;
		// current tick, then the previous one
		[tick, tick - 1].iter().any(|t| {
			self.mac_builder(user, *t)
				.map(|mac| mac.verify_truncated_left(&tag).is_ok())
				.unwrap_or(false)
		})
	}

	fn mac_builder(&self, user: &str, tick: i64) -> Option<HmacSha256> {
		let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
		mac.update(format!("{}|{}|{}", ACTION_TAG, user, tick).as_bytes());
		Some(mac)
	}

	fn mac(&self, user: &str, tick: i64) -> Box<[u8]> {
		match self.mac_builder(user, tick) {
			Some(mac) => mac.finalize().into_bytes().as_slice().into(),
			// HMAC-SHA256 accepts keys of any length; unreachable in practice
			None => Box::from([0u8; MAC_LEN].as_slice()),
		}
	}
}

/// Generate a random secret for deployments that don't configure one
pub fn generate_secret() -> Box<str> {
	URL_SAFE_NO_PAD.encode(rand::random::<[u8; 32]>()).into()
}

/// Middleware requiring a valid nonce in [`NONCE_HEADER`].
///
/// Must run inside `require_auth`: the nonce is bound to the authenticated
/// caller.
pub async fn require_nonce(
	State(app): State<App>,
	req: Request<Body>,
	next: Next,
) -> RmResult<Response<Body>> {
	let auth = req.extensions().get::<Auth>().cloned().ok_or(Error::Unauthorized)?;
	let token = req
		.headers()
		.get(NONCE_HEADER)
		.and_then(|h| h.to_str().ok())
		.ok_or(Error::Unauthorized)?;

	if !app.nonce.verify(&auth.0.user, token) {
		warn!(user = %auth.0.user, "Rejected stale or invalid resend nonce");
		return Err(Error::Unauthorized);
	}

	Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn keeper() -> NonceKeeper {
		NonceKeeper::new(b"nonce-test-secret", 600)
	}

	#[test]
	fn test_nonce_round_trip() {
		let keeper = keeper();
		let token = keeper.issue_at("alice", 10_000);
		assert!(keeper.verify_at("alice", &token, 10_000));
	}

	#[test]
	fn test_nonce_bound_to_user() {
		let keeper = keeper();
		let token = keeper.issue_at("alice", 10_000);
		assert!(!keeper.verify_at("bob", &token, 10_000));
	}

	#[test]
	fn test_nonce_survives_one_tick() {
		let keeper = keeper(); // tick = 300s
		let token = keeper.issue_at("alice", 10_000);
		assert!(keeper.verify_at("alice", &token, 10_000 + 300));
	}

	#[test]
	fn test_nonce_expires_after_two_ticks() {
		let keeper = keeper();
		let token = keeper.issue_at("alice", 10_000);
		assert!(!keeper.verify_at("alice", &token, 10_000 + 900));
	}

	#[test]
	fn test_tampered_nonce_rejected() {
		let keeper = keeper();
		let token = keeper.issue_at("alice", 10_000);
		let mut bytes = token.into_string().into_bytes();
		bytes[0] = if bytes[0] == b'A' { b'B' } else { b'A' };
		let tampered = String::from_utf8(bytes).unwrap();
		assert!(!keeper.verify_at("alice", &tampered, 10_000));
		assert!(!keeper.verify_at("alice", "%%%not-base64%%%", 10_000));
	}

	#[test]
	fn test_generated_secrets_differ() {
		assert_ne!(generate_secret(), generate_secret());
	}
}

// vim: ts=4
