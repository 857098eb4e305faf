//! App state type

use std::sync::Arc;

use crate::nonce::NonceKeeper;

use remail_types::mailer_adapter::MailerAdapter;
use remail_types::order_adapter::OrderAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppOpts,
	pub nonce: NonceKeeper,

	pub order_adapter: Arc<dyn OrderAdapter>,
	pub mailer_adapter: Arc<dyn MailerAdapter>,
}

pub type App = Arc<AppState>;

#[derive(Debug)]
pub struct AppOpts {
	pub listen: Box<str>,
	/// HS256 secret for access tokens and the nonce MAC
	pub auth_secret: Box<str>,
	/// Nonce validity window in seconds (a nonce is accepted for at least
	/// half of this and at most all of it)
	pub nonce_ttl_secs: i64,
}

// vim: ts=4
