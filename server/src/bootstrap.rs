//! Bootstrap: configuration from the environment and app state assembly

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::prelude::*;
use remail_core::app::{AppOpts, AppState};
use remail_core::nonce::{self, NonceKeeper};
use remail_mailer_adapter_http::MailerAdapterHttp;
use remail_order_adapter_sqlite::OrderAdapterSqlite;

const DEFAULT_LISTEN: &str = "127.0.0.1:8440";
const DEFAULT_DB_PATH: &str = "./data/orders.db";
const DEFAULT_NONCE_TTL_SECS: i64 = 600;

#[derive(Debug)]
pub struct ServerConfig {
	pub listen: Box<str>,
	pub db_path: PathBuf,
	pub mailer_url: Box<str>,
	pub mailer_api_key: Option<Box<str>>,
	pub auth_secret: Option<Box<str>>,
	pub nonce_ttl_secs: i64,
}

impl ServerConfig {
	pub fn from_env() -> RmResult<Self> {
		let mailer_url = env::var("REMAIL_MAILER_URL")
			.map_err(|_| Error::ConfigError("REMAIL_MAILER_URL is not set".into()))?;

		let nonce_ttl_secs = match env::var("REMAIL_NONCE_TTL") {
			Ok(val) => val
				.parse()
				.map_err(|_| Error::ConfigError(format!("invalid REMAIL_NONCE_TTL: {}", val)))?,
			Err(_) => DEFAULT_NONCE_TTL_SECS,
		};

		Ok(Self {
			listen: env::var("REMAIL_LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN.into()).into(),
			db_path: env::var("REMAIL_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.into()).into(),
			mailer_url: mailer_url.into(),
			mailer_api_key: env::var("REMAIL_MAILER_API_KEY").ok().map(Into::into),
			auth_secret: env::var("REMAIL_AUTH_SECRET").ok().map(Into::into),
			nonce_ttl_secs,
		})
	}
}

pub async fn build_app(config: ServerConfig) -> RmResult<App> {
	if let Some(dir) = config.db_path.parent() {
		if !dir.as_os_str().is_empty() {
			tokio::fs::create_dir_all(dir).await?;
		}
	}

	let order_adapter = Arc::new(OrderAdapterSqlite::new(&config.db_path).await?);
	let mailer_adapter =
		Arc::new(MailerAdapterHttp::new(&config.mailer_url, config.mailer_api_key.as_deref()));

	let auth_secret = match config.auth_secret {
		Some(secret) => secret,
		None => {
			warn!("REMAIL_AUTH_SECRET not set; generated an ephemeral secret - tokens will not survive a restart");
			nonce::generate_secret()
		}
	};

	let nonce = NonceKeeper::new(auth_secret.as_bytes(), config.nonce_ttl_secs);

	info!(listen = %config.listen, db = %config.db_path.display(), mailer = %config.mailer_url, "Remail configured");

	Ok(Arc::new(AppState {
		opts: AppOpts {
			listen: config.listen,
			auth_secret,
			nonce_ttl_secs: config.nonce_ttl_secs,
		},
		nonce,
		order_adapter,
		mailer_adapter,
	}))
}

// vim: ts=4
