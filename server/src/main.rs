use std::env;

use remail::bootstrap::{self, ServerConfig};
use remail::prelude::*;
use remail::routes;
use remail_core::route_auth;
use remail_resend::perm::ROLE_MANAGER;

/// `remail mint-token <user> [roles]` - mint an access token and exit.
/// Roles default to the manager role; pass a comma-separated list to
/// override.
fn mint_token(args: &[String]) -> RmResult<()> {
	let user = args.first().ok_or_else(|| {
		Error::ValidationError("usage: remail mint-token <user> [roles]".into())
	})?;
	let roles = args.get(1).map(String::as_str).unwrap_or(ROLE_MANAGER);

	let secret = env::var("REMAIL_AUTH_SECRET")
		.map_err(|_| Error::ConfigError("REMAIL_AUTH_SECRET is required to mint tokens".into()))?;

	let token = route_auth::generate_access_token(&secret, user, Some(roles))?;
	println!("{}", token);
	Ok(())
}

#[tokio::main]
async fn main() -> RmResult<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	let args: Vec<String> = env::args().skip(1).collect();
	if args.first().map(String::as_str) == Some("mint-token") {
		return mint_token(&args[1..]);
	}

	let config = ServerConfig::from_env()?;
	let listen = config.listen.clone();
	let app = bootstrap::build_app(config).await?;
	let router = routes::init(app);

	let listener = tokio::net::TcpListener::bind(listen.as_ref()).await?;
	info!(listen = %listen, "Remail listening");
	axum::serve(listener, router).await?;

	Ok(())
}

// vim: ts=4
