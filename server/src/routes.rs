use axum::{
	Router, middleware,
	routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::prelude::*;
use remail_core::{nonce, route_auth};
use remail_resend::{handler, perm};

pub fn init(app: App) -> Router {
	// layers run outermost-last: auth first, then role, then nonce
	let protected = Router::new()
		.route("/api/resend/start", post(handler::post_start))
		.route("/api/resend/step", post(handler::post_step))
		.route("/api/resend/preview", post(handler::post_preview))
		.layer(middleware::from_fn_with_state(app.clone(), nonce::require_nonce))
		.layer(middleware::from_fn_with_state(app.clone(), perm::require_manager))
		.layer(middleware::from_fn_with_state(app.clone(), route_auth::require_auth));

	let session = Router::new()
		.route("/api/resend/nonce", get(handler::get_nonce))
		.layer(middleware::from_fn_with_state(app.clone(), perm::require_manager))
		.layer(middleware::from_fn_with_state(app.clone(), route_auth::require_auth));

	Router::new()
		.route("/api/health", get(async || "ok\n"))
		.merge(session)
		.merge(protected)
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(app)
}

// vim: ts=4
