//! Handlers for the resend step protocol.
//!
//! The protocol is two operations plus two helpers:
//! - `POST /api/resend/start` — validate criteria, return the total
//! - `POST /api/resend/step` — process one batch slice at an offset
//! - `POST /api/resend/preview` — the rows a run would touch, side-effect free
//! - `GET /api/resend/nonce` — a fresh replay-protection nonce
//!
//! All of them receive the full criteria on every call; there is no
//! server-side session between steps.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::batch::{self, StepResult};
use crate::criteria::{CriteriaRequest, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE, ResendCriteria};
use crate::prelude::*;
use crate::preview::{self, PreviewReport};
use crate::selector;
use remail_core::extract::Auth;
use remail_types::types::ApiResponse;

/// Request body for the step operation: criteria plus run position
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
	#[serde(flatten)]
	pub criteria: CriteriaRequest,
	#[serde(default)]
	pub offset: u32,
	/// Slice size; defaults to 20, capped at 100
	pub batch: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
	pub total: u32,
	pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceResponse {
	pub nonce: Box<str>,
	/// Guaranteed validity in seconds
	pub expires_in: i64,
}

/// GET /api/resend/nonce - Issue a replay-protection nonce for the caller
pub async fn get_nonce(
	State(app): State<App>,
	Auth(auth_ctx): Auth,
) -> RmResult<Json<ApiResponse<NonceResponse>>> {
	let nonce = app.nonce.issue(&auth_ctx.user);
	Ok(Json(ApiResponse::new(NonceResponse {
		nonce,
		expires_in: app.nonce.min_validity_secs(),
	})))
}

/// POST /api/resend/start - Validate criteria and compute the run total
pub async fn post_start(
	State(app): State<App>,
	Auth(auth_ctx): Auth,
	Json(req): Json<CriteriaRequest>,
) -> RmResult<Json<ApiResponse<StartResponse>>> {
	let criteria = ResendCriteria::from_request(&req)?;

	let selection = selector::select(app.order_adapter.as_ref(), &criteria).await?;
	info!(
		user = %auth_ctx.user,
		total = selection.order_ids.len(),
		dry_run = criteria.dry_run,
		"Resend run started"
	);

	Ok(Json(ApiResponse::new(StartResponse {
		total: selection.order_ids.len() as u32,
		warnings: selection.warnings,
	})))
}

/// POST /api/resend/step - Process one batch slice
pub async fn post_step(
	State(app): State<App>,
	Auth(auth_ctx): Auth,
	Json(req): Json<StepRequest>,
) -> RmResult<Json<ApiResponse<StepResult>>> {
	let criteria = ResendCriteria::from_request(&req.criteria)?;
	let batch_size = req.batch.unwrap_or(DEFAULT_BATCH_SIZE).min(MAX_BATCH_SIZE);

	let result = batch::run_batch(
		app.order_adapter.as_ref(),
		app.mailer_adapter.as_ref(),
		&auth_ctx.user,
		&criteria,
		req.offset,
		batch_size,
	)
	.await?;

	info!(
		user = %auth_ctx.user,
		offset = req.offset,
		next_offset = result.next_offset,
		done = result.done,
		errors = result.errors.len(),
		"Resend step finished"
	);

	Ok(Json(ApiResponse::new(result)))
}

/// POST /api/resend/preview - Rows a run with these criteria would attempt
pub async fn post_preview(
	State(app): State<App>,
	Auth(_auth_ctx): Auth,
	Json(req): Json<CriteriaRequest>,
) -> RmResult<Json<ApiResponse<PreviewReport>>> {
	let criteria = ResendCriteria::from_request(&req)?;
	let report =
		preview::preview(app.order_adapter.as_ref(), app.mailer_adapter.as_ref(), &criteria)
			.await?;
	Ok(Json(ApiResponse::new(report)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_step_request_parses_flattened_criteria() {
		let body = serde_json::json!({
			"start": "2025-08-12T09:00",
			"end": "2025-08-13T09:00",
			"statuses": ["completed"],
			"emails": ["customer_completed"],
			"offset": 40,
			"batch": 20,
			"dryRun": true,
		});
		let req: StepRequest = serde_json::from_value(body).unwrap();
		assert_eq!(req.offset, 40);
		assert_eq!(req.batch, Some(20));
		assert!(req.criteria.dry_run);
		assert_eq!(req.criteria.emails, vec!["customer_completed"]);
	}

	#[test]
	fn test_step_request_defaults() {
		let body = serde_json::json!({
			"start": "2025-08-12T09:00",
			"end": "2025-08-13T09:00",
			"emails": ["customer_completed"],
		});
		let req: StepRequest = serde_json::from_value(body).unwrap();
		assert_eq!(req.offset, 0);
		assert_eq!(req.batch, None);
		assert!(!req.criteria.skip_processed);
	}

	#[test]
	fn test_step_result_wire_shape() {
		let result = StepResult {
			done: false,
			next_offset: 2,
			sent_counts: [(EmailKey::CustomerCompleted, 2)].into_iter().collect(),
			errors: vec![],
			last_order_id: Some(OrderId(17)),
		};
		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(json["nextOffset"], 2);
		assert_eq!(json["sentCounts"]["customer_completed"], 2);
		assert_eq!(json["lastOrderId"], 17);
	}
}

// vim: ts=4
