//! The batch step runner.
//!
//! One call processes one bounded slice of the selected order list. The
//! caller owns the run state: it passes the full criteria plus the current
//! offset on every call and advances the offset from the returned
//! `next_offset` until `done`. The selection is recomputed from scratch each
//! step, so a crashed or restarted caller can resume at its last offset.

use serde::Serialize;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

use crate::criteria::ResendCriteria;
use crate::prelude::*;
use crate::selector;
use remail_types::mailer_adapter::MailerAdapter;
use remail_types::order_adapter::OrderAdapter;

/// Outcome of a single `step` call
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
	pub done: bool,
	pub next_offset: u32,
	/// Successful (or dry-run-counted) sends per selected email key
	pub sent_counts: BTreeMap<EmailKey, u32>,
	/// Per-item failures, in processing order. Never aborts the batch.
	pub errors: Vec<String>,
	/// Last order examined in this slice, for progress display
	pub last_order_id: Option<OrderId>,
}

impl StepResult {
	fn terminal(offset: u32) -> Self {
		Self {
			done: true,
			next_offset: offset,
			sent_counts: BTreeMap::new(),
			errors: Vec::new(),
			last_order_id: None,
		}
	}
}

/// Runs one batch slice: orders `[offset, min(offset + batch_size, total))`
/// of the current selection, in selection order.
///
/// Per order, every selected email key is attempted independently; a single
/// trigger failure is recorded and processing continues. In non-dry-run mode
/// the order's processed marker is set after its keys are attempted, whether
/// or not any of them succeeded, and an audit note is appended when at least
/// one did.
pub async fn run_batch(
	orders: &dyn OrderAdapter,
	mailer: &dyn MailerAdapter,
	actor: &str,
	criteria: &ResendCriteria,
	offset: u32,
	batch_size: u32,
) -> RmResult<StepResult> {
	let selection = selector::select(orders, criteria).await?;
	let total = selection.order_ids.len() as u32;

	if offset >= total {
		// Terminal state; repeat calls are safe and stay terminal.
		return Ok(StepResult::terminal(offset));
	}

	let end = (offset + batch_size.max(1)).min(total);
	debug!(offset = offset, end = end, total = total, dry_run = criteria.dry_run, "Running batch slice");

	let mut sent_counts: BTreeMap<EmailKey, u32> =
		criteria.emails.iter().map(|k| (*k, 0)).collect();
	let mut errors = Vec::new();
	let mut last_order_id = None;

	for &order_id in &selection.order_ids[offset as usize..end as usize] {
		last_order_id = Some(order_id);

		// Defensive re-check: a concurrent run may have marked the order
		// between selection and this slice.
		if criteria.skip_processed && orders.read_resend_done(order_id).await? {
			debug!(order_id = %order_id, "Order marked processed since selection, skipping");
			continue;
		}

		let skip_admin = criteria.only_if_not_sent_admin
			&& criteria.emails.contains(&EmailKey::AdminNewOrder)
			&& orders.read_admin_email_sent(order_id).await?;

		let mut sent_keys: Vec<EmailKey> = Vec::new();
		for &key in &criteria.emails {
			if key == EmailKey::AdminNewOrder && skip_admin {
				continue;
			}

			match mailer.is_enabled(key).await {
				Ok(true) => {}
				Ok(false) => continue,
				Err(err) => {
					errors.push(format!("Order #{}: {} ({})", order_id, err, key));
					continue;
				}
			}

			if criteria.dry_run {
				if let Some(count) = sent_counts.get_mut(&key) {
					*count += 1;
				}
				continue;
			}

			match mailer.trigger(key, order_id).await {
				Ok(()) => {
					if let Some(count) = sent_counts.get_mut(&key) {
						*count += 1;
					}
					sent_keys.push(key);
				}
				Err(err) => {
					warn!(order_id = %order_id, key = %key, error = %err, "Email trigger failed");
					errors.push(format!("Order #{}: {} ({})", order_id, err, key));
				}
			}
		}

		if !criteria.dry_run {
			// Marker first, unconditionally: a re-run must not re-process this
			// order even when every key failed or was skipped.
			orders.mark_resend_done(order_id).await?;

			if !sent_keys.is_empty() {
				let keys = sent_keys.iter().map(EmailKey::as_str).collect::<Vec<_>>().join(", ");
				let note = format!(
					"Emails resent by {} at {}: {}",
					actor,
					Timestamp::now().format_display(),
					keys
				);
				if let Err(err) = orders.append_order_note(order_id, &note).await {
					warn!(order_id = %order_id, error = %err, "Failed to append resend note");
					errors.push(format!("Order #{}: failed to append order note: {}", order_id, err));
				}
			}
		}
	}

	Ok(StepResult {
		done: end >= total,
		next_offset: end,
		sent_counts,
		errors,
		last_order_id,
	})
}


// vim: ts=4
