//! Order selection: criteria in, ordered id list out.
//!
//! The Selector is side-effect free and idempotent for a fixed criteria
//! snapshot and fixed underlying data. Its ascending creation-time order is
//! what makes batch offsets resumable; orders inserted between steps appear
//! only where their creation time sorts relative to the current offset.

use crate::criteria::ResendCriteria;
use crate::prelude::*;
use remail_types::order_adapter::{ListOrderOptions, OrderAdapter};

/// Selector output: ordered ids plus non-fatal configuration warnings
#[derive(Debug, Default)]
pub struct Selection {
	pub order_ids: Vec<OrderId>,
	pub warnings: Vec<String>,
}

/// Computes the ordered set of target order ids for `criteria`.
///
/// A requested payment-method exclusion is applied only when the method is
/// active on the host; otherwise it is dropped and reported as a warning,
/// never an error.
pub async fn select(orders: &dyn OrderAdapter, criteria: &ResendCriteria) -> RmResult<Selection> {
	let mut warnings = Vec::new();

	let exclude = match criteria.exclude_payment_method.as_deref() {
		Some(method) => {
			if orders.is_payment_method_active(method).await? {
				Some(method)
			} else {
				warn!(method = %method, "Payment-method exclusion ignored: method not active");
				warnings.push(format!(
					"Exclusion of payment method \"{}\" was ignored because the method is not active on this store.",
					method
				));
				None
			}
		}
		None => None,
	};

	let ids = orders
		.list_order_ids(&ListOrderOptions {
			statuses: &criteria.statuses,
			created_from: criteria.start,
			created_until: criteria.end,
			exclude_payment_method: exclude,
		})
		.await?;

	// Adapters return ascending creation-time order; dedup defensively while
	// keeping that order.
	let mut seen = std::collections::HashSet::with_capacity(ids.len());
	let mut order_ids = Vec::with_capacity(ids.len());
	for id in ids {
		if !seen.insert(id) {
			continue;
		}
		if criteria.skip_processed && orders.read_resend_done(id).await? {
			continue;
		}
		order_ids.push(id);
	}

	Ok(Selection { order_ids, warnings })
}


// vim: ts=4
